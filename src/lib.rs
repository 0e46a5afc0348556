pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod nlu;
pub mod services;
pub mod state;
