use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::config::AppConfig;
use crate::services::llm::CompletionProvider;
use crate::services::reservations::ReservationBackend;

pub struct AppState {
    pub db: Arc<Mutex<Connection>>,
    pub config: AppConfig,
    /// `None` in mock mode: the classifier falls back to keyword rules and
    /// the semantic slot extractor is skipped.
    pub llm: Option<Box<dyn CompletionProvider>>,
    pub reservations: Box<dyn ReservationBackend>,
}
