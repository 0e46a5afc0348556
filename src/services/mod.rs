pub mod llm;
pub mod reservations;
