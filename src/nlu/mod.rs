pub mod dialogue;
pub mod intent;
pub mod llm_slots;
pub mod prompts;
pub mod slots;
