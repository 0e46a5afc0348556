use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::nlu::dialogue::{self, HandleReply};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ChatRequest {
    pub user_text: String,
}

/// One conversational turn. Every outcome, including backend failures, comes
/// back as a well-formed reply record; this endpoint has no error responses.
pub async fn handle_message(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> Json<HandleReply> {
    tracing::info!(user_text = %req.user_text, "incoming chat message");

    let reply = dialogue::handle_message(
        state.llm.as_deref(),
        state.reservations.as_ref(),
        &req.user_text,
    )
    .await;

    Json(reply)
}
