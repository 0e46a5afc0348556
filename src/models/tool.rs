use serde::{Deserialize, Serialize};

/// Booking fields echoed back by the reservation backend. Cancel responses
/// carry only the reference and status; book and reschedule fill in more.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingSummary {
    pub booking_reference: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passenger_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

/// Anything that stopped a backend operation: a transport failure, a timeout,
/// or an application error the backend reported. Surfaced to the user
/// verbatim, never retried.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct BackendError(pub String);

pub type ToolResult = Result<BookingSummary, BackendError>;

/// Wire shape of the orchestrator's `tool_output` field: the backend's
/// booking fields on success, `{"error": ...}` on failure, `{}` when no
/// backend call was made this turn.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ToolOutput {
    Empty {},
    Error { error: String },
    Booking(BookingSummary),
}

impl From<ToolResult> for ToolOutput {
    fn from(result: ToolResult) -> Self {
        match result {
            Ok(summary) => ToolOutput::Booking(summary),
            Err(e) => ToolOutput::Error { error: e.0 },
        }
    }
}

impl ToolOutput {
    pub fn is_empty(&self) -> bool {
        matches!(self, ToolOutput::Empty {})
    }
}
