use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Book,
    Cancel,
    Reschedule,
    Unknown,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Book => "book",
            Intent::Cancel => "cancel",
            Intent::Reschedule => "reschedule",
            Intent::Unknown => "unknown",
        }
    }

    /// Maps one of the four recognized words to an intent; anything else is Unknown.
    pub fn parse(s: &str) -> Self {
        match s {
            "book" => Intent::Book,
            "cancel" => Intent::Cancel,
            "reschedule" => Intent::Reschedule,
            _ => Intent::Unknown,
        }
    }
}
