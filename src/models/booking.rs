use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub booking_reference: String,
    pub passenger_name: String,
    pub origin: String,
    pub destination: String,
    pub date: String,
    pub time: String,
    pub flight_class: String,
    pub status: BookingStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Booking {
    /// Server-generated reference: BK-<today as YYYYMMDD>-<8 hex chars>.
    pub fn new_reference() -> String {
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        format!("BK-{}-{}", Utc::now().format("%Y%m%d"), &suffix[..8])
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
    Rescheduled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Cancelled => "CANCELLED",
            BookingStatus::Rescheduled => "RESCHEDULED",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "CANCELLED" => BookingStatus::Cancelled,
            "RESCHEDULED" => BookingStatus::Rescheduled,
            _ => BookingStatus::Confirmed,
        }
    }
}
