use serde::{Deserialize, Serialize};

/// The fixed slot set extracted from a single utterance. Empty string means
/// "unknown/absent"; every extractor populates all six fields, so downstream
/// code never deals with a missing key.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SlotSet {
    pub passenger_name: String,
    pub origin: String,
    pub destination: String,
    pub date: String,
    pub time: String,
    pub booking_reference: String,
}

impl SlotSet {
    /// A slot set is worth keeping when any field other than the booking
    /// reference was filled, or the reference itself was found.
    pub fn is_meaningful(&self) -> bool {
        !self.passenger_name.is_empty()
            || !self.origin.is_empty()
            || !self.destination.is_empty()
            || !self.date.is_empty()
            || !self.time.is_empty()
            || !self.booking_reference.is_empty()
    }

    /// Names of the slots a booking still needs, in fixed order.
    pub fn missing_for_booking(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.passenger_name.is_empty() {
            missing.push("passenger_name");
        }
        if self.origin.is_empty() {
            missing.push("origin");
        }
        if self.destination.is_empty() {
            missing.push("destination");
        }
        if self.date.is_empty() {
            missing.push("date");
        }
        if self.time.is_empty() {
            missing.push("time");
        }
        missing
    }
}
