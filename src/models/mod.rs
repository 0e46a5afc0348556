pub mod booking;
pub mod intent;
pub mod slots;
pub mod tool;

pub use booking::{Booking, BookingStatus};
pub use intent::Intent;
pub use slots::SlotSet;
pub use tool::{BackendError, BookingSummary, ToolOutput, ToolResult};
