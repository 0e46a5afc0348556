use serde::Serialize;

use crate::models::{Intent, SlotSet, ToolOutput};
use crate::nlu::{intent, llm_slots, slots};
use crate::services::llm::CompletionProvider;
use crate::services::reservations::ReservationBackend;

const FLIGHT_CLASS_DEFAULT: &str = "Economy";

/// One turn's worth of output: the reply to render, the structured result of
/// the backend call (if one was made), and what the NLU layer understood.
#[derive(Debug, Serialize)]
pub struct HandleReply {
    pub assistant_text: String,
    pub tool_output: ToolOutput,
    pub intent: Intent,
    pub slots: SlotSet,
}

/// Processes a single utterance: classify, extract, then either invoke one
/// backend operation or ask for what is missing. Stateless across calls, at
/// most one backend call per turn, and no failure path escapes as an error.
pub async fn handle_message(
    llm: Option<&dyn CompletionProvider>,
    backend: &dyn ReservationBackend,
    user_text: &str,
) -> HandleReply {
    let intent = match llm {
        Some(llm) => intent::classify_with_llm(llm, user_text).await,
        None => intent::classify_rules(user_text),
    };

    let mut slots = slots::extract(user_text);
    if !slots.is_meaningful() {
        if let Some(llm) = llm {
            slots = llm_slots::extract_with_llm(llm, user_text).await;
        }
    }

    tracing::info!(intent = intent.as_str(), "processing utterance");

    let (assistant_text, tool_output) = match intent {
        Intent::Book => handle_book(backend, &slots).await,
        Intent::Cancel => handle_cancel(backend, &slots).await,
        Intent::Reschedule => handle_reschedule(backend, &slots).await,
        Intent::Unknown => (
            "Sorry, I didn't understand that. I can help with booking, cancelling, or rescheduling flights."
                .to_string(),
            ToolOutput::Empty {},
        ),
    };

    HandleReply {
        assistant_text,
        tool_output,
        intent,
        slots,
    }
}

async fn handle_book(backend: &dyn ReservationBackend, slots: &SlotSet) -> (String, ToolOutput) {
    let missing = slots.missing_for_booking();
    if !missing.is_empty() {
        let text = format!(
            "I detected you want to book a flight, but I need more info: {}. \
             Example: 'Book flight for Vaishak from BOM to BLR on 2025-10-10 at 10:30'.",
            missing.join(", ")
        );
        return (text, ToolOutput::Empty {});
    }

    let result = backend
        .book(
            &slots.passenger_name,
            &slots.origin,
            &slots.destination,
            &slots.date,
            &slots.time,
            FLIGHT_CLASS_DEFAULT,
        )
        .await;

    match result {
        Err(e) => (format!("Failed to create booking: {e}"), ToolOutput::Error { error: e.0 }),
        Ok(summary) => {
            // the backend's echoed values are authoritative, not the input slots
            let text = format!(
                "Booking confirmed. Reference: {}. {} -> {} on {} at {}.",
                summary.booking_reference,
                summary.origin.as_deref().unwrap_or(""),
                summary.destination.as_deref().unwrap_or(""),
                summary.date.as_deref().unwrap_or(""),
                summary.time.as_deref().unwrap_or(""),
            );
            (text, ToolOutput::Booking(summary))
        }
    }
}

async fn handle_cancel(backend: &dyn ReservationBackend, slots: &SlotSet) -> (String, ToolOutput) {
    if slots.booking_reference.is_empty() {
        return (
            "I detected a cancel intent but could not find a booking reference. \
             Please provide your booking reference (e.g., BK-20250928-xxxx)."
                .to_string(),
            ToolOutput::Empty {},
        );
    }

    match backend.cancel(&slots.booking_reference).await {
        Err(e) => (format!("Failed to cancel booking: {e}"), ToolOutput::Error { error: e.0 }),
        Ok(summary) => (
            format!("Booking {} has been cancelled.", summary.booking_reference),
            ToolOutput::Booking(summary),
        ),
    }
}

async fn handle_reschedule(
    backend: &dyn ReservationBackend,
    slots: &SlotSet,
) -> (String, ToolOutput) {
    if slots.booking_reference.is_empty() {
        return (
            "I detected a reschedule request but could not find a booking reference. \
             Please give me your booking reference and the new date/time."
                .to_string(),
            ToolOutput::Empty {},
        );
    }
    if slots.date.is_empty() || slots.time.is_empty() {
        return (
            "Please provide the new date and time for your booking (YYYY-MM-DD and HH:MM).".to_string(),
            ToolOutput::Empty {},
        );
    }

    match backend
        .reschedule(&slots.booking_reference, &slots.date, &slots.time)
        .await
    {
        Err(e) => (
            format!("Failed to reschedule booking: {e}"),
            ToolOutput::Error { error: e.0 },
        ),
        Ok(summary) => (
            format!(
                "Booking {} rescheduled to {} at {}.",
                summary.booking_reference,
                summary.date.as_deref().unwrap_or(""),
                summary.time.as_deref().unwrap_or(""),
            ),
            ToolOutput::Booking(summary),
        ),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::models::{BackendError, BookingSummary, ToolResult};

    /// Counts calls and answers from canned state, so tests can assert that
    /// the missing-slot paths never reach the backend.
    #[derive(Default)]
    struct MockBackend {
        calls: AtomicUsize,
        fail_with: Option<&'static str>,
    }

    impl MockBackend {
        fn failing(message: &'static str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_with: Some(message),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn outcome(&self, summary: BookingSummary) -> ToolResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.fail_with {
                Some(message) => Err(BackendError(message.to_string())),
                None => Ok(summary),
            }
        }
    }

    /// Stands in for the completion service, always answering with one word.
    struct IntentLlm(&'static str);

    #[async_trait]
    impl CompletionProvider for IntentLlm {
        async fn complete(&self, _: &str, _: u32, _: f32) -> anyhow::Result<String> {
            Ok(self.0.to_string())
        }
    }

    #[async_trait]
    impl ReservationBackend for MockBackend {
        async fn book(
            &self,
            passenger_name: &str,
            origin: &str,
            destination: &str,
            date: &str,
            time: &str,
            _flight_class: &str,
        ) -> ToolResult {
            self.outcome(BookingSummary {
                booking_reference: "BK-20251001-deadbeef".to_string(),
                status: "CONFIRMED".to_string(),
                passenger_name: Some(passenger_name.to_string()),
                origin: Some(origin.to_string()),
                destination: Some(destination.to_string()),
                date: Some(date.to_string()),
                time: Some(time.to_string()),
            })
        }

        async fn cancel(&self, booking_reference: &str) -> ToolResult {
            self.outcome(BookingSummary {
                booking_reference: booking_reference.to_string(),
                status: "CANCELLED".to_string(),
                passenger_name: None,
                origin: None,
                destination: None,
                date: None,
                time: None,
            })
        }

        async fn reschedule(
            &self,
            booking_reference: &str,
            new_date: &str,
            new_time: &str,
        ) -> ToolResult {
            self.outcome(BookingSummary {
                booking_reference: booking_reference.to_string(),
                status: "RESCHEDULED".to_string(),
                passenger_name: None,
                origin: None,
                destination: None,
                date: Some(new_date.to_string()),
                time: Some(new_time.to_string()),
            })
        }
    }

    #[tokio::test]
    async fn test_book_happy_path() {
        let backend = MockBackend::default();
        let reply = handle_message(
            None,
            &backend,
            "Book flight for Vaishak S from BOM to BLR on 2025-10-10 at 10:30",
        )
        .await;

        assert_eq!(reply.intent, Intent::Book);
        assert_eq!(reply.slots.passenger_name, "Vaishak S");
        assert_eq!(reply.slots.origin, "BOM");
        assert_eq!(reply.slots.destination, "BLR");
        assert_eq!(reply.slots.date, "2025-10-10");
        assert_eq!(reply.slots.time, "10:30");
        assert!(reply.assistant_text.contains("Booking confirmed"));
        assert!(reply.assistant_text.contains("BK-20251001-deadbeef"));
        assert_eq!(backend.call_count(), 1);
    }

    #[tokio::test]
    async fn test_book_missing_slots_lists_all_and_skips_backend() {
        let backend = MockBackend::default();
        let reply = handle_message(None, &backend, "Book a flight").await;

        assert_eq!(reply.intent, Intent::Book);
        for name in ["passenger_name", "origin", "destination", "date", "time"] {
            assert!(reply.assistant_text.contains(name), "missing {name}");
        }
        assert!(reply.tool_output.is_empty());
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_cancel_happy_path() {
        // "booking" contains "book", so the keyword rules would call this a
        // book request; the completion-based classifier resolves it.
        let backend = MockBackend::default();
        let llm = IntentLlm("cancel");
        let reply = handle_message(
            Some(&llm),
            &backend,
            "Please cancel my booking BK-20250928-abc12345",
        )
        .await;

        assert_eq!(reply.intent, Intent::Cancel);
        assert_eq!(reply.slots.booking_reference, "BK-20250928-abc12345");
        assert_eq!(
            reply.assistant_text,
            "Booking BK-20250928-abc12345 has been cancelled."
        );
        assert_eq!(backend.call_count(), 1);
    }

    #[tokio::test]
    async fn test_cancel_without_reference_asks_for_it() {
        let backend = MockBackend::default();
        let reply = handle_message(None, &backend, "cancel my flight please").await;

        assert_eq!(reply.intent, Intent::Cancel);
        assert!(reply.assistant_text.contains("booking reference"));
        assert!(reply.tool_output.is_empty());
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_cancel_backend_error_surfaced_verbatim() {
        let backend = MockBackend::failing("Booking already cancelled");
        let llm = IntentLlm("cancel");
        let reply = handle_message(
            Some(&llm),
            &backend,
            "Please cancel my booking BK-20250928-abc12345",
        )
        .await;

        assert_eq!(
            reply.assistant_text,
            "Failed to cancel booking: Booking already cancelled"
        );
        match reply.tool_output {
            ToolOutput::Error { ref error } => assert_eq!(error, "Booking already cancelled"),
            ref other => panic!("expected error output, got {other:?}"),
        }
        assert_eq!(backend.call_count(), 1);
    }

    #[tokio::test]
    async fn test_reschedule_happy_path() {
        let backend = MockBackend::default();
        let reply = handle_message(
            None,
            &backend,
            "Reschedule BK-20250928-abc12345 to 2025-10-12 08:00",
        )
        .await;

        assert_eq!(reply.intent, Intent::Reschedule);
        assert_eq!(reply.slots.date, "2025-10-12");
        assert_eq!(reply.slots.time, "08:00");
        assert_eq!(
            reply.assistant_text,
            "Booking BK-20250928-abc12345 rescheduled to 2025-10-12 at 08:00."
        );
        assert_eq!(backend.call_count(), 1);
    }

    #[tokio::test]
    async fn test_reschedule_missing_reference_checked_first() {
        let backend = MockBackend::default();
        let reply = handle_message(None, &backend, "change my flight to 2025-10-12 08:00").await;

        assert_eq!(reply.intent, Intent::Reschedule);
        assert!(reply.assistant_text.contains("booking reference"));
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_reschedule_missing_time_asks_for_both() {
        let backend = MockBackend::default();
        let reply = handle_message(None, &backend, "change BK-20250928-abc12345 please").await;

        assert_eq!(reply.intent, Intent::Reschedule);
        assert!(reply.assistant_text.contains("new date and time"));
        assert!(reply.tool_output.is_empty());
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_unrelated_message_is_unknown() {
        let backend = MockBackend::default();
        let reply = handle_message(None, &backend, "What's the weather today?").await;

        assert_eq!(reply.intent, Intent::Unknown);
        assert!(reply.tool_output.is_empty());
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_same_text_yields_same_intent_and_slots() {
        let backend = MockBackend::default();
        let text = "Book flight for Vaishak S from BOM to BLR on 2025-10-10 at 10:30";
        let first = handle_message(None, &backend, text).await;
        let second = handle_message(None, &backend, text).await;

        assert_eq!(first.intent, second.intent);
        assert_eq!(first.slots, second.slots);
    }
}
