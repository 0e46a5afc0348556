use serde_json::Value;

use crate::models::SlotSet;
use crate::nlu::prompts;
use crate::services::llm::CompletionProvider;

/// Semantic slot extraction, used only when the pattern extractor found
/// nothing useful. Any provider failure or unparseable reply degrades to the
/// all-empty slot set; this path never raises.
pub async fn extract_with_llm(llm: &dyn CompletionProvider, text: &str) -> SlotSet {
    let prompt = prompts::slot_prompt(text);
    let reply = match llm.complete(&prompt, 300, 0.0).await {
        Ok(reply) => reply,
        Err(e) => {
            tracing::warn!(error = %e, "slot completion failed, returning empty slots");
            return SlotSet::default();
        }
    };

    match parse_slot_reply(&reply) {
        Some(slots) => slots,
        None => {
            tracing::warn!(reply = %reply, "failed to parse slot JSON from completion");
            SlotSet::default()
        }
    }
}

/// Takes the substring from the first `{` to the last `}` so surrounding
/// commentary or code fences are tolerated. Missing keys become "", null and
/// non-string values are coerced to strings.
fn parse_slot_reply(reply: &str) -> Option<SlotSet> {
    let raw = reply.trim().trim_matches('`').trim();
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end <= start {
        return None;
    }

    let parsed: Value = serde_json::from_str(&raw[start..=end]).ok()?;
    let obj = parsed.as_object()?;

    let field = |key: &str| -> String {
        match obj.get(key) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    };

    Some(SlotSet {
        passenger_name: field("passenger_name"),
        origin: field("origin"),
        destination: field("destination"),
        date: field("date"),
        time: field("time"),
        booking_reference: field("booking_reference"),
    })
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;

    struct FixedCompletion(&'static str);

    #[async_trait]
    impl CompletionProvider for FixedCompletion {
        async fn complete(&self, _: &str, _: u32, _: f32) -> anyhow::Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct FailingCompletion;

    #[async_trait]
    impl CompletionProvider for FailingCompletion {
        async fn complete(&self, _: &str, _: u32, _: f32) -> anyhow::Result<String> {
            anyhow::bail!("timed out")
        }
    }

    #[tokio::test]
    async fn test_plain_json() {
        let slots = extract_with_llm(
            &FixedCompletion(
                r#"{"passenger_name":"John Doe","origin":"BLR","destination":"DEL","date":"","time":"","booking_reference":"REF1234"}"#,
            ),
            "whatever",
        )
        .await;
        assert_eq!(slots.passenger_name, "John Doe");
        assert_eq!(slots.booking_reference, "REF1234");
        assert_eq!(slots.date, "");
    }

    #[tokio::test]
    async fn test_fenced_json_with_commentary() {
        let slots = extract_with_llm(
            &FixedCompletion(
                "Sure, here you go:\n```json\n{\"origin\":\"BOM\",\"destination\":\"BLR\"}\n```",
            ),
            "whatever",
        )
        .await;
        assert_eq!(slots.origin, "BOM");
        assert_eq!(slots.destination, "BLR");
        // missing keys are filled with empty strings
        assert_eq!(slots.passenger_name, "");
    }

    #[tokio::test]
    async fn test_null_coerced_to_empty() {
        let slots =
            extract_with_llm(&FixedCompletion(r#"{"passenger_name":null,"date":"2025-01-01"}"#), "x")
                .await;
        assert_eq!(slots.passenger_name, "");
        assert_eq!(slots.date, "2025-01-01");
    }

    #[tokio::test]
    async fn test_garbage_reply_degrades_to_empty() {
        let slots = extract_with_llm(&FixedCompletion("no json here"), "x").await;
        assert_eq!(slots, SlotSet::default());
    }

    #[tokio::test]
    async fn test_provider_failure_degrades_to_empty() {
        let slots = extract_with_llm(&FailingCompletion, "x").await;
        assert_eq!(slots, SlotSet::default());
    }
}
