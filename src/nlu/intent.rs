use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::Intent;
use crate::nlu::prompts;
use crate::services::llm::CompletionProvider;

static WORD_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+|\W+").unwrap());

/// Keyword classification in fixed priority order: a message containing both
/// "book" and "cancel" resolves to book. Total, never fails.
pub fn classify_rules(text: &str) -> Intent {
    let text = text.to_lowercase();
    if text.contains("book") || text.contains("reserve") {
        return Intent::Book;
    }
    if text.contains("cancel") {
        return Intent::Cancel;
    }
    if text.contains("reschedule") || text.contains("change") {
        return Intent::Reschedule;
    }
    Intent::Unknown
}

/// Asks the completion service for a one-word intent. Only the first token of
/// the reply is considered; anything unrecognized, an empty reply, or a
/// provider failure degrades to Unknown.
pub async fn classify_with_llm(llm: &dyn CompletionProvider, text: &str) -> Intent {
    let prompt = prompts::intent_prompt(text);
    let reply = match llm.complete(&prompt, 12, 0.0).await {
        Ok(reply) => reply,
        Err(e) => {
            tracing::warn!(error = %e, "intent completion failed, defaulting to unknown");
            return Intent::Unknown;
        }
    };

    let reply = reply.to_lowercase();
    let first = WORD_SPLIT_RE
        .split(reply.trim())
        .find(|t| !t.is_empty())
        .unwrap_or("");
    Intent::parse(first)
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
            anyhow::bail!("connection refused")
        }
    }

    #[test]
    fn test_rules_basic() {
        assert_eq!(classify_rules("I want to book a flight"), Intent::Book);
        assert_eq!(classify_rules("please RESERVE a seat"), Intent::Book);
        assert_eq!(classify_rules("cancel my ticket"), Intent::Cancel);
        assert_eq!(classify_rules("change my flight"), Intent::Reschedule);
        assert_eq!(classify_rules("what's the weather today?"), Intent::Unknown);
    }

    #[test]
    fn test_rules_priority_order() {
        // book wins over cancel, cancel wins over reschedule
        assert_eq!(classify_rules("cancel my booking"), Intent::Book);
        assert_eq!(classify_rules("cancel instead of rescheduling"), Intent::Cancel);
    }

    #[tokio::test]
    async fn test_llm_first_token_only() {
        assert_eq!(
            classify_with_llm(&FixedCompletion("Book."), "x").await,
            Intent::Book
        );
        assert_eq!(
            classify_with_llm(&FixedCompletion("cancel the booking"), "x").await,
            Intent::Cancel
        );
    }

    #[tokio::test]
    async fn test_llm_unrecognized_is_unknown() {
        assert_eq!(
            classify_with_llm(&FixedCompletion("I think you want to book"), "x").await,
            Intent::Unknown
        );
        assert_eq!(classify_with_llm(&FixedCompletion(""), "x").await, Intent::Unknown);
    }

    #[tokio::test]
    async fn test_llm_failure_is_unknown() {
        assert_eq!(classify_with_llm(&FailingCompletion, "x").await, Intent::Unknown);
    }
}
