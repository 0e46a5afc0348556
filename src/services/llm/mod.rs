pub mod openai;

use async_trait::async_trait;

/// Narrow interface over an opaque text-completion service. Implementations
/// are fallible and non-deterministic; callers degrade on error instead of
/// propagating it to the user.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(
        &self,
        prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> anyhow::Result<String>;
}
