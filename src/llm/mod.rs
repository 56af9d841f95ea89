//! LLM collaborator interface.
//!
//! The core never talks HTTP itself; it holds an `Arc<dyn LlmProvider>` and
//! always has a textual fallback when a call fails.

use async_trait::async_trait;

use crate::error::LlmError;

/// Collaborator that turns a message plus system prompt into reply text.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a conversational reply to `message` under `system_prompt`.
    async fn generate_reply(&self, message: &str, system_prompt: &str)
    -> Result<String, LlmError>;

    /// Model identifier, for logging.
    fn model_name(&self) -> &str;
}
