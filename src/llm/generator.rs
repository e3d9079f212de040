//! The text-generation port and the draft pipeline built on it.

use async_trait::async_trait;
use tracing::debug;

use crate::commit::message::{CommitMessageDraft, parse_response};
use crate::commit::prompt::build_prompt;
use crate::error::{DraftError, GenerationError};

/// A backend that turns a prompt into raw completion text.
///
/// This abstraction allows mocking the remote service in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageGenerator: Send + Sync {
    /// Complete the prompt and return the backend's raw reply.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Build the prompt, call the backend once, and parse the reply.
pub async fn generate_draft(
    generator: &dyn MessageGenerator,
    patch_content: &str,
) -> Result<CommitMessageDraft, DraftError> {
    let prompt = build_prompt(patch_content)?;
    debug!("Commit prompt length: {} chars", prompt.len());

    let raw = generator.generate(&prompt).await?;
    debug!("Raw generation output: {}", raw);

    Ok(parse_response(&raw))
}
