//! Final commit creation.

use tracing::info;

use crate::commit::message::format_commit_message;
use crate::error::{CommitError, InvalidArgument};
use crate::git::backend::GitBackend;

/// Turns a finalized title/description into a commit.
pub struct CommitExecutor<'a> {
    backend: &'a dyn GitBackend,
}

impl<'a> CommitExecutor<'a> {
    pub fn new(backend: &'a dyn GitBackend) -> Self {
        Self { backend }
    }

    /// Commit the staged changes. Returns the new commit id.
    ///
    /// Status is re-read here rather than reused from collection time, since
    /// the index may have changed while the user was reviewing the draft.
    /// An empty description is allowed.
    pub fn commit(&self, title: &str, description: &str) -> Result<String, CommitError> {
        if title.trim().is_empty() {
            return Err(InvalidArgument::EmptyTitle.into());
        }

        let changes = self.backend.list_changes()?;
        if !changes.iter().any(|c| c.status.is_staged()) {
            return Err(CommitError::NoChanges);
        }

        let message = format_commit_message(title, description);
        let id = self.backend.commit(&message)?;

        info!("Created commit {}", id);
        Ok(id)
    }
}
