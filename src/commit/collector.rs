//! Staged-change collection into a single patch document.

use tracing::debug;

use crate::error::RepositoryError;
use crate::git::backend::GitBackend;
use crate::git::status::ChangeEntry;

/// Gathers the diff text of everything that would go into the next commit.
pub struct ChangeCollector<'a> {
    backend: &'a dyn GitBackend,
}

impl<'a> ChangeCollector<'a> {
    pub fn new(backend: &'a dyn GitBackend) -> Self {
        Self { backend }
    }

    /// Concatenate the diffs of all staged files, in status order.
    ///
    /// A file qualifies when any of its flags is in the index area, so a file
    /// that is both staged and further edited in the working tree is included.
    /// Worktree-only changes are skipped. Returns an empty string when nothing
    /// is staged.
    pub fn collect_patch_content(&self) -> Result<String, RepositoryError> {
        let entries = self.backend.list_changes()?;
        let staged: Vec<&ChangeEntry> = entries.iter().filter(|e| e.status.is_staged()).collect();

        debug!(
            "Status reported {} changed file(s), {} staged",
            entries.len(),
            staged.len()
        );

        let mut patch = String::new();
        for entry in staged {
            debug!("Collecting diff for {} [{}]", entry.path, entry.status);
            let diff = self.backend.diff(&entry.path)?;
            patch.push_str(&diff);
            patch.push('\n');
        }

        Ok(patch)
    }
}
