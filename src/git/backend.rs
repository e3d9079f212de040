//! Repository access behind a mockable trait, with a git2 implementation.

use git2::{DiffFormat, DiffOptions, ErrorCode, Repository, StatusOptions, Tree};
use tracing::debug;

use crate::error::RepositoryError;
use crate::git::handle::RepositoryHandle;
use crate::git::status::{ChangeEntry, ChangeStatus};

/// Repository operations the commit workflow depends on.
///
/// This abstraction allows swapping the git engine out in tests.
#[cfg_attr(test, mockall::automock)]
pub trait GitBackend: Send + Sync {
    /// List every changed file, staged or not, in status order.
    fn list_changes(&self) -> Result<Vec<ChangeEntry>, RepositoryError>;

    /// Diff of a single path between the HEAD tree and the index.
    fn diff(&self, path: &str) -> Result<String, RepositoryError>;

    /// Commit the current index with the given message. Returns the commit id.
    fn commit(&self, message: &str) -> Result<String, RepositoryError>;
}

/// Backend that talks to an on-disk repository through libgit2.
///
/// The repository is reopened on every call so each read reflects the
/// current on-disk state, even after the user has spent time reviewing.
pub struct Git2Backend {
    handle: RepositoryHandle,
}

impl Git2Backend {
    pub fn new(handle: RepositoryHandle) -> Self {
        Self { handle }
    }

    fn open(&self) -> Result<Repository, RepositoryError> {
        Repository::open(self.handle.root()).map_err(|source| RepositoryError::Open {
            path: self.handle.root().display().to_string(),
            source,
        })
    }
}

impl GitBackend for Git2Backend {
    fn list_changes(&self) -> Result<Vec<ChangeEntry>, RepositoryError> {
        let repo = self.open()?;

        let mut opts = StatusOptions::new();
        opts.include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false)
            .renames_head_to_index(true);

        let statuses = repo
            .statuses(Some(&mut opts))
            .map_err(RepositoryError::Status)?;

        let mut entries = Vec::with_capacity(statuses.len());
        for entry in statuses.iter() {
            let status = ChangeStatus::from_git2(entry.status());
            if status.is_empty() {
                continue;
            }

            // Renames report the old path; the index knows the file by its new one.
            let path = entry
                .head_to_index()
                .and_then(|d| d.new_file().path().map(|p| p.to_string_lossy().to_string()))
                .or_else(|| entry.path().map(str::to_string));

            match path {
                Some(path) => entries.push(ChangeEntry::new(path, status)),
                None => debug!("Skipping status entry with non-UTF-8 path"),
            }
        }

        Ok(entries)
    }

    fn diff(&self, path: &str) -> Result<String, RepositoryError> {
        let repo = self.open()?;
        let diff_err = |source| RepositoryError::Diff {
            path: path.to_string(),
            source,
        };

        let head_tree = resolve_head_tree(&repo).map_err(diff_err)?;

        let mut opts = DiffOptions::new();
        opts.pathspec(path).disable_pathspec_match(true);

        let diff = repo
            .diff_tree_to_index(head_tree.as_ref(), None, Some(&mut opts))
            .map_err(diff_err)?;

        let mut text = String::new();
        diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
            let origin = line.origin();
            if origin == '+' || origin == '-' || origin == ' ' {
                text.push(origin);
            }
            text.push_str(&String::from_utf8_lossy(line.content()));
            true
        })
        .map_err(diff_err)?;

        Ok(text)
    }

    fn commit(&self, message: &str) -> Result<String, RepositoryError> {
        let repo = self.open()?;

        let sig = repo.signature().map_err(RepositoryError::Signature)?;

        let mut index = repo.index().map_err(RepositoryError::Commit)?;
        let tree_id = index.write_tree().map_err(RepositoryError::Commit)?;
        let tree = repo.find_tree(tree_id).map_err(RepositoryError::Commit)?;

        let parent = match repo.head() {
            Ok(head) => Some(head.peel_to_commit().map_err(RepositoryError::Commit)?),
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                None
            }
            Err(e) => return Err(RepositoryError::Commit(e)),
        };
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        let oid = repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .map_err(RepositoryError::Commit)?;

        Ok(oid.to_string())
    }
}

/// Resolve the HEAD tree, treating an unborn branch as "no tree yet".
fn resolve_head_tree(repo: &Repository) -> Result<Option<Tree<'_>>, git2::Error> {
    let head_ref = match repo.head() {
        Ok(r) => r,
        Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    head_ref.peel_to_tree().map(Some)
}
