//! gitscribe - AI-assisted commit messages for staged changes.
//!
//! # Overview
//!
//! gitscribe collects the diff of everything staged in a repository, asks a
//! text-generation backend for a commit title and description, and lets the
//! user regenerate, edit, commit, or discard the draft.
//!
//! The pieces can be used separately:
//! - [`commit::ChangeCollector`] builds the patch document from staged files.
//! - [`llm::generate_draft`] turns a patch into a [`CommitMessageDraft`].
//! - [`review::ReviewSession`] is the state machine a host drives with
//!   [`ReviewAction`]s; [`review::run_review`] drives it over a console.
//! - [`commit::CommitExecutor`] writes the final commit.

pub mod commit;
pub mod error;
pub mod git;
pub mod llm;
pub mod review;

// Re-export commonly used types
pub use commit::{ChangeCollector, CommitExecutor, CommitMessageDraft};
pub use error::{
    CommitError, ConfigError, DraftError, GenerationError, InvalidArgument, RepositoryError,
    ReviewError,
};
pub use git::{ChangeEntry, ChangeStatus, Git2Backend, GitBackend, RepositoryHandle};
pub use llm::{AzureOpenAiClient, GenerationConfig, MessageGenerator};
pub use review::{ReviewAction, ReviewOutcome, ReviewSession, ReviewState};
