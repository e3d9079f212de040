//! Error types for gitscribe modules using thiserror.

use thiserror::Error;

/// Errors from validating the generation backend configuration.
///
/// Raised at construction time, before any request is attempted.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Generation backend setting '{0}' cannot be empty")]
    MissingField(&'static str),

    #[error("Invalid generation endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Errors from reading or writing the repository.
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Failed to open repository at {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: git2::Error,
    },

    #[error("Failed to read repository status: {0}")]
    Status(#[source] git2::Error),

    #[error("Failed to collect diff for '{path}': {source}")]
    Diff {
        path: String,
        #[source]
        source: git2::Error,
    },

    #[error("Git config error (missing user.name or user.email): {0}")]
    Signature(#[source] git2::Error),

    #[error("Failed to create commit: {0}")]
    Commit(#[source] git2::Error),
}

/// Errors from the text-generation backend.
///
/// These never abort a review session: the user may regenerate or discard.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Generation request timed out after {0} seconds")]
    Timeout(u64),

    #[error("Generation backend rejected the credentials: {0}")]
    Unauthorized(String),

    #[error("Generation backend quota exceeded: {0}")]
    RateLimited(String),

    #[error("Generation backend returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Generation request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Generation backend returned an unreadable response: {0}")]
    InvalidResponse(String),

    #[error("Generation backend returned no content")]
    EmptyResponse,
}

/// A caller passed a value the operation cannot work with.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidArgument {
    #[error("Patch content cannot be empty")]
    EmptyPatch,

    #[error("Commit title cannot be empty")]
    EmptyTitle,
}

/// Why a draft could not be produced.
#[derive(Error, Debug)]
pub enum DraftError {
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

/// Errors from creating the final commit.
#[derive(Error, Debug)]
pub enum CommitError {
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),

    #[error("There are no staged changes to commit")]
    NoChanges,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Errors that end a review session.
///
/// Generation failures are not here: the session reports them and keeps going.
#[derive(Error, Debug)]
pub enum ReviewError {
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),

    #[error(transparent)]
    Commit(#[from] CommitError),

    #[error("Failed to read user input: {0}")]
    Input(#[source] std::io::Error),
}
