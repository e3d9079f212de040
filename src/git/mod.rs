//! Git operations using git2-rs.

pub mod backend;
pub mod handle;
pub mod status;

pub use backend::{Git2Backend, GitBackend};
pub use handle::RepositoryHandle;
pub use status::{ChangeArea, ChangeEntry, ChangeFlag, ChangeKind, ChangeStatus};
