//! Commit message drafting: change collection, prompt, reply parsing, commit.

pub mod collector;
pub mod executor;
pub mod message;
pub mod prompt;

pub use collector::ChangeCollector;
pub use executor::CommitExecutor;
pub use message::{CommitMessageDraft, format_commit_message, parse_response};
pub use prompt::{DESCRIPTION_LABEL, TITLE_LABEL, build_prompt};
