//! Interactive review of generated commit messages.

pub mod action;
pub mod driver;
pub mod session;
pub mod terminal;

pub use action::{ACTION_HINT, ReviewAction};
pub use driver::{ReviewOutcome, ReviewSurface, run_review};
pub use session::{ReviewEvent, ReviewSession, ReviewState};
pub use terminal::ConsoleSurface;
