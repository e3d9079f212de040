//! Blocking review loop over a presentation surface.

use std::io;

use tracing::info;

use crate::commit::executor::CommitExecutor;
use crate::commit::message::CommitMessageDraft;
use crate::error::ReviewError;
use crate::llm::generator::MessageGenerator;
use crate::review::action::{ACTION_HINT, ReviewAction};
use crate::review::session::{ReviewEvent, ReviewSession};

/// Where drafts are shown and user input comes from.
pub trait ReviewSurface {
    /// Present a draft to the user.
    fn show_draft(&mut self, draft: &CommitMessageDraft);

    /// Show a status or error line.
    fn notify(&mut self, message: &str);

    /// Block until the user picks an action.
    fn read_action(&mut self) -> io::Result<ReviewAction>;

    /// Ask for a replacement title and description. Blank answers keep the
    /// current values.
    fn read_edit(&mut self, current: &CommitMessageDraft) -> io::Result<(String, String)>;
}

/// How a review ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewOutcome {
    /// Nothing was staged; the loop never started.
    NoChanges,
    Committed {
        commit_id: String,
        draft: CommitMessageDraft,
    },
    Discarded,
}

/// Run the full review loop until the user commits or discards.
pub async fn run_review(
    patch_content: &str,
    generator: &dyn MessageGenerator,
    executor: &CommitExecutor<'_>,
    surface: &mut dyn ReviewSurface,
) -> Result<ReviewOutcome, ReviewError> {
    let mut session = ReviewSession::new(patch_content, generator, executor);
    let mut event = session.start().await?;

    loop {
        match event {
            ReviewEvent::NoRelevantChanges => {
                surface.notify("No relevant changes detected.");
                return Ok(ReviewOutcome::NoChanges);
            }
            ReviewEvent::DraftReady(draft) => surface.show_draft(&draft),
            ReviewEvent::GenerationFailed(err) => surface.notify(&format!(
                "Failed to generate a commit message: {err}. Choose (R)egenerate to try again or (D)iscard."
            )),
            ReviewEvent::EditRequested(current) => {
                let (title, description) =
                    surface.read_edit(&current).map_err(ReviewError::Input)?;
                event = session.apply_edit(&title, &description);
                continue;
            }
            ReviewEvent::CommitRejected(reason) => {
                surface.notify(&format!("Cannot commit: {reason}. Use (E)dit to fix the draft."))
            }
            ReviewEvent::Committed { commit_id, draft } => {
                info!("Review finished with commit {}", commit_id);
                surface.notify("Changes committed successfully.");
                return Ok(ReviewOutcome::Committed { commit_id, draft });
            }
            ReviewEvent::Discarded => {
                surface.notify("Changes discarded.");
                return Ok(ReviewOutcome::Discarded);
            }
            ReviewEvent::Invalid => surface.notify(&format!("Invalid input. {ACTION_HINT}")),
        }

        let action = surface.read_action().map_err(ReviewError::Input)?;
        event = session.submit(action).await?;
    }
}
