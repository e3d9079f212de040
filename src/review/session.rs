//! The review state machine.
//!
//! A [`ReviewSession`] owns one patch document and the current draft. The host
//! feeds it [`ReviewAction`]s (and edit values) and renders the returned
//! [`ReviewEvent`]s however it likes, so the same logic serves a console, a
//! GUI, or a remote caller.
//!
//! ```text
//! Initial ──start/Regenerate──▶ Presenting ──Edit──▶ Editing
//!    │                          │  ▲   ▲                │
//!    │                          │  │   └──apply_edit────┘
//!    │                          │  └──Regenerate / Invalid / rejected commit
//!    │                          ├──Commit──▶ Committed
//!    └──────────Discard─────────┴──Discard─▶ Discarded
//!
//! Initial ──start with a blank patch──▶ NoChanges
//! ```

use tracing::{debug, warn};

use crate::commit::executor::CommitExecutor;
use crate::commit::message::CommitMessageDraft;
use crate::error::{CommitError, DraftError, GenerationError, InvalidArgument, ReviewError};
use crate::llm::generator::{MessageGenerator, generate_draft};
use crate::review::action::ReviewAction;

/// Where a review session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewState {
    /// No draft yet, either not started or the first generation failed.
    Initial,
    /// A draft is on screen and the session waits for an action.
    Presenting,
    /// Waiting for replacement title/description values.
    Editing,
    /// The patch was blank; the loop never started.
    NoChanges,
    Committed,
    Discarded,
}

impl ReviewState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ReviewState::NoChanges | ReviewState::Committed | ReviewState::Discarded
        )
    }
}

/// What the host should show after a step.
#[derive(Debug)]
pub enum ReviewEvent {
    /// The patch was blank; nothing to review.
    NoRelevantChanges,
    /// A new or edited draft is ready to present.
    DraftReady(CommitMessageDraft),
    /// The backend call failed. The previous draft, if any, is kept.
    GenerationFailed(GenerationError),
    /// The host should collect replacement values and call `apply_edit`.
    EditRequested(CommitMessageDraft),
    /// The draft cannot be committed as is.
    CommitRejected(InvalidArgument),
    Committed {
        commit_id: String,
        draft: CommitMessageDraft,
    },
    Discarded,
    /// The action does not apply in the current state. Nothing changed.
    Invalid,
}

/// One interactive review of a patch document.
pub struct ReviewSession<'a> {
    patch: String,
    generator: &'a dyn MessageGenerator,
    executor: &'a CommitExecutor<'a>,
    state: ReviewState,
    draft: Option<CommitMessageDraft>,
}

impl<'a> ReviewSession<'a> {
    pub fn new(
        patch: impl Into<String>,
        generator: &'a dyn MessageGenerator,
        executor: &'a CommitExecutor<'a>,
    ) -> Self {
        Self {
            patch: patch.into(),
            generator,
            executor,
            state: ReviewState::Initial,
            draft: None,
        }
    }

    pub fn state(&self) -> ReviewState {
        self.state
    }

    pub fn draft(&self) -> Option<&CommitMessageDraft> {
        self.draft.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_terminal()
    }

    /// Produce the first draft.
    ///
    /// A blank patch short-circuits with [`ReviewEvent::NoRelevantChanges`],
    /// the backend is never called, and the session is finished.
    pub async fn start(&mut self) -> Result<ReviewEvent, ReviewError> {
        if self.state != ReviewState::Initial || self.draft.is_some() {
            return Ok(ReviewEvent::Invalid);
        }
        self.generate().await
    }

    /// Apply one user command.
    ///
    /// Generation failures and blank-title commits are reported as events and
    /// leave the session usable. Any other commit failure (nothing staged,
    /// repository error) is returned as an error and ends the invocation.
    pub async fn submit(&mut self, action: ReviewAction) -> Result<ReviewEvent, ReviewError> {
        debug!("Review action {} in state {:?}", action, self.state);

        match (self.state, action) {
            (
                ReviewState::NoChanges
                | ReviewState::Committed
                | ReviewState::Discarded
                | ReviewState::Editing,
                _,
            ) => {
                Ok(ReviewEvent::Invalid)
            }
            (_, ReviewAction::Invalid) => Ok(ReviewEvent::Invalid),
            (_, ReviewAction::Regenerate) => self.generate().await,
            (_, ReviewAction::Discard) => {
                self.state = ReviewState::Discarded;
                Ok(ReviewEvent::Discarded)
            }
            (ReviewState::Initial, ReviewAction::Edit | ReviewAction::Commit) => {
                Ok(ReviewEvent::Invalid)
            }
            (ReviewState::Presenting, ReviewAction::Edit) => match &self.draft {
                Some(draft) => {
                    self.state = ReviewState::Editing;
                    Ok(ReviewEvent::EditRequested(draft.clone()))
                }
                None => Ok(ReviewEvent::Invalid),
            },
            (ReviewState::Presenting, ReviewAction::Commit) => self.commit(),
        }
    }

    /// Replace the draft's fields. Blank values keep the current field.
    pub fn apply_edit(&mut self, title: &str, description: &str) -> ReviewEvent {
        if self.state != ReviewState::Editing {
            return ReviewEvent::Invalid;
        }

        let edited = self
            .draft
            .as_ref()
            .map(|d| d.edited(title, description))
            .unwrap_or_else(|| CommitMessageDraft::default().edited(title, description));

        self.draft = Some(edited.clone());
        self.state = ReviewState::Presenting;
        ReviewEvent::DraftReady(edited)
    }

    /// Generate from the original patch, never from the edited draft.
    async fn generate(&mut self) -> Result<ReviewEvent, ReviewError> {
        if self.patch.trim().is_empty() {
            self.state = ReviewState::NoChanges;
            return Ok(ReviewEvent::NoRelevantChanges);
        }

        match generate_draft(self.generator, &self.patch).await {
            Ok(draft) => {
                self.draft = Some(draft.clone());
                self.state = ReviewState::Presenting;
                Ok(ReviewEvent::DraftReady(draft))
            }
            Err(DraftError::Generation(err)) => {
                warn!("Commit message generation failed: {}", err);
                Ok(ReviewEvent::GenerationFailed(err))
            }
            Err(DraftError::InvalidArgument(err)) => Err(err.into()),
        }
    }

    fn commit(&mut self) -> Result<ReviewEvent, ReviewError> {
        let Some(draft) = self.draft.clone() else {
            return Ok(ReviewEvent::Invalid);
        };

        match self.executor.commit(&draft.title, &draft.description) {
            Ok(commit_id) => {
                self.state = ReviewState::Committed;
                Ok(ReviewEvent::Committed { commit_id, draft })
            }
            Err(CommitError::InvalidArgument(reason)) => Ok(ReviewEvent::CommitRejected(reason)),
            Err(err) => Err(err.into()),
        }
    }
}
