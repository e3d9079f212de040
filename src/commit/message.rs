//! Commit message drafts and parsing of the backend's reply.

use std::fmt;

use crate::commit::prompt::{DESCRIPTION_LABEL, TITLE_LABEL};

/// A title/description pair proposed by the backend or edited by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitMessageDraft {
    pub title: String,
    pub description: String,
}

impl CommitMessageDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Replace fields with the submitted values, keeping any left blank.
    pub fn edited(&self, title: &str, description: &str) -> Self {
        Self {
            title: keep_if_blank(title, &self.title),
            description: keep_if_blank(description, &self.description),
        }
    }

    /// Full commit message: title, blank line, description.
    pub fn format(&self) -> String {
        format_commit_message(&self.title, &self.description)
    }
}

impl fmt::Display for CommitMessageDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

fn keep_if_blank(submitted: &str, current: &str) -> String {
    if submitted.trim().is_empty() {
        current.to_string()
    } else {
        submitted.trim().to_string()
    }
}

/// Join title and description the way they are written to the commit.
pub fn format_commit_message(title: &str, description: &str) -> String {
    format!("{}\n\n{}", title.trim(), description.trim())
}

/// Split the backend's reply into a draft.
///
/// Never fails: a reply without the description label becomes a title-only
/// draft, and an empty reply becomes an empty draft. Whether the result is
/// usable is decided at commit time.
pub fn parse_response(raw: &str) -> CommitMessageDraft {
    let output = raw.trim();

    let (title_part, description) = match output.split_once(DESCRIPTION_LABEL) {
        Some((title_part, description)) => (title_part, description.trim()),
        None => (output, ""),
    };

    let title = title_part.replace(TITLE_LABEL, "");

    CommitMessageDraft::new(title.trim(), description)
}
