//! User commands accepted while a draft is on screen.

use std::fmt;

/// Hint shown whenever the user is asked for an action.
pub const ACTION_HINT: &str = "(R)egenerate, (E)dit, (C)ommit[Enter], (D)iscard[Escape]";

/// One user command in the review loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    Regenerate,
    Edit,
    Commit,
    Discard,
    Invalid,
}

impl ReviewAction {
    /// Map a line of input to an action.
    ///
    /// Accepts the single-letter shortcuts and the full command words, case
    /// insensitive. An empty line confirms (commits).
    pub fn from_input(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "r" | "regenerate" => ReviewAction::Regenerate,
            "e" | "edit" => ReviewAction::Edit,
            "" | "c" | "commit" => ReviewAction::Commit,
            "d" | "discard" | "q" | "quit" | "abort" | "cancel" => ReviewAction::Discard,
            _ => ReviewAction::Invalid,
        }
    }

    /// Map a single typed character to an action.
    pub fn from_char(c: char) -> Self {
        match c.to_ascii_lowercase() {
            'r' => ReviewAction::Regenerate,
            'e' => ReviewAction::Edit,
            'c' | '\n' | '\r' => ReviewAction::Commit,
            'd' | '\u{1b}' => ReviewAction::Discard,
            _ => ReviewAction::Invalid,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewAction::Regenerate => "regenerate",
            ReviewAction::Edit => "edit",
            ReviewAction::Commit => "commit",
            ReviewAction::Discard => "discard",
            ReviewAction::Invalid => "invalid",
        }
    }
}

impl fmt::Display for ReviewAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
