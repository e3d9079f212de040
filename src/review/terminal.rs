//! Terminal surface: single-keystroke actions and line prompts for edits.
//!
//! When stdout is not a terminal (piped, redirected, CI) keystrokes cannot be
//! read, so actions and edits are read as lines from stdin instead.

use std::io::{self, BufRead, BufReader};

use console::{Key, Term};
use dialoguer::Input;

use crate::commit::message::CommitMessageDraft;
use crate::review::action::{ACTION_HINT, ReviewAction};
use crate::review::driver::ReviewSurface;

/// Map a keystroke to an action: r, e, c/Enter, d/Escape.
pub fn action_for_key(key: &Key) -> ReviewAction {
    match key {
        Key::Enter => ReviewAction::Commit,
        Key::Escape => ReviewAction::Discard,
        Key::Char(c) => ReviewAction::from_char(*c),
        _ => ReviewAction::Invalid,
    }
}

/// Review surface on the user's terminal.
pub struct ConsoleSurface {
    term: Term,
    label: Option<String>,
    /// Set when input is read line by line instead of by keystroke.
    lines: Option<Box<dyn BufRead>>,
}

impl ConsoleSurface {
    pub fn new() -> Self {
        let term = Term::stdout();
        let lines: Option<Box<dyn BufRead>> = if term.is_term() {
            None
        } else {
            Some(Box::new(BufReader::new(io::stdin())))
        };

        Self {
            term,
            label: None,
            lines,
        }
    }

    /// Read actions and edits as lines from `input`.
    pub fn with_line_input(mut self, input: impl BufRead + 'static) -> Self {
        self.lines = Some(Box::new(input));
        self
    }

    /// Show the repository name in the preview header.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl Default for ConsoleSurface {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a draft the way the console shows it.
pub fn render_preview(draft: &CommitMessageDraft, label: Option<&str>) -> String {
    let header = match label {
        Some(label) => format!("---- Commit Preview ({label}) ----"),
        None => "---- Commit Preview ----".to_string(),
    };
    let footer = "-".repeat(header.chars().count());

    format!(
        "{header}\nTitle:\n {}\nDescription:\n {}\n{footer}",
        draft.title,
        draft.description.replace('\n', "\n ")
    )
}

impl ReviewSurface for ConsoleSurface {
    fn show_draft(&mut self, draft: &CommitMessageDraft) {
        println!("{}", render_preview(draft, self.label.as_deref()));
    }

    fn notify(&mut self, message: &str) {
        println!("{}", message);
    }

    fn read_action(&mut self) -> io::Result<ReviewAction> {
        self.term
            .write_line(&format!("Choose an action: {ACTION_HINT}"))?;

        if let Some(lines) = self.lines.as_mut() {
            let line = read_line(&mut **lines)?;
            return Ok(ReviewAction::from_input(&line));
        }

        let key = self.term.read_key()?;
        Ok(action_for_key(&key))
    }

    fn read_edit(&mut self, current: &CommitMessageDraft) -> io::Result<(String, String)> {
        if let Some(lines) = self.lines.as_mut() {
            self.term.write_line(&format!(
                "Enter new commit title (blank keeps: {})",
                current.title
            ))?;
            let title = read_line(&mut **lines)?;
            self.term.write_line(&format!(
                "Enter new commit description (blank keeps: {})",
                current.description
            ))?;
            let description = read_line(&mut **lines)?;
            return Ok((title, description));
        }

        let title: String = Input::new()
            .with_prompt(format!(
                "Enter new commit title (blank keeps: {})",
                current.title
            ))
            .allow_empty(true)
            .interact_text_on(&self.term)
            .map_err(io::Error::other)?;

        let description: String = Input::new()
            .with_prompt(format!(
                "Enter new commit description (blank keeps: {})",
                current.description
            ))
            .allow_empty(true)
            .interact_text_on(&self.term)
            .map_err(io::Error::other)?;

        Ok((title, description))
    }
}

/// Read one line without its terminator. End of input is an error so the
/// review loop stops instead of spinning.
fn read_line(input: &mut dyn BufRead) -> io::Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input closed before the review finished",
        ));
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
