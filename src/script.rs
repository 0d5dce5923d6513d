//! Event scripts for the `run` command.
//!
//! One step per line. Blank lines and lines starting with `//` are skipped.
//!
//! ```text
//! #/posts          navigate to a fragment (any line starting with '#')
//! page 3           jump to listing page 3
//! open 12          open post 12
//! back             return to the listing
//! draft some text  replace the comment draft
//! submit           submit the draft
//! comment text     draft + submit in one step
//! like             increment the like counter
//! dislike          increment the dislike counter
//! ```

use crate::app::UserEvent;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ScriptError {
    #[error("line {line}: unknown command '{command}'")]
    UnknownCommand { line: usize, command: String },
    #[error("line {line}: '{command}' expects a number, got '{value}'")]
    BadNumber {
        line: usize,
        command: String,
        value: String,
    },
}

/// One parsed script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Navigate(String),
    Events(Vec<UserEvent>),
}

/// Parse a whole script.
pub fn parse(script: &str) -> Result<Vec<Step>, ScriptError> {
    let mut steps = Vec::new();
    for (idx, raw) in script.lines().enumerate() {
        if let Some(step) = parse_line(idx + 1, raw)? {
            steps.push(step);
        }
    }
    Ok(steps)
}

/// Parse one line. `line` is 1-based and only used in error messages.
pub fn parse_line(line: usize, raw: &str) -> Result<Option<Step>, ScriptError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with("//") {
        return Ok(None);
    }
    if trimmed.starts_with('#') {
        return Ok(Some(Step::Navigate(trimmed.to_string())));
    }

    let (command, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim_start()),
        None => (trimmed, ""),
    };

    let bad_number = |value: &str| ScriptError::BadNumber {
        line,
        command: command.to_string(),
        value: value.to_string(),
    };

    let events = match command {
        "page" => vec![UserEvent::GoToPage(
            rest.parse::<usize>().map_err(|_| bad_number(rest))?,
        )],
        "open" => vec![UserEvent::SelectPost(
            rest.parse::<u64>().map_err(|_| bad_number(rest))?,
        )],
        "back" => vec![UserEvent::Back],
        "draft" => vec![UserEvent::EditDraft(rest.to_string())],
        "submit" => vec![UserEvent::SubmitComment],
        "comment" => vec![
            UserEvent::EditDraft(rest.to_string()),
            UserEvent::SubmitComment,
        ],
        "like" => vec![UserEvent::Like],
        "dislike" => vec![UserEvent::Dislike],
        other => {
            return Err(ScriptError::UnknownCommand {
                line,
                command: other.to_string(),
            });
        }
    };
    Ok(Some(Step::Events(events)))
}
