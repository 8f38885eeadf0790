//! Terminal input parsing.
//!
//! Each line is one command:
//!
//! | Line              | Action                                     |
//! |-------------------|--------------------------------------------|
//! | `search <text>`   | set the search text (empty text clears it) |
//! | `/<text>`         | shorthand for `search <text>`              |
//! | `sort`            | toggle the id sort                         |
//! | `page <n>`        | jump to page `n`                           |
//! | `next` / `prev`   | move one page                              |
//! | `view <task id>`  | look up the owner of a task on the page    |
//! | `retry`           | retry the failed load or user lookup       |
//! | `help`            | show this list                             |
//! | `quit`            | exit                                       |

use thiserror::Error;

use crate::browser::{BrowserState, Event};
use crate::domain::{DetailRequest, TaskId};

/// Help text printed for `help` and after input errors.
pub const HELP: &str = "\
Commands:
  search <text>    filter by id, title or status (empty text clears)
  /<text>          same as search
  sort             sort by id, toggling the direction
  page <n>         jump to page n
  next, prev       move one page forward or back
  view <task id>   show the owner of a task on the current page
  retry            retry a failed load or user lookup
  help             show this help
  quit             exit";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    /// Forward an event to the session.
    Dispatch(Event),
    Help,
    Quit,
}

/// Errors raised for lines that cannot be acted on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Unknown command '{0}'; type 'help' for a list")]
    UnknownCommand(String),

    #[error("'{command}' needs an argument: {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("'{value}' is not a valid {expected}")]
    InvalidNumber {
        expected: &'static str,
        value: String,
    },

    #[error("Task {0} is not on the current page")]
    NotOnPage(TaskId),
}

/// Parses one input line against the current state.
///
/// Blank lines yield `Ok(None)`. The `view` command resolves its task among
/// the records on the current page.
///
/// # Errors
///
/// Returns [`InputError`] for unknown commands, missing or malformed
/// arguments, and tasks that are not on the current page.
pub fn parse_line(line: &str, state: &BrowserState) -> Result<Option<UserAction>, InputError> {
    if let Some(text) = line.strip_prefix('/') {
        return Ok(Some(search(text)));
    }

    let trimmed = line.trim_start();
    if trimmed.trim_end().is_empty() {
        return Ok(None);
    }

    let (command, argument) = trimmed.split_once(' ').unwrap_or((trimmed.trim_end(), ""));

    let action = match command {
        "search" => search(argument),
        "sort" => UserAction::Dispatch(Event::SortToggled),
        "page" => {
            let page = parse_number(argument, "page", "a page number")?;
            let page = usize::try_from(page).map_err(|_| InputError::InvalidNumber {
                expected: "page number",
                value: argument.trim().to_string(),
            })?;
            UserAction::Dispatch(Event::PageSelected(page))
        }
        "next" => UserAction::Dispatch(Event::NextPage),
        "prev" | "previous" => UserAction::Dispatch(Event::PreviousPage),
        "view" => {
            let task_id = TaskId::new(parse_number(argument, "view", "a task id")?);
            let record = state
                .find_on_page(task_id)
                .ok_or(InputError::NotOnPage(task_id))?;
            UserAction::Dispatch(Event::DetailRequested(DetailRequest::for_task(record)))
        }
        "retry" => UserAction::Dispatch(Event::RetryRequested),
        "help" | "?" => UserAction::Help,
        "quit" | "exit" => UserAction::Quit,
        other => return Err(InputError::UnknownCommand(other.to_string())),
    };

    Ok(Some(action))
}

fn search(text: &str) -> UserAction {
    UserAction::Dispatch(Event::SearchChanged(text.to_string()))
}

fn parse_number(
    argument: &str,
    command: &'static str,
    expected: &'static str,
) -> Result<u64, InputError> {
    let argument = argument.trim();
    if argument.is_empty() {
        return Err(InputError::MissingArgument { command, expected });
    }
    argument.parse().map_err(|_| InputError::InvalidNumber {
        expected: if command == "page" { "page number" } else { "task id" },
        value: argument.to_string(),
    })
}

// =============================================================================
// Tests
// =============================================================================
