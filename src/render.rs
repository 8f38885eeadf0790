//! Plain-text rendering of the browser state.
//!
//! [`Screen`] formats the task list (table and pagination bar) followed by
//! the user detail panel:
//!
//! ```text
//! Todo List
//! Search: dog
//! ID ▲    Title                                      Status
//! ------  -----------------------------------------  ---------
//! 2       Walk dog                                   Completed
//! ----  [1]  ----        (page 1 of 1, 1 task)
//!
//! User Detail
//! No user selected
//! ```

use std::fmt::{self, Display, Formatter};

use crate::browser::{BrowserState, DetailSlot, DetailStatus, LoadStatus, PageBar};
use crate::domain::{DetailProjection, TaskRecord};

const ID_WIDTH: usize = 6;
const TITLE_WIDTH: usize = 41;
const STATUS_WIDTH: usize = 9;

/// Displays a complete screen for a [`BrowserState`].
pub struct Screen<'a> {
    state: &'a BrowserState,
}

impl<'a> Screen<'a> {
    #[must_use]
    pub const fn new(state: &'a BrowserState) -> Self {
        Self { state }
    }
}

impl Display for Screen<'_> {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        writeln!(formatter, "Todo List")?;
        write_task_list(formatter, self.state)?;
        writeln!(formatter)?;
        writeln!(formatter, "User Detail")?;
        write_detail(formatter, self.state.detail())
    }
}

// =============================================================================
// Task List
// =============================================================================

fn write_task_list(formatter: &mut Formatter<'_>, state: &BrowserState) -> fmt::Result {
    match state.load_status() {
        LoadStatus::NotStarted => return writeln!(formatter, "Tasks have not been loaded."),
        LoadStatus::Loading => return writeln!(formatter, "Loading tasks..."),
        LoadStatus::Failed(error) => {
            return writeln!(
                formatter,
                "Could not load tasks: {error}. Type 'retry' to try again."
            );
        }
        LoadStatus::Loaded { .. } => {}
    }

    let query = state.pipeline().state();
    if query.search_term.is_empty() {
        writeln!(formatter, "Search: (none)")?;
    } else {
        writeln!(formatter, "Search: {}", query.search_term)?;
    }

    let id_header = format!("ID {}", query.sort_direction.arrow());
    writeln!(
        formatter,
        "{id_header:<ID_WIDTH$}  {:<TITLE_WIDTH$}  Status",
        "Title"
    )?;
    writeln!(
        formatter,
        "{}  {}  {}",
        "-".repeat(ID_WIDTH),
        "-".repeat(TITLE_WIDTH),
        "-".repeat(STATUS_WIDTH)
    )?;

    let page = state.current_page();
    if page.is_empty() {
        writeln!(formatter, "No matching tasks.")?;
    }
    for record in page {
        write_row(formatter, record)?;
    }

    let total = state.pipeline().len();
    let bar = state.page_bar();
    writeln!(
        formatter,
        "{}        ({})",
        format_page_bar(&bar),
        summary(&bar, total)
    )
}

fn write_row(formatter: &mut Formatter<'_>, record: &TaskRecord) -> fmt::Result {
    writeln!(
        formatter,
        "{:<ID_WIDTH$}  {:<TITLE_WIDTH$}  {}",
        record.id.get(),
        truncate(&record.title, TITLE_WIDTH),
        record.status_label()
    )
}

/// Shortens `text` to at most `width` characters, marking the cut with `…`.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{kept}…")
}

/// Formats the navigation controls; disabled controls are dashed out.
#[must_use]
pub fn format_page_bar(bar: &PageBar) -> String {
    let previous = if bar.previous_enabled { "Prev" } else { "----" };
    let next = if bar.next_enabled { "Next" } else { "----" };
    let pages: Vec<String> = bar
        .pages
        .iter()
        .map(|&page| {
            if page == bar.active {
                format!("[{page}]")
            } else {
                page.to_string()
            }
        })
        .collect();

    if pages.is_empty() {
        format!("{previous}  {next}")
    } else {
        format!("{previous}  {}  {next}", pages.join(" "))
    }
}

fn summary(bar: &PageBar, total: usize) -> String {
    let noun = if total == 1 { "task" } else { "tasks" };
    format!(
        "page {} of {}, {total} {noun}",
        bar.active,
        bar.pages.len().max(1)
    )
}

// =============================================================================
// Detail Panel
// =============================================================================

fn write_detail(formatter: &mut Formatter<'_>, slot: &DetailSlot) -> fmt::Result {
    match slot.status() {
        DetailStatus::Pending { .. } => writeln!(formatter, "Looking up user...")?,
        DetailStatus::Failed(error) => writeln!(
            formatter,
            "User lookup failed: {error}. Type 'retry' to try again."
        )?,
        DetailStatus::Idle | DetailStatus::Ready => {}
    }

    match slot.projection() {
        Some(projection) => write_projection(formatter, projection),
        None => writeln!(formatter, "No user selected"),
    }
}

fn write_projection(formatter: &mut Formatter<'_>, projection: &DetailProjection) -> fmt::Result {
    writeln!(formatter, "Todo ID:    {}", projection.source_task_id)?;
    writeln!(formatter, "Todo Title: {}", projection.source_task_title)?;
    writeln!(formatter, "User ID:    {}", projection.user_id)?;
    writeln!(formatter, "User Name:  {}", projection.user_name)?;
    writeln!(formatter, "Email:      {}", projection.user_email)
}

// =============================================================================
// Tests
// =============================================================================
