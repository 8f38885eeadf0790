//! Explicit state container of the browser.
//!
//! Every user interaction and every I/O completion is an [`Event`]. The
//! single transition function [`BrowserState::handle`] applies it and
//! returns the [`Command`] to execute, if any. Commands only describe I/O;
//! the session runtime performs them and feeds the results back as events,
//! so the state is only ever mutated from one sequential event stream.

use crate::domain::{DetailProjection, DetailRequest, TaskId, TaskRecord};
use crate::infrastructure::FetchError;

use super::detail::{DetailOrdering, DetailSlot, RequestTicket};
use super::pagination::{PageBar, PaginationState};
use super::query::QueryPipeline;
use super::store::{LoadStatus, RecordStore};

// =============================================================================
// Events and Commands
// =============================================================================

/// Input to the state container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Start the one-time collection load (or retry a failed one).
    LoadRequested,
    /// The collection request finished.
    LoadCompleted(Result<Vec<TaskRecord>, FetchError>),
    /// New search text; resets to page 1.
    SearchChanged(String),
    /// Sort the current view by id and flip the direction.
    SortToggled,
    /// Jump to a page; clamped to the available pages.
    PageSelected(usize),
    NextPage,
    PreviousPage,
    /// Look up the owner of a task.
    DetailRequested(DetailRequest),
    /// Retry whatever failed last: the load, or else the detail lookup.
    RetryRequested,
    /// A detail lookup finished.
    DetailCompleted {
        ticket: RequestTicket,
        result: Result<DetailProjection, FetchError>,
    },
}

/// I/O requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Retrieve the full task collection.
    FetchTasks,
    /// Retrieve the user named by the ticket's request.
    FetchUser(RequestTicket),
}

// =============================================================================
// Browser State
// =============================================================================

/// Complete observable state of the browser.
#[derive(Debug, Clone, Default)]
pub struct BrowserState {
    store: RecordStore,
    load_status: LoadStatus,
    pipeline: QueryPipeline,
    pagination: PaginationState,
    detail: DetailSlot,
}

impl BrowserState {
    /// Creates a state whose detail slot uses `ordering`.
    #[must_use]
    pub fn with_ordering(ordering: DetailOrdering) -> Self {
        Self {
            detail: DetailSlot::new(ordering),
            ..Self::default()
        }
    }

    /// Applies one event and returns the command it requires.
    pub fn handle(&mut self, event: Event) -> Option<Command> {
        match event {
            Event::LoadRequested => self.request_load(),
            Event::LoadCompleted(result) => {
                self.complete_load(result);
                None
            }
            Event::SearchChanged(term) => {
                self.pipeline.apply_search(&term);
                self.pagination.reset();
                None
            }
            Event::SortToggled => {
                self.pipeline.toggle_sort();
                None
            }
            Event::PageSelected(page) => {
                self.pagination.go_to_clamped(page, self.pipeline.len());
                None
            }
            Event::NextPage => {
                self.pagination.next(self.pipeline.len());
                None
            }
            Event::PreviousPage => {
                self.pagination.previous();
                None
            }
            Event::DetailRequested(request) => {
                Some(Command::FetchUser(self.detail.begin(request)))
            }
            Event::RetryRequested => self.retry(),
            Event::DetailCompleted { ticket, result } => {
                self.detail.complete(ticket, result);
                None
            }
        }
    }

    fn request_load(&mut self) -> Option<Command> {
        if !self.load_status.accepts_load() {
            tracing::debug!(status = ?self.load_status, "Ignoring load request");
            return None;
        }

        self.load_status = LoadStatus::Loading;
        Some(Command::FetchTasks)
    }

    fn complete_load(&mut self, result: Result<Vec<TaskRecord>, FetchError>) {
        if self.load_status != LoadStatus::Loading {
            tracing::warn!(status = ?self.load_status, "Ignoring unexpected load completion");
            return;
        }

        match result {
            Ok(records) => {
                self.store.install(records);
                self.pipeline.reseed(self.store.records().clone());
                self.pagination.reset();
                self.load_status = LoadStatus::Loaded {
                    count: self.store.len(),
                };
            }
            Err(error) => {
                self.load_status = LoadStatus::Failed(error);
            }
        }
    }

    fn retry(&mut self) -> Option<Command> {
        if matches!(self.load_status, LoadStatus::Failed(_)) {
            return self.request_load();
        }

        let request = self.detail.failed_request().cloned()?;
        Some(Command::FetchUser(self.detail.begin(request)))
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[must_use]
    pub const fn store(&self) -> &RecordStore {
        &self.store
    }

    #[must_use]
    pub const fn load_status(&self) -> &LoadStatus {
        &self.load_status
    }

    #[must_use]
    pub const fn pipeline(&self) -> &QueryPipeline {
        &self.pipeline
    }

    #[must_use]
    pub const fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    #[must_use]
    pub const fn detail(&self) -> &DetailSlot {
        &self.detail
    }

    /// Returns the records on the current page of the derived view.
    #[must_use]
    pub fn current_page(&self) -> Vec<&TaskRecord> {
        self.pipeline.page(
            self.pagination.current_page(),
            self.pagination.page_size(),
        )
    }

    /// Returns the navigation controls for the derived view.
    #[must_use]
    pub fn page_bar(&self) -> PageBar {
        self.pagination.page_bar(self.pipeline.len())
    }

    /// Looks up a task among the records on the current page.
    #[must_use]
    pub fn find_on_page(&self, task_id: TaskId) -> Option<&TaskRecord> {
        self.current_page()
            .into_iter()
            .find(|record| record.id == task_id)
    }
}

// =============================================================================
// Tests
// =============================================================================
