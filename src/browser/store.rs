//! Record store holding the full task collection.
//!
//! The store is populated once from `GET /todos` and is read-only
//! afterwards. Contents are shared with the query pipeline as an
//! `Arc<[TaskRecord]>`, so derived views never copy or own records.

use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::{TaskId, TaskRecord};
use crate::infrastructure::{CollectionSource, FetchError};

// =============================================================================
// Load Status
// =============================================================================

/// Progress of the one-time collection load.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    /// No load has been requested yet.
    #[default]
    NotStarted,
    /// A load request is in flight.
    Loading,
    /// The store holds `count` records.
    Loaded { count: usize },
    /// The last load attempt failed; the store is empty.
    Failed(FetchError),
}

impl LoadStatus {
    /// Returns `true` if a new load may be issued.
    #[must_use]
    pub const fn accepts_load(&self) -> bool {
        matches!(self, Self::NotStarted | Self::Failed(_))
    }
}

// =============================================================================
// Record Store
// =============================================================================

#[derive(Debug, Clone)]
pub struct RecordStore {
    records: Arc<[TaskRecord]>,
    loaded: bool,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore {
    /// Creates an empty, not yet loaded store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Arc::from(Vec::new()),
            loaded: false,
        }
    }

    /// Retrieves the full task collection from `source`.
    ///
    /// This only performs the request; the result is installed with
    /// [`RecordStore::install`] once it is delivered back to the state
    /// container.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the request or decoding fails.
    pub async fn load(source: &dyn CollectionSource) -> Result<Vec<TaskRecord>, FetchError> {
        tracing::debug!(source = source.source_name(), "Loading task collection");

        match source.fetch_tasks().await {
            Ok(records) => {
                tracing::info!(count = records.len(), "Task collection loaded");
                Ok(records)
            }
            Err(error) => {
                tracing::warn!(%error, "Task collection load failed");
                Err(error)
            }
        }
    }

    /// Installs a freshly loaded collection.
    ///
    /// All records replace the (empty) contents at once. Returns `false`
    /// and leaves the store untouched if it was already populated.
    pub fn install(&mut self, records: Vec<TaskRecord>) -> bool {
        if self.loaded {
            tracing::warn!("Ignoring task collection for an already loaded store");
            return false;
        }

        let mut seen = HashSet::with_capacity(records.len());
        let duplicates = records
            .iter()
            .filter(|record| !seen.insert(record.id))
            .count();
        if duplicates > 0 {
            tracing::warn!(duplicates, "Task collection contains duplicate ids");
        }

        self.records = Arc::from(records);
        self.loaded = true;
        true
    }

    /// Returns the shared record list in store order.
    #[must_use]
    pub const fn records(&self) -> &Arc<[TaskRecord]> {
        &self.records
    }

    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Looks up a record by id.
    #[must_use]
    pub fn find(&self, task_id: TaskId) -> Option<&TaskRecord> {
        self.records.iter().find(|record| record.id == task_id)
    }
}

// =============================================================================
// Tests
// =============================================================================
