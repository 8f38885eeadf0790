//! Query pipeline: search filtering and id ordering over the record store.
//!
//! The pipeline keeps the derived view as positions into the shared store
//! contents, so the view is always a subset or permutation of the store.
//!
//! # Ordering composition
//!
//! Search and sort are last-applied-wins operations on the same view, but
//! they are not symmetric:
//!
//! - a search always re-derives from the store in store order, discarding
//!   any sort applied before it;
//! - a sort reorders the current view only, keeping the current filter.

use std::cmp::Reverse;
use std::sync::Arc;

use crate::domain::{TaskId, TaskRecord};

use super::pagination::current_slice;

// =============================================================================
// Query State
// =============================================================================

/// Direction of the id ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// Returns the opposite direction.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Header marker for the id column.
    #[must_use]
    pub const fn arrow(self) -> char {
        match self {
            Self::Ascending => '▲',
            Self::Descending => '▼',
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ascending => write!(formatter, "ascending"),
            Self::Descending => write!(formatter, "descending"),
        }
    }
}

/// User-controlled query inputs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryState {
    /// Lowercased search term; empty means no filter.
    pub search_term: String,
    /// Direction the next sort toggle applies.
    pub sort_direction: SortDirection,
}

// =============================================================================
// Search Predicate
// =============================================================================

/// Normalizes raw search input.
///
/// Only case is folded; whitespace is significant.
#[must_use]
pub fn normalize_term(raw: &str) -> String {
    raw.to_lowercase()
}

/// Returns `true` if `record` matches an already normalized term.
///
/// A record matches when the term is a substring of its decimal id, of its
/// lowercased title, or of its status word (`completed` / `pending`). The
/// empty term matches every record.
#[must_use]
pub fn matches_search(record: &TaskRecord, normalized_term: &str) -> bool {
    normalized_term.is_empty()
        || record.id.get().to_string().contains(normalized_term)
        || record.title.to_lowercase().contains(normalized_term)
        || record.status_word().contains(normalized_term)
}

// =============================================================================
// Query Pipeline
// =============================================================================

/// Derives the ordered, filtered view of the record store.
#[derive(Debug, Clone)]
pub struct QueryPipeline {
    records: Arc<[TaskRecord]>,
    view: Vec<usize>,
    state: QueryState,
    applied_sort: Option<SortDirection>,
}

impl Default for QueryPipeline {
    fn default() -> Self {
        Self::new(Arc::from(Vec::new()))
    }
}

impl QueryPipeline {
    /// Creates a pipeline whose view is the whole store in store order.
    #[must_use]
    pub fn new(records: Arc<[TaskRecord]>) -> Self {
        let view = (0..records.len()).collect();
        Self {
            records,
            view,
            state: QueryState::default(),
            applied_sort: None,
        }
    }

    /// Installs new store contents and re-derives the view from the
    /// current search term.
    ///
    /// The sort direction flag is kept; any visible sort order is not.
    pub fn reseed(&mut self, records: Arc<[TaskRecord]>) {
        self.records = records;
        self.view = self.derive(&self.state.search_term);
        self.applied_sort = None;
    }

    /// Applies a search term.
    ///
    /// The view becomes every store record matching the lowercased term,
    /// in store order. Any previously applied sort is discarded.
    pub fn apply_search(&mut self, term: &str) {
        let normalized = normalize_term(term);
        self.view = self.derive(&normalized);
        self.state.search_term = normalized;
        self.applied_sort = None;
    }

    /// Sorts the current view by id and flips the stored direction.
    ///
    /// The first toggle sorts ascending. Only the current view is
    /// reordered; the filter is left as is.
    pub fn toggle_sort(&mut self) {
        let direction = self.state.sort_direction;
        let records = &self.records;

        match direction {
            SortDirection::Ascending => self.view.sort_by_key(|&position| records[position].id),
            SortDirection::Descending => self
                .view
                .sort_by_key(|&position| Reverse(records[position].id)),
        }

        self.applied_sort = Some(direction);
        self.state.sort_direction = direction.flipped();
    }

    fn derive(&self, normalized_term: &str) -> Vec<usize> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, record)| matches_search(record, normalized_term))
            .map(|(position, _)| position)
            .collect()
    }

    /// Returns the current query inputs.
    #[must_use]
    pub const fn state(&self) -> &QueryState {
        &self.state
    }

    /// Direction of the order currently visible, if the view is sorted.
    #[must_use]
    pub const fn applied_sort(&self) -> Option<SortDirection> {
        self.applied_sort
    }

    /// Number of records in the derived view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.view.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.view.is_empty()
    }

    /// Iterates the derived view in order.
    pub fn view(&self) -> impl ExactSizeIterator<Item = &TaskRecord> + '_ {
        self.view.iter().map(|&position| &self.records[position])
    }

    /// Returns the ids of the derived view in order.
    #[must_use]
    pub fn view_ids(&self) -> Vec<TaskId> {
        self.view().map(|record| record.id).collect()
    }

    /// Returns the records on a 1-based page of the derived view.
    #[must_use]
    pub fn page(&self, page: usize, page_size: usize) -> Vec<&TaskRecord> {
        current_slice(&self.view, page, page_size)
            .iter()
            .map(|&position| &self.records[position])
            .collect()
    }
}

// =============================================================================
// Tests
// =============================================================================
