//! Task record domain model.
//!
//! Task records are retrieved once from the collection service and never
//! mutated afterwards.

use serde::{Deserialize, Serialize};

// =============================================================================
// Value Objects - Newtypes
// =============================================================================

/// Unique identifier for a task record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw numeric identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Identifier of the user owning a task.
///
/// Acts as a foreign key into the user collection; it is not checked
/// locally and only used to build the user lookup path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw numeric identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

// =============================================================================
// TaskRecord
// =============================================================================

/// Word a completed task is searchable by.
pub const COMPLETED_WORD: &str = "completed";

/// Word an open task is searchable by.
pub const PENDING_WORD: &str = "pending";

/// A task record as served by `GET /todos`.
///
/// The owner field travels as `userId` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: TaskId,
    pub title: String,
    pub completed: bool,
    #[serde(rename = "userId")]
    pub owner_id: UserId,
}

impl TaskRecord {
    #[must_use]
    pub fn new(id: TaskId, title: impl Into<String>, completed: bool, owner_id: UserId) -> Self {
        Self {
            id,
            title: title.into(),
            completed,
            owner_id,
        }
    }

    /// Returns the lowercase status word used for searching.
    #[must_use]
    pub const fn status_word(&self) -> &'static str {
        if self.completed {
            COMPLETED_WORD
        } else {
            PENDING_WORD
        }
    }

    /// Returns the capitalized status label used for display.
    #[must_use]
    pub const fn status_label(&self) -> &'static str {
        if self.completed {
            "Completed"
        } else {
            "Pending"
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
