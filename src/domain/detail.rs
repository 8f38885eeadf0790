//! Detail projection combining a task with its owning user.

use serde::{Deserialize, Serialize};

use super::task::{TaskId, TaskRecord, UserId};
use super::user::UserRecord;

// =============================================================================
// Detail Request
// =============================================================================

/// The task fields a detail lookup is issued for.
///
/// Captured at request time so the projection reflects the task the user
/// clicked, independent of whatever the view shows when the lookup completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRequest {
    /// User to look up.
    pub user_id: UserId,
    /// Originating task.
    pub task_id: TaskId,
    /// Title of the originating task.
    pub task_title: String,
}

impl DetailRequest {
    #[must_use]
    pub fn new(user_id: UserId, task_id: TaskId, task_title: impl Into<String>) -> Self {
        Self {
            user_id,
            task_id,
            task_title: task_title.into(),
        }
    }

    /// Builds the request for a task's owner.
    #[must_use]
    pub fn for_task(task: &TaskRecord) -> Self {
        Self::new(task.owner_id, task.id, task.title.clone())
    }
}

// =============================================================================
// Detail Projection
// =============================================================================

/// Task and user fields shown together in the detail panel.
///
/// A projection is replaced wholesale by each successful lookup; no history
/// is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailProjection {
    pub source_task_id: TaskId,
    pub source_task_title: String,
    pub user_id: UserId,
    pub user_name: String,
    pub user_email: String,
}

impl DetailProjection {
    /// Combines the requested task fields with the retrieved user.
    ///
    /// The user fields come from the retrieved record, including its id.
    #[must_use]
    pub fn combine(request: &DetailRequest, user: UserRecord) -> Self {
        Self {
            source_task_id: request.task_id,
            source_task_title: request.task_title.clone(),
            user_id: user.id,
            user_name: user.name,
            user_email: user.email,
        }
    }
}
