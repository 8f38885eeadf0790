//! Common test helpers for integration tests.
//!
//! # Note
//!
//! The `#![allow(dead_code)]` attribute is necessary because Rust compiles each
//! integration test file as a separate crate, and not every file uses every
//! helper.

#![allow(dead_code)]

use todo_browser::browser::{BrowserState, Event};
use todo_browser::domain::{TaskId, TaskRecord, UserId, UserRecord};

// =============================================================================
// Record Builders
// =============================================================================

pub fn task(id: u64, title: &str, completed: bool, owner: u64) -> TaskRecord {
    TaskRecord::new(TaskId::new(id), title, completed, UserId::new(owner))
}

/// Creates `count` tasks with ids `1..=count`, every other one completed.
pub fn numbered_tasks(count: u64) -> Vec<TaskRecord> {
    (1..=count)
        .map(|id| task(id, &format!("Task number {id}"), id % 2 == 0, id % 10 + 1))
        .collect()
}

/// The two-record store used throughout the examples.
pub fn milk_and_dog() -> Vec<TaskRecord> {
    vec![
        task(1, "Buy milk", false, 5),
        task(2, "Walk dog", true, 7),
    ]
}

pub fn user(id: u64, name: &str) -> UserRecord {
    let email = format!("{}@example.com", name.to_lowercase().replace(' ', "."));
    UserRecord::new(UserId::new(id), name, email)
}

// =============================================================================
// State Helpers
// =============================================================================

/// Creates a state that has completed loading `records`.
pub fn loaded_state(records: Vec<TaskRecord>) -> BrowserState {
    let mut state = BrowserState::default();
    state.handle(Event::LoadRequested);
    state.handle(Event::LoadCompleted(Ok(records)));
    state
}

/// Returns the ids on the current page.
pub fn page_ids(state: &BrowserState) -> Vec<u64> {
    state.current_page().iter().map(|record| record.id.get()).collect()
}
