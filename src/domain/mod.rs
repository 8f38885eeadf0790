//! Domain module for the task browser.
//!
//! This module contains the records retrieved from the collection service
//! and the detail projection derived from them.

pub mod detail;
pub mod task;
pub mod user;

pub use detail::{DetailProjection, DetailRequest};
pub use task::{TaskId, TaskRecord, UserId};
pub use user::UserRecord;
