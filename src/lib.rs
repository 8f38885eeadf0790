//! # todo-browser
//!
//! A client-side browser for a remote collection of task records.
//!
//! The collection is fetched once, then searched, sorted by id and paged
//! entirely in memory. Selecting a task looks up its owning user on demand
//! and combines both into a single detail projection.
//!
//! ## Layout
//!
//! - [`domain`]: task, user and detail projection types
//! - [`infrastructure`]: the remote collection source, fetch errors and configuration
//! - [`browser`]: record store, query pipeline, pagination, detail resolver and
//!   the event-driven state container with its session runtime
//! - [`render`] and [`input`]: the plain-text front end used by the binary
//!
//! ## Example
//!
//! ```rust
//! use todo_browser::browser::{BrowserState, Event};
//! use todo_browser::domain::{TaskId, TaskRecord, UserId};
//!
//! let mut state = BrowserState::default();
//! state.handle(Event::LoadRequested);
//! state.handle(Event::LoadCompleted(Ok(vec![
//!     TaskRecord::new(TaskId::new(1), "Buy milk", false, UserId::new(5)),
//!     TaskRecord::new(TaskId::new(2), "Walk dog", true, UserId::new(7)),
//! ])));
//! state.handle(Event::SearchChanged("dog".to_string()));
//!
//! let page: Vec<u64> = state.current_page().iter().map(|task| task.id.get()).collect();
//! assert_eq!(page, vec![2]);
//! ```

pub mod browser;
pub mod domain;
pub mod infrastructure;
pub mod input;
pub mod render;
