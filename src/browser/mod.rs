//! The browser core.
//!
//! - [`store`]: the one-time loaded record store
//! - [`query`]: search and id ordering producing the derived view
//! - [`pagination`]: fixed-size pages over the derived view
//! - [`detail`]: on-demand owner lookup and the detail slot
//! - [`state`]: the event-driven state container tying them together
//! - [`session`]: executes the container's commands on tokio

pub mod detail;
pub mod pagination;
pub mod query;
pub mod session;
pub mod state;
pub mod store;

pub use detail::{
    DetailOrdering, DetailOutcome, DetailResolver, DetailSlot, DetailStatus, RequestTicket,
};
pub use pagination::{PAGE_SIZE, PageBar, PaginationState, current_slice, page_count};
pub use query::{QueryPipeline, QueryState, SortDirection, matches_search, normalize_term};
pub use session::Session;
pub use state::{BrowserState, Command, Event};
pub use store::{LoadStatus, RecordStore};
