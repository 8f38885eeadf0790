//! Fetch error taxonomy.

use thiserror::Error;

/// Error type for collection service requests.
///
/// Covers every way a list or single-entity retrieval can fail. All
/// variants are recoverable by retrying the request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Failed to reach the service or the transfer broke off.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Request timed out after the given number of milliseconds.
    #[error("Timeout after {0}ms")]
    Timeout(u64),

    /// Service answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// Response body was not the expected JSON shape.
    #[error("Malformed response: {0}")]
    Decode(String),
}

impl FetchError {
    /// Returns `true` when the service answered 404.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}
