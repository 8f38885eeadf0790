//! Detail resolver: on-demand owner lookup for a task.
//!
//! A lookup is split in two halves so the I/O can run outside the state
//! container:
//!
//! 1. [`DetailSlot::begin`] issues a sequence-numbered [`RequestTicket`];
//! 2. [`DetailResolver::resolve`] performs `GET /users/{id}` and builds the
//!    projection;
//! 3. [`DetailSlot::complete`] reconciles the result with the slot.
//!
//! Two lookups may complete in either order. With
//! [`DetailOrdering::LastCompleted`] every completion is applied as it
//! arrives, so the last one to complete wins. With
//! [`DetailOrdering::LatestRequested`] only the most recently issued ticket
//! may touch the slot and earlier completions are dropped.

use std::collections::BTreeSet;
use std::str::FromStr;
use std::sync::Arc;

use crate::domain::{DetailProjection, DetailRequest};
use crate::infrastructure::{CollectionSource, FetchError};

// =============================================================================
// Detail Ordering
// =============================================================================

/// Policy for reconciling out-of-order detail completions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DetailOrdering {
    /// Apply every completion in completion order.
    #[default]
    LastCompleted,
    /// Apply only the completion of the latest issued request.
    LatestRequested,
}

impl FromStr for DetailOrdering {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "last_completed" => Ok(Self::LastCompleted),
            "latest_requested" => Ok(Self::LatestRequested),
            other => Err(format!(
                "expected 'last_completed' or 'latest_requested', got '{other}'"
            )),
        }
    }
}

impl std::fmt::Display for DetailOrdering {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LastCompleted => write!(formatter, "last_completed"),
            Self::LatestRequested => write!(formatter, "latest_requested"),
        }
    }
}

// =============================================================================
// Detail Resolver
// =============================================================================

/// Performs user lookups against a collection source.
#[derive(Clone)]
pub struct DetailResolver {
    source: Arc<dyn CollectionSource>,
}

impl DetailResolver {
    #[must_use]
    pub fn new(source: Arc<dyn CollectionSource>) -> Self {
        Self { source }
    }

    /// Looks up the requested user and combines it with the task fields.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the user request fails.
    pub async fn resolve(&self, request: &DetailRequest) -> Result<DetailProjection, FetchError> {
        let user = self.source.fetch_user(request.user_id).await?;

        if user.id != request.user_id {
            tracing::warn!(
                requested = %request.user_id,
                returned = %user.id,
                "User lookup returned a different id"
            );
        }

        Ok(DetailProjection::combine(request, user))
    }
}

// =============================================================================
// Request Ticket
// =============================================================================

/// Handle of an issued detail request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    /// Monotonically increasing, starting at 1.
    pub sequence: u64,
    pub request: DetailRequest,
}

// =============================================================================
// Detail Slot
// =============================================================================

/// What a completion did to the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailOutcome {
    /// The projection was replaced.
    Applied,
    /// The lookup failed; the previous projection is kept.
    Failed,
    /// The completion was dropped without touching the slot.
    Discarded,
}

/// Externally visible state of the slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailStatus {
    /// Nothing requested yet.
    Idle,
    /// A lookup that can still affect the slot is in flight; `outstanding`
    /// counts every unfinished lookup.
    Pending { outstanding: usize },
    /// The last applied completion failed.
    Failed(FetchError),
    /// A projection is available and nothing is pending.
    Ready,
}

/// Single-slot holder of the current detail projection.
#[derive(Debug, Clone, Default)]
pub struct DetailSlot {
    ordering: DetailOrdering,
    projection: Option<DetailProjection>,
    error: Option<FetchError>,
    failed_request: Option<DetailRequest>,
    issued: u64,
    outstanding: BTreeSet<u64>,
}

impl DetailSlot {
    #[must_use]
    pub fn new(ordering: DetailOrdering) -> Self {
        Self {
            ordering,
            ..Self::default()
        }
    }

    /// Issues a ticket for a new lookup.
    ///
    /// Any previously recorded error is cleared; the projection is kept
    /// until a completion replaces it.
    pub fn begin(&mut self, request: DetailRequest) -> RequestTicket {
        self.issued += 1;
        self.outstanding.insert(self.issued);
        self.error = None;
        self.failed_request = None;

        tracing::debug!(
            sequence = self.issued,
            user_id = %request.user_id,
            task_id = %request.task_id,
            "Detail lookup issued"
        );

        RequestTicket {
            sequence: self.issued,
            request,
        }
    }

    /// Reconciles a finished lookup with the slot.
    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        result: Result<DetailProjection, FetchError>,
    ) -> DetailOutcome {
        if !self.outstanding.remove(&ticket.sequence) {
            tracing::warn!(sequence = ticket.sequence, "Completion for unknown detail ticket");
            return DetailOutcome::Discarded;
        }

        if self.ordering == DetailOrdering::LatestRequested && ticket.sequence != self.issued {
            tracing::debug!(
                sequence = ticket.sequence,
                latest = self.issued,
                "Discarding stale detail completion"
            );
            return DetailOutcome::Discarded;
        }

        match result {
            Ok(projection) => {
                self.projection = Some(projection);
                self.error = None;
                self.failed_request = None;
                DetailOutcome::Applied
            }
            Err(error) => {
                tracing::warn!(
                    %error,
                    user_id = %ticket.request.user_id,
                    "Detail lookup failed"
                );
                self.error = Some(error);
                self.failed_request = Some(ticket.request);
                DetailOutcome::Failed
            }
        }
    }

    /// Returns the current projection, if any.
    #[must_use]
    pub const fn projection(&self) -> Option<&DetailProjection> {
        self.projection.as_ref()
    }

    /// Returns the error of the last applied completion, if it failed.
    #[must_use]
    pub const fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    /// Returns the request whose failure is currently shown, for retrying.
    #[must_use]
    pub const fn failed_request(&self) -> Option<&DetailRequest> {
        self.failed_request.as_ref()
    }

    #[must_use]
    pub const fn ordering(&self) -> DetailOrdering {
        self.ordering
    }

    /// Returns `true` while a lookup that can still change the slot is in flight.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        match self.ordering {
            DetailOrdering::LastCompleted => !self.outstanding.is_empty(),
            DetailOrdering::LatestRequested => self.outstanding.contains(&self.issued),
        }
    }

    #[must_use]
    pub fn status(&self) -> DetailStatus {
        if self.is_pending() {
            DetailStatus::Pending {
                outstanding: self.outstanding.len(),
            }
        } else if let Some(error) = &self.error {
            DetailStatus::Failed(error.clone())
        } else if self.projection.is_some() {
            DetailStatus::Ready
        } else {
            DetailStatus::Idle
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
