//! User record domain model.

use serde::{Deserialize, Serialize};

use super::task::UserId;

/// A user as served by `GET /users/{id}`.
///
/// Only the fields the detail panel needs are kept; everything else the
/// service returns (address, phone, company, ...) is ignored on decode.
/// User records are transient: they are never cached or collected, and
/// only live long enough to build a [`DetailProjection`](super::DetailProjection).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl UserRecord {
    #[must_use]
    pub fn new(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }
}
