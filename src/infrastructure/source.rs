//! Collection source implementations.
//!
//! This module provides the trait the browser uses to reach the remote
//! collection service, an HTTP implementation backed by `reqwest`, and a
//! stub for tests.
//!
//! Only two request shapes are consumed:
//!
//! - `GET {base_url}/todos` for the full task list
//! - `GET {base_url}/users/{id}` for a single user

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt};
use serde::de::DeserializeOwned;

use super::error::FetchError;
use crate::domain::{TaskRecord, UserId, UserRecord};

// =============================================================================
// Collection Source Trait
// =============================================================================

/// Trait for the remote collection service.
///
/// Futures are boxed so sources can be shared as
/// `Arc<dyn CollectionSource>` and driven from spawned tasks.
pub trait CollectionSource: Send + Sync {
    /// Retrieves the complete task collection.
    fn fetch_tasks(&self) -> BoxFuture<'_, Result<Vec<TaskRecord>, FetchError>>;

    /// Retrieves a single user by identifier.
    fn fetch_user(&self, user_id: UserId) -> BoxFuture<'_, Result<UserRecord, FetchError>>;

    /// Returns the source name for logging.
    fn source_name(&self) -> &'static str;
}

// =============================================================================
// HTTP Collection Source
// =============================================================================

/// HTTP-based collection source.
pub struct HttpCollectionSource {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpCollectionSource {
    /// Creates a new HTTP collection source.
    ///
    /// Trailing `/` characters on `base_url` are stripped so paths can be
    /// appended uniformly.
    #[must_use]
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    /// Returns the base URL requests are issued against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn tasks_url(&self) -> String {
        format!("{}/todos", self.base_url)
    }

    fn user_url(&self, user_id: UserId) -> String {
        format!("{}/users/{user_id}", self.base_url)
    }
}

impl CollectionSource for HttpCollectionSource {
    fn fetch_tasks(&self) -> BoxFuture<'_, Result<Vec<TaskRecord>, FetchError>> {
        execute_get(&self.client, self.tasks_url(), self.timeout).boxed()
    }

    fn fetch_user(&self, user_id: UserId) -> BoxFuture<'_, Result<UserRecord, FetchError>> {
        execute_get(&self.client, self.user_url(user_id), self.timeout).boxed()
    }

    fn source_name(&self) -> &'static str {
        "http"
    }
}

/// Executes a GET request and decodes the JSON body.
///
/// Non-success statuses are reported before the body is read, so a 404
/// with an HTML body surfaces as [`FetchError::Status`] rather than a
/// decode failure.
async fn execute_get<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: String,
    timeout: Duration,
) -> Result<T, FetchError> {
    let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);

    tracing::debug!(%url, "Requesting collection resource");

    let response = client
        .get(&url)
        .timeout(timeout)
        .send()
        .await
        .map_err(|error| transport_error(&error, timeout_ms))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            status: status.as_u16(),
            url,
        });
    }

    let body = response
        .bytes()
        .await
        .map_err(|error| transport_error(&error, timeout_ms))?;

    serde_json::from_slice(&body).map_err(|error| FetchError::Decode(error.to_string()))
}

fn transport_error(error: &reqwest::Error, timeout_ms: u64) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout(timeout_ms)
    } else {
        FetchError::Connection(error.to_string())
    }
}

// =============================================================================
// Stub Collection Source (for testing)
// =============================================================================

#[derive(Clone)]
struct StubUser {
    result: Result<UserRecord, FetchError>,
    delay: Duration,
}

/// Stub collection source for testing.
///
/// Returns fixed results without performing real I/O. User lookups can be
/// delayed individually, which lets tests force completions out of order
/// under a paused tokio clock. Unknown users answer with a 404 status.
#[derive(Clone)]
pub struct StubCollectionSource {
    tasks: Result<Vec<TaskRecord>, FetchError>,
    users: HashMap<UserId, StubUser>,
    task_requests: Arc<AtomicUsize>,
    user_requests: Arc<AtomicUsize>,
}

impl StubCollectionSource {
    /// Creates a stub serving the given task list and no users.
    #[must_use]
    pub fn with_tasks(tasks: Vec<TaskRecord>) -> Self {
        Self {
            tasks: Ok(tasks),
            users: HashMap::new(),
            task_requests: Arc::new(AtomicUsize::new(0)),
            user_requests: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Creates a stub whose task list request fails.
    #[must_use]
    pub fn failing_tasks(error: FetchError) -> Self {
        Self {
            tasks: Err(error),
            ..Self::with_tasks(Vec::new())
        }
    }

    /// Replaces the task list result.
    #[must_use]
    pub fn tasks_result(self, tasks: Result<Vec<TaskRecord>, FetchError>) -> Self {
        Self { tasks, ..self }
    }

    /// Adds a user answered immediately.
    #[must_use]
    pub fn user(self, user: UserRecord) -> Self {
        self.delayed_user(user, Duration::ZERO)
    }

    /// Adds a user answered after `delay`.
    #[must_use]
    pub fn delayed_user(mut self, user: UserRecord, delay: Duration) -> Self {
        self.users.insert(
            user.id,
            StubUser {
                result: Ok(user),
                delay,
            },
        );
        self
    }

    /// Makes lookups of `user_id` fail with `error` after `delay`.
    #[must_use]
    pub fn failing_user(mut self, user_id: UserId, error: FetchError, delay: Duration) -> Self {
        self.users.insert(
            user_id,
            StubUser {
                result: Err(error),
                delay,
            },
        );
        self
    }

    /// Number of task list requests served so far.
    #[must_use]
    pub fn task_requests(&self) -> usize {
        self.task_requests.load(Ordering::SeqCst)
    }

    /// Number of user requests served so far.
    #[must_use]
    pub fn user_requests(&self) -> usize {
        self.user_requests.load(Ordering::SeqCst)
    }
}

impl CollectionSource for StubCollectionSource {
    fn fetch_tasks(&self) -> BoxFuture<'_, Result<Vec<TaskRecord>, FetchError>> {
        self.task_requests.fetch_add(1, Ordering::SeqCst);
        let result = self.tasks.clone();
        async move { result }.boxed()
    }

    fn fetch_user(&self, user_id: UserId) -> BoxFuture<'_, Result<UserRecord, FetchError>> {
        self.user_requests.fetch_add(1, Ordering::SeqCst);
        let entry = self.users.get(&user_id).cloned();
        async move {
            match entry {
                Some(StubUser { result, delay }) => {
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    result
                }
                None => Err(FetchError::Status {
                    status: 404,
                    url: format!("stub://users/{user_id}"),
                }),
            }
        }
        .boxed()
    }

    fn source_name(&self) -> &'static str {
        "stub"
    }
}

// =============================================================================
// Tests
// =============================================================================
