//! Integration tests for the HTTP collection source.
//!
//! Each test starts a fake collection service with axum on an ephemeral
//! local port.

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use rstest::rstest;
use serde_json::{Value, json};
use tokio::net::TcpListener;

use todo_browser::browser::{DetailOrdering, Event, LoadStatus, Session};
use todo_browser::domain::{TaskId, UserId};
use todo_browser::infrastructure::{CollectionSource, FetchError, HttpCollectionSource};

// =============================================================================
// Fake Collection Service
// =============================================================================

async fn todos() -> axum::Json<Value> {
    axum::Json(json!([
        { "userId": 5, "id": 1, "title": "Buy milk", "completed": false },
        { "userId": 7, "id": 2, "title": "Walk dog", "completed": true }
    ]))
}

async fn user(Path(id): Path<u64>) -> Result<axum::Json<Value>, StatusCode> {
    if id == 7 {
        Ok(axum::Json(json!({
            "id": 7,
            "name": "Kurtis Weissnat",
            "username": "Elwyn.Skiles",
            "email": "Telly.Hoeger@billy.biz",
            "address": { "city": "Howemouth" }
        })))
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}

async fn server_error() -> impl IntoResponse {
    (StatusCode::INTERNAL_SERVER_ERROR, "boom")
}

async fn not_json() -> impl IntoResponse {
    "<html>definitely not json</html>"
}

async fn wrong_shape() -> axum::Json<Value> {
    axum::Json(json!({ "todos": [] }))
}

async fn slow() -> axum::Json<Value> {
    tokio::time::sleep(Duration::from_secs(5)).await;
    axum::Json(json!([]))
}

fn healthy_service() -> Router {
    Router::new()
        .route("/todos", get(todos))
        .route("/users/{id}", get(user))
}

/// Serves `router` on `127.0.0.1:0` and returns its base URL.
async fn spawn_service(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{address}")
}

fn source_for(base_url: &str) -> HttpCollectionSource {
    HttpCollectionSource::new(base_url, Duration::from_secs(5))
}

// =============================================================================
// Successful Requests
// =============================================================================

#[rstest]
#[tokio::test]
async fn test_fetch_tasks_decodes_wire_format() {
    let base_url = spawn_service(healthy_service()).await;

    let tasks = source_for(&base_url).fetch_tasks().await.unwrap();

    assert_eq!(tasks, common::milk_and_dog());
}

#[rstest]
#[tokio::test]
async fn test_fetch_user_ignores_extra_fields() {
    let base_url = spawn_service(healthy_service()).await;

    let user = source_for(&format!("{base_url}/")).fetch_user(UserId::new(7)).await.unwrap();

    assert_eq!(user.id, UserId::new(7));
    assert_eq!(user.name, "Kurtis Weissnat");
    assert_eq!(user.email, "Telly.Hoeger@billy.biz");
}

// =============================================================================
// Failures
// =============================================================================

#[rstest]
#[tokio::test]
async fn test_unknown_user_is_status_error() {
    let base_url = spawn_service(healthy_service()).await;

    let error = source_for(&base_url)
        .fetch_user(UserId::new(99))
        .await
        .unwrap_err();

    assert_eq!(
        error,
        FetchError::Status {
            status: 404,
            url: format!("{base_url}/users/99"),
        }
    );
    assert!(error.is_not_found());
}

#[rstest]
#[tokio::test]
async fn test_server_error_is_status_error() {
    let base_url = spawn_service(Router::new().route("/todos", get(server_error))).await;

    let error = source_for(&base_url).fetch_tasks().await.unwrap_err();

    assert!(matches!(error, FetchError::Status { status: 500, .. }));
}

#[rstest]
#[case::not_json(Router::new().route("/todos", get(not_json)))]
#[case::wrong_shape(Router::new().route("/todos", get(wrong_shape)))]
#[tokio::test]
async fn test_malformed_body_is_decode_error(#[case] router: Router) {
    let base_url = spawn_service(router).await;

    let error = source_for(&base_url).fetch_tasks().await.unwrap_err();

    assert!(matches!(error, FetchError::Decode(_)), "got {error:?}");
}

#[rstest]
#[tokio::test]
async fn test_slow_service_times_out() {
    let base_url = spawn_service(Router::new().route("/todos", get(slow))).await;
    let source = HttpCollectionSource::new(&base_url, Duration::from_millis(100));

    let error = source.fetch_tasks().await.unwrap_err();

    assert_eq!(error, FetchError::Timeout(100));
}

#[rstest]
#[tokio::test]
async fn test_unreachable_service_is_connection_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    let error = source_for(&format!("http://{address}"))
        .fetch_tasks()
        .await
        .unwrap_err();

    assert!(matches!(error, FetchError::Connection(_)), "got {error:?}");
}

// =============================================================================
// End to End
// =============================================================================

#[rstest]
#[tokio::test]
async fn test_session_over_http() {
    let base_url = spawn_service(healthy_service()).await;
    let mut session = Session::new(Arc::new(source_for(&base_url)), DetailOrdering::default());

    session.dispatch(Event::LoadRequested);
    session.settle().await;
    assert_eq!(session.state().load_status(), &LoadStatus::Loaded { count: 2 });

    session.dispatch(Event::SearchChanged("DOG".to_string()));
    let task = session.state().find_on_page(TaskId::new(2)).cloned().unwrap();
    session.dispatch(Event::DetailRequested(
        todo_browser::domain::DetailRequest::for_task(&task),
    ));
    session.settle().await;

    let projection = session.state().detail().projection().unwrap();
    assert_eq!(projection.source_task_title, "Walk dog");
    assert_eq!(projection.user_name, "Kurtis Weissnat");
}
