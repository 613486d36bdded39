//! Request client behaviour over real HTTP

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::Value;

use library_client::{
    api::RequestOptions,
    error::ClientError,
    models::{BookQuery, FineStatus, Role},
    storage::MemoryStore,
};

use crate::support::{app_state, spawn_backend, unreachable_base_url, RecordingNavigator};

#[tokio::test]
async fn test_not_found_carries_backend_message() {
    let backend = spawn_backend().await;
    let state = app_state(&backend.base_url, Arc::new(MemoryStore::new()), Arc::default());

    let err = state.api.get_book(42).await.unwrap_err();
    match err {
        ClientError::RequestFailed { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Book not found");
        }
        other => panic!("expected RequestFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_get_book_decodes_payload() {
    let backend = spawn_backend().await;
    let state = app_state(&backend.base_url, Arc::new(MemoryStore::new()), Arc::default());

    let book = state.api.get_book(1).await.unwrap().book;
    assert_eq!(book.title, "Dune");
    assert!(book.is_available());
    assert_eq!(backend.log.last().uri, "/api/books/1");
}

#[tokio::test]
async fn test_empty_or_missing_error_field_uses_generic_message() {
    let backend = spawn_backend().await;
    let state = app_state(&backend.base_url, Arc::new(MemoryStore::new()), Arc::default());

    let err = state.api.delete_book(1).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.to_string(), "Request failed");

    let err = state.api.waive_fine(5).await.unwrap_err();
    assert_eq!(err.status(), Some(403));
    assert_eq!(err.to_string(), "Request failed");
}

#[tokio::test]
async fn test_error_status_with_non_json_body() {
    let backend = spawn_backend().await;
    let state = app_state(&backend.base_url, Arc::new(MemoryStore::new()), Arc::default());

    let err = state.api.dashboard_report().await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "Request failed");
}

#[tokio::test]
async fn test_success_with_non_json_body_is_invalid_response() {
    let backend = spawn_backend().await;
    let state = app_state(&backend.base_url, Arc::new(MemoryStore::new()), Arc::default());

    let err = state.api.list_overdue_transactions().await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidResponse(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    let base_url = unreachable_base_url().await;
    let state = app_state(&base_url, Arc::new(MemoryStore::new()), Arc::default());

    let err = state.api.list_categories().await.unwrap_err();
    assert!(matches!(err, ClientError::Network(_)), "got {:?}", err);
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_omitted_filters_leave_no_undefined_in_query() {
    let backend = spawn_backend().await;
    let state = app_state(&backend.base_url, Arc::new(MemoryStore::new()), Arc::default());

    state.api.list_books(&BookQuery::default()).await.unwrap();
    assert_eq!(backend.log.last().uri, "/api/books");

    state
        .api
        .list_books(&BookQuery {
            category: Some("Science Fiction".to_string()),
            available_only: None,
        })
        .await
        .unwrap();
    let uri = backend.log.last().uri;
    assert_eq!(uri, "/api/books?category=Science%20Fiction");
    assert!(!uri.contains("undefined"));

    state.api.list_users(None).await.unwrap();
    assert_eq!(backend.log.last().uri, "/api/users");

    state.api.list_users(Some(Role::Student)).await.unwrap();
    assert_eq!(backend.log.last().uri, "/api/users?role=student");

    let fines = state.api.list_user_fines(3, None).await.unwrap();
    assert_eq!(fines.total_pending, Some(0.0));
    assert_eq!(backend.log.last().uri, "/api/fines/user/3");

    state.api.list_user_fines(3, Some(FineStatus::Paid)).await.unwrap();
    assert_eq!(backend.log.last().uri, "/api/fines/user/3?status=paid");
}

#[tokio::test]
async fn test_search_keyword_is_encoded() {
    let backend = spawn_backend().await;
    let state = app_state(&backend.base_url, Arc::new(MemoryStore::new()), Arc::default());

    let found = state.api.search_books("war & peace").await.unwrap();
    assert_eq!(found.count, 1);
    assert_eq!(backend.log.last().uri, "/api/books/search?q=war%20%26%20peace");
}

#[tokio::test]
async fn test_circulation_dates_are_formatted() {
    let backend = spawn_backend().await;
    let state = app_state(&backend.base_url, Arc::new(MemoryStore::new()), Arc::default());

    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
    let report = state.api.circulation_report(start, end).await.unwrap();

    assert_eq!(report.circulation.period, "2024-01-01 to 2024-01-31");
    let uri = backend.log.last().uri;
    assert!(uri.starts_with("/api/reports/circulation?"));
    assert!(uri.contains("start_date=2024-01-01"));
    assert!(uri.contains("end_date=2024-01-31"));
}

#[tokio::test]
async fn test_issue_without_days_omits_the_field() {
    let backend = spawn_backend().await;
    let state = app_state(&backend.base_url, Arc::new(MemoryStore::new()), Arc::default());

    let issued = state.api.issue_book(3, 5, None).await.unwrap();
    assert_eq!(issued.transaction_id, 9);
    assert_eq!(backend.log.last_body(), serde_json::json!({"book_id": 3, "user_id": 5}));

    state.api.issue_book(3, 5, Some(21)).await.unwrap();
    assert_eq!(
        backend.log.last_body(),
        serde_json::json!({"book_id": 3, "user_id": 5, "issue_days": 21})
    );

    let request = backend.log.last();
    assert_eq!(request.method, "POST");
    assert_eq!(request.content_type.as_deref(), Some("application/json"));
}

#[tokio::test]
async fn test_computed_headers_win_over_caller_headers() {
    let backend = spawn_backend().await;
    let state = app_state(&backend.base_url, Arc::new(MemoryStore::new()), Arc::default());
    state.api.set_token("tok_real").unwrap();

    let options = RequestOptions::get()
        .header("Authorization", "Bearer forged")
        .header("content-type", "text/plain")
        .header("X-Request-Id", "abc");
    let echoed: Value = state.api.request("/headers", options).await.unwrap();

    assert_eq!(echoed["authorization"], serde_json::json!(["Bearer tok_real"]));
    assert_eq!(echoed["content_type"], serde_json::json!(["application/json"]));
    assert_eq!(echoed["request_id"], serde_json::json!(["abc"]));
}

#[tokio::test]
async fn test_no_authorization_header_without_token() {
    let backend = spawn_backend().await;
    let navigator = Arc::new(RecordingNavigator::default());
    let state = app_state(&backend.base_url, Arc::new(MemoryStore::new()), navigator);

    state.api.list_categories().await.unwrap();
    let request = backend.log.last();
    assert!(request.authorization.is_none());
    assert_eq!(request.content_type.as_deref(), Some("application/json"));
}
