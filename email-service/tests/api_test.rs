//! Integration tests for the HTTP API.

use axum::http::StatusCode;
use serde_json::json;

mod common;

use common::{empty_request, get, json_request, send, test_app};

fn ids(json: &serde_json::Value) -> Vec<i64> {
    json.as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_i64().unwrap())
        .collect()
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_reports_count() {
    let (app, _) = test_app();

    let (response, json) = send(&app, get("/health")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["database"], true);
    assert_eq!(json["email_count"], 6);
}

// ============================================================================
// Send
// ============================================================================

#[tokio::test]
async fn test_send_then_get() {
    let (app, _) = test_app();

    let (response, json) = send(
        &app,
        json_request(
            "POST",
            "/send",
            json!({"recipient": "bob@x.com", "subject": "Hello", "body": "Hi Bob"}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json["message"], "Email sent successfully");
    let id = json["id"].as_i64().unwrap();

    let (response, email) = send(&app, get(&format!("/emails/{}", id))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(email["sender"], "you@email.com");
    assert_eq!(email["recipient"], "bob@x.com");
    assert_eq!(email["subject"], "Hello");
    assert_eq!(email["body"], "Hi Bob");
    assert_eq!(email["read"], false);
    assert!(email["timestamp"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn test_send_missing_field_is_422() {
    let (app, store) = test_app();

    let (response, json) = send(
        &app,
        json_request("POST", "/send", json!({"recipient": "bob@x.com", "body": "no subject"})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["detail"], "subject must not be empty");
    assert_eq!(store.count().unwrap(), 6);
}

#[tokio::test]
async fn test_send_malformed_json_is_rejected() {
    let (app, _) = test_app();

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/send")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();
    let (response, json) = send(&app, request).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(json["detail"].is_string());
}

// ============================================================================
// Listing, search and filter
// ============================================================================

#[tokio::test]
async fn test_list_emails_newest_first() {
    let (app, _) = test_app();

    let (_, sent) = send(
        &app,
        json_request(
            "POST",
            "/send",
            json!({"recipient": "bob@x.com", "subject": "Latest", "body": "newest"}),
        ),
    )
    .await;

    let (response, json) = send(&app, get("/emails")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let all = ids(&json);
    assert_eq!(all.len(), 7);
    assert_eq!(all[0], sent["id"].as_i64().unwrap());
}

#[tokio::test]
async fn test_list_unread() {
    let (app, _) = test_app();

    let (_, json) = send(&app, get("/emails/unread")).await;
    let mut unread = ids(&json);
    unread.sort();
    assert_eq!(unread, vec![1, 2, 3, 5]);
}

#[tokio::test]
async fn test_search() {
    let (app, _) = test_app();

    let (response, json) = send(&app, get("/emails/search?q=lunch")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(ids(&json), vec![3]);
}

#[tokio::test]
async fn test_search_without_query_is_422() {
    let (app, _) = test_app();

    let (response, json) = send(&app, get("/emails/search")).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(json["detail"].as_str().unwrap().contains("'q'"));
}

#[tokio::test]
async fn test_filter_by_recipient() {
    let (app, _) = test_app();

    let (response, json) = send(&app, get("/emails/filter?recipient=you@email.com")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(ids(&json).len(), 6);

    let (_, json) = send(&app, get("/emails/filter?recipient=nobody@x.com")).await;
    assert!(ids(&json).is_empty());
}

#[tokio::test]
async fn test_filter_by_dates() {
    let (app, _) = test_app();

    let (_, json) = send(&app, get("/emails/filter?start_date=2000-01-01&end_date=2999-12-31")).await;
    assert_eq!(ids(&json).len(), 6);

    let (_, json) = send(&app, get("/emails/filter?start_date=2999-01-01T00:00:00")).await;
    assert!(ids(&json).is_empty());
}

#[tokio::test]
async fn test_filter_bad_date_is_422() {
    let (app, _) = test_app();

    let (response, json) = send(&app, get("/emails/filter?start_date=last-week")).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(json["detail"].as_str().unwrap().contains("last-week"));
}

// ============================================================================
// Single email operations
// ============================================================================

#[tokio::test]
async fn test_get_missing_is_404() {
    let (app, _) = test_app();

    let (response, json) = send(&app, get("/emails/999")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json["detail"], "Email not found");
}

#[tokio::test]
async fn test_non_numeric_id_is_422() {
    let (app, _) = test_app();

    let (response, _) = send(&app, get("/emails/abc")).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_mark_read_and_unread() {
    let (app, store) = test_app();

    let (response, json) = send(&app, empty_request("PATCH", "/emails/1/read")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json, json!({"id": 1, "message": "Email marked as read"}));
    assert!(store.get(1).unwrap().read);

    let (response, _) = send(&app, empty_request("PATCH", "/emails/1/read")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let (response, json) = send(&app, empty_request("PATCH", "/emails/1/unread")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json["message"], "Email marked as unread");
    assert!(!store.get(1).unwrap().read);
}

#[tokio::test]
async fn test_mark_missing_is_404() {
    let (app, _) = test_app();

    let (response, _) = send(&app, empty_request("PATCH", "/emails/999/read")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let (response, _) = send(&app, empty_request("PATCH", "/emails/999/unread")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete() {
    let (app, _) = test_app();

    let (response, json) = send(&app, empty_request("DELETE", "/emails/4")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json, json!({"id": 4, "message": "Email deleted successfully"}));

    let (response, _) = send(&app, get("/emails/4")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let (response, _) = send(&app, empty_request("DELETE", "/emails/4")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Reset
// ============================================================================

#[tokio::test]
async fn test_reset_restores_seed() {
    let (app, store) = test_app();

    send(&app, empty_request("DELETE", "/emails/1")).await;
    send(&app, empty_request("PATCH", "/emails/2/read")).await;

    let (response, json) = send(&app, get("/reset_database")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json["message"], "Database reset to initial state");

    assert_eq!(store.count().unwrap(), 6);
    assert!(!store.get(2).unwrap().read);
    assert!(store.get(1).is_ok());

    let (response, _) = send(&app, empty_request("POST", "/reset_database")).await;
    assert_eq!(response.status(), StatusCode::OK);
}
