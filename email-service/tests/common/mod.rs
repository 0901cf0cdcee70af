//! Common test utilities.

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use email_service::web::{create_router, AppState};
use email_service::{Database, EmailStore};

/// A store over a fresh in-memory database, reset to the seed emails.
pub fn seeded_store() -> EmailStore {
    let store = EmailStore::new(Database::open_in_memory().unwrap(), "you@email.com");
    store.reset().unwrap();
    store
}

/// Router over a seeded store; clones of the store see the same data.
pub fn test_app() -> (Router, EmailStore) {
    let store = seeded_store();
    (create_router(AppState::new(store.clone())), store)
}

/// Send one request and decode the JSON body.
pub async fn send(app: &Router, request: Request<Body>) -> (Response<()>, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let (parts, body) = response.into_parts();
    let bytes = body.collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (Response::from_parts(parts, ()), json)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}
