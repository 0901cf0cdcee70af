//! REST API handlers

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use super::state::AppState;
use crate::error::StoreError;
use crate::types::{parse_timestamp, Email, EmailFilter, MessageResponse, NewEmail, ResetResponse};

type ApiResult<T> = Result<Json<T>, StoreError>;

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl ErrorResponse {
    fn new(msg: impl Into<String>) -> Self {
        Self { detail: msg.into() }
    }
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let status = match &self {
            StoreError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            StoreError::NotFound(_) => StatusCode::NOT_FOUND,
            StoreError::Storage(_) | StoreError::LockPoisoned => {
                tracing::error!("Storage failure: {}", self);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

fn email_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, StoreError> {
    path.map(|Path(id)| id)
        .map_err(|r| StoreError::validation(r.body_text()))
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: bool,
    pub email_count: Option<i64>,
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match state.store.count() {
        Ok(count) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok".to_string(),
                database: true,
                email_count: Some(count),
            }),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "error".to_string(),
                    database: false,
                    email_count: None,
                }),
            )
        }
    }
}

/// Create ("send") an email
pub async fn send_email(
    State(state): State<AppState>,
    payload: Result<Json<NewEmail>, JsonRejection>,
) -> ApiResult<MessageResponse> {
    let Json(new) = payload.map_err(|r| StoreError::validation(r.body_text()))?;
    let email = state.store.create(new)?;
    Ok(Json(MessageResponse::new(email.id, "Email sent successfully")))
}

/// List all emails
pub async fn list_emails(State(state): State<AppState>) -> ApiResult<Vec<Email>> {
    Ok(Json(state.store.list_all()?))
}

/// List unread emails
pub async fn list_unread(State(state): State<AppState>) -> ApiResult<Vec<Email>> {
    Ok(Json(state.store.list_unread()?))
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// Search emails by subject, body or sender
pub async fn search_emails(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> ApiResult<Vec<Email>> {
    let Query(params) = params.map_err(|r| StoreError::validation(r.body_text()))?;
    let q = params
        .q
        .ok_or_else(|| StoreError::validation("query parameter 'q' is required"))?;

    Ok(Json(state.store.search(&q)?))
}

/// Filter query parameters; dates are parsed by the handler
#[derive(Debug, Default, Deserialize)]
pub struct FilterParams {
    pub recipient: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

fn parse_bound(value: Option<String>) -> Result<Option<chrono::DateTime<chrono::Utc>>, StoreError> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(|v| parse_timestamp(&v))
        .transpose()
}

/// Filter emails by recipient and date range
pub async fn filter_emails(
    State(state): State<AppState>,
    params: Result<Query<FilterParams>, QueryRejection>,
) -> ApiResult<Vec<Email>> {
    let Query(params) = params.map_err(|r| StoreError::validation(r.body_text()))?;

    let filter = EmailFilter {
        recipient: params.recipient,
        start_date: parse_bound(params.start_date)?,
        end_date: parse_bound(params.end_date)?,
    };

    Ok(Json(state.store.filter(filter)?))
}

/// Get an email by ID
pub async fn get_email(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Email> {
    Ok(Json(state.store.get(email_id(id)?)?))
}

/// Mark an email as read
pub async fn mark_read(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<MessageResponse> {
    Ok(Json(state.store.mark_read(email_id(id)?)?))
}

/// Mark an email as unread
pub async fn mark_unread(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<MessageResponse> {
    Ok(Json(state.store.mark_unread(email_id(id)?)?))
}

/// Delete an email
pub async fn delete_email(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<MessageResponse> {
    Ok(Json(state.store.delete(email_id(id)?)?))
}

/// Reset the database to the seed dataset
pub async fn reset_database(State(state): State<AppState>) -> ApiResult<ResetResponse> {
    Ok(Json(state.store.reset()?))
}
