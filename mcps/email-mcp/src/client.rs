//! HTTP client for the email service
//!
//! One method per endpoint. Non-2xx responses are decoded into [`ClientError`]
//! using the service's `{"detail": ...}` error body.

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::types::{
    Email, ErrorBody, FilterRequest, MessageResponse, ResetResponse, SendEmailRequest,
};

#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection, timeout or body decoding failure
    #[error("request to email service failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("email service returned {status}: {detail}")]
    Api { status: u16, detail: String },
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Typed client for the email service REST API
#[derive(Debug, Clone)]
pub struct EmailClient {
    client: Client,
    base_url: String,
}

impl EmailClient {
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("email-mcp/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn send_email(&self, request: &SendEmailRequest) -> ClientResult<MessageResponse> {
        execute(self.client.post(self.url("/send")).json(request)).await
    }

    pub async fn list_all(&self) -> ClientResult<Vec<Email>> {
        execute(self.client.get(self.url("/emails"))).await
    }

    pub async fn list_unread(&self) -> ClientResult<Vec<Email>> {
        execute(self.client.get(self.url("/emails/unread"))).await
    }

    pub async fn search(&self, query: &str) -> ClientResult<Vec<Email>> {
        execute(
            self.client
                .get(self.url("/emails/search"))
                .query(&[("q", query)]),
        )
        .await
    }

    pub async fn filter(&self, filter: &FilterRequest) -> ClientResult<Vec<Email>> {
        execute(self.client.get(self.url("/emails/filter")).query(filter)).await
    }

    pub async fn get(&self, id: i64) -> ClientResult<Email> {
        execute(self.client.get(self.url(&format!("/emails/{}", id)))).await
    }

    pub async fn mark_read(&self, id: i64) -> ClientResult<MessageResponse> {
        execute(self.client.patch(self.url(&format!("/emails/{}/read", id)))).await
    }

    pub async fn mark_unread(&self, id: i64) -> ClientResult<MessageResponse> {
        execute(self.client.patch(self.url(&format!("/emails/{}/unread", id)))).await
    }

    pub async fn delete(&self, id: i64) -> ClientResult<MessageResponse> {
        execute(self.client.delete(self.url(&format!("/emails/{}", id)))).await
    }

    pub async fn reset(&self) -> ClientResult<ResetResponse> {
        execute(self.client.post(self.url("/reset_database"))).await
    }
}

async fn execute<T: DeserializeOwned>(request: RequestBuilder) -> ClientResult<T> {
    let response = request.send().await?;
    let status = response.status();

    if status.is_success() {
        return Ok(response.json().await?);
    }

    let text = response.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.detail)
        .unwrap_or(text);

    tracing::debug!(%status, %detail, "Email service error");

    Err(match status {
        StatusCode::NOT_FOUND => ClientError::NotFound(detail),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            ClientError::Validation(detail)
        }
        _ => ClientError::Api {
            status: status.as_u16(),
            detail,
        },
    })
}
