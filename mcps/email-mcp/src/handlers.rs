//! Handler implementations for email-mcp tools
//!
//! Each handler marshals tool params into a client call and returns the
//! service's response as JSON. Service errors pass through with their message.

use mcp_common::{internal_error, invalid_params, json_success, not_found, CallToolResult, McpError};

use crate::client::{ClientError, EmailClient};
use crate::params::*;
use crate::types::{Email, FilterRequest, SendEmailRequest};

fn tool_error(err: ClientError) -> McpError {
    match err {
        ClientError::NotFound(detail) => not_found(detail),
        ClientError::Validation(detail) => invalid_params(detail),
        other => internal_error(other.to_string()),
    }
}

pub async fn send_email(
    client: &EmailClient,
    params: SendEmailParams,
) -> Result<CallToolResult, McpError> {
    let request = SendEmailRequest {
        recipient: params.recipient,
        subject: params.subject,
        body: params.body,
        sender: params.sender,
    };

    let response = client.send_email(&request).await.map_err(tool_error)?;
    json_success(&response)
}

pub async fn list_all_emails(client: &EmailClient) -> Result<CallToolResult, McpError> {
    let emails = client.list_all().await.map_err(tool_error)?;
    json_success(&emails)
}

pub async fn list_unread_emails(client: &EmailClient) -> Result<CallToolResult, McpError> {
    let emails = client.list_unread().await.map_err(tool_error)?;
    json_success(&emails)
}

pub async fn search_emails(
    client: &EmailClient,
    params: SearchEmailsParams,
) -> Result<CallToolResult, McpError> {
    let emails = client.search(&params.query).await.map_err(tool_error)?;
    json_success(&emails)
}

pub async fn filter_emails(
    client: &EmailClient,
    params: FilterEmailsParams,
) -> Result<CallToolResult, McpError> {
    let filter = FilterRequest {
        recipient: params.recipient,
        start_date: params.start_date,
        end_date: params.end_date,
    };

    let emails = client.filter(&filter).await.map_err(tool_error)?;
    json_success(&emails)
}

pub async fn get_email(
    client: &EmailClient,
    params: EmailIdParams,
) -> Result<CallToolResult, McpError> {
    let email = client.get(params.email_id).await.map_err(tool_error)?;
    json_success(&email)
}

pub async fn mark_email_as_read(
    client: &EmailClient,
    params: EmailIdParams,
) -> Result<CallToolResult, McpError> {
    let response = client.mark_read(params.email_id).await.map_err(tool_error)?;
    json_success(&response)
}

pub async fn mark_email_as_unread(
    client: &EmailClient,
    params: EmailIdParams,
) -> Result<CallToolResult, McpError> {
    let response = client
        .mark_unread(params.email_id)
        .await
        .map_err(tool_error)?;
    json_success(&response)
}

pub async fn delete_email(
    client: &EmailClient,
    params: EmailIdParams,
) -> Result<CallToolResult, McpError> {
    let response = client.delete(params.email_id).await.map_err(tool_error)?;
    json_success(&response)
}

pub async fn reset_database(client: &EmailClient) -> Result<CallToolResult, McpError> {
    let response = client.reset().await.map_err(tool_error)?;
    json_success(&response)
}

pub async fn search_unread_from_sender(
    client: &EmailClient,
    params: SenderParams,
) -> Result<CallToolResult, McpError> {
    let unread = client.list_unread().await.map_err(tool_error)?;
    json_success(&unread_from_sender(unread, &params.sender_address))
}

/// Unread emails whose sender equals `sender` ignoring case
pub fn unread_from_sender(unread: Vec<Email>, sender: &str) -> Vec<Email> {
    let sender = sender.to_lowercase();
    unread
        .into_iter()
        .filter(|email| email.sender.to_lowercase() == sender)
        .collect()
}
