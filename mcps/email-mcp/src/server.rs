//! MCP Server implementation for the email inbox
//!
//! Each tool delegates to a handler in the handlers module, which talks to
//! the email service over HTTP.

use mcp_common::{async_trait, EmbeddableError, EmbeddableMcp, EmbeddableResult};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, ServerCapabilities, ServerInfo, Tool},
    tool, tool_handler, tool_router, ErrorData as McpError,
};
use serde_json::Value;

use crate::client::{ClientResult, EmailClient};
use crate::config::AdapterConfig;
use crate::handlers;
use crate::params::*;

/// The main Email MCP Server
#[derive(Clone)]
pub struct EmailMcpServer {
    client: EmailClient,
    tool_router: ToolRouter<Self>,
}

// ============================================================================
// Tool Router - Each tool delegates to its handler
// ============================================================================

#[tool_router]
impl EmailMcpServer {
    pub fn new(config: &AdapterConfig) -> ClientResult<Self> {
        Ok(Self::with_client(EmailClient::new(&config.service_url)?))
    }

    pub fn with_client(client: EmailClient) -> Self {
        Self {
            client,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(description = "Send an email; the sender defaults to the user's own address")]
    async fn send_email(
        &self,
        Parameters(params): Parameters<SendEmailParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::send_email(&self.client, params).await
    }

    #[tool(description = "List every email, newest first")]
    async fn list_all_emails(&self) -> Result<CallToolResult, McpError> {
        handlers::list_all_emails(&self.client).await
    }

    #[tool(description = "List unread emails, newest first")]
    async fn list_unread_emails(&self) -> Result<CallToolResult, McpError> {
        handlers::list_unread_emails(&self.client).await
    }

    #[tool(description = "Search emails by text in subject, body or sender (case-insensitive)")]
    async fn search_emails(
        &self,
        Parameters(params): Parameters<SearchEmailsParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::search_emails(&self.client, params).await
    }

    #[tool(description = "Filter emails by exact recipient and/or an ISO-8601 date range")]
    async fn filter_emails(
        &self,
        Parameters(params): Parameters<FilterEmailsParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::filter_emails(&self.client, params).await
    }

    #[tool(description = "Fetch one email by ID")]
    async fn get_email(
        &self,
        Parameters(params): Parameters<EmailIdParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::get_email(&self.client, params).await
    }

    #[tool(description = "Mark an email as read")]
    async fn mark_email_as_read(
        &self,
        Parameters(params): Parameters<EmailIdParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::mark_email_as_read(&self.client, params).await
    }

    #[tool(description = "Mark an email as unread")]
    async fn mark_email_as_unread(
        &self,
        Parameters(params): Parameters<EmailIdParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::mark_email_as_unread(&self.client, params).await
    }

    #[tool(description = "Delete an email by ID")]
    async fn delete_email(
        &self,
        Parameters(params): Parameters<EmailIdParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::delete_email(&self.client, params).await
    }

    #[tool(description = "Reset the inbox to its initial sample emails")]
    async fn reset_database(&self) -> Result<CallToolResult, McpError> {
        handlers::reset_database(&self.client).await
    }

    #[tool(description = "Unread emails from one sender address (case-insensitive exact match)")]
    async fn search_unread_from_sender(
        &self,
        Parameters(params): Parameters<SenderParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::search_unread_from_sender(&self.client, params).await
    }
}

// ============================================================================
// Server Handler Implementation
// ============================================================================

#[tool_handler]
impl rmcp::ServerHandler for EmailMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Email inbox tools: send, list, search, filter, read/unread, delete and reset. \
                 Backed by the email service REST API."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

// ============================================================================
// EmbeddableMcp Implementation
// ============================================================================

#[async_trait]
impl EmbeddableMcp for EmailMcpServer {
    fn server_name(&self) -> &str {
        "email"
    }

    fn server_description(&self) -> Option<&str> {
        Some("Email inbox tools backed by the email service REST API.")
    }

    fn list_tools(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }

    async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult> {
        match name {
            "send_email" => {
                let params: SendEmailParams = serde_json::from_value(params)?;
                self.send_email(Parameters(params)).await.map_err(Into::into)
            }

            "list_all_emails" => self.list_all_emails().await.map_err(Into::into),

            "list_unread_emails" => self.list_unread_emails().await.map_err(Into::into),

            "search_emails" => {
                let params: SearchEmailsParams = serde_json::from_value(params)?;
                self.search_emails(Parameters(params)).await.map_err(Into::into)
            }

            "filter_emails" => {
                let params: FilterEmailsParams = serde_json::from_value(params)?;
                self.filter_emails(Parameters(params)).await.map_err(Into::into)
            }

            "get_email" => {
                let params: EmailIdParams = serde_json::from_value(params)?;
                self.get_email(Parameters(params)).await.map_err(Into::into)
            }

            "mark_email_as_read" => {
                let params: EmailIdParams = serde_json::from_value(params)?;
                self.mark_email_as_read(Parameters(params))
                    .await
                    .map_err(Into::into)
            }

            "mark_email_as_unread" => {
                let params: EmailIdParams = serde_json::from_value(params)?;
                self.mark_email_as_unread(Parameters(params))
                    .await
                    .map_err(Into::into)
            }

            "delete_email" => {
                let params: EmailIdParams = serde_json::from_value(params)?;
                self.delete_email(Parameters(params)).await.map_err(Into::into)
            }

            "reset_database" => self.reset_database().await.map_err(Into::into),

            "search_unread_from_sender" => {
                let params: SenderParams = serde_json::from_value(params)?;
                self.search_unread_from_sender(Parameters(params))
                    .await
                    .map_err(Into::into)
            }

            _ => Err(EmbeddableError::ToolNotFound(name.to_string())),
        }
    }
}
