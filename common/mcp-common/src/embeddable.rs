//! In-process tool execution
//!
//! [`EmbeddableMcp`] lets a host call a tool server's tools directly, without
//! spawning it as a subprocess and speaking MCP over stdio. The CLI of the
//! email tool server uses it to run single tool calls from the terminal.
//!
//! ```rust,ignore
//! use mcp_common::EmbeddableMcp;
//!
//! let server = EmailMcpServer::new(config)?;
//! let result = server
//!     .call_tool("search_emails", serde_json::json!({ "query": "lunch" }))
//!     .await?;
//! ```

use async_trait::async_trait;
use rmcp::model::{CallToolResult, Tool};
use serde_json::Value;

/// Error type for embeddable MCP operations
#[derive(Debug, thiserror::Error)]
pub enum EmbeddableError {
    #[error("tool not found: {0}")]
    ToolNotFound(String),

    /// Arguments did not deserialize into the tool's parameter type
    #[error("invalid parameters: {0}")]
    InvalidParams(#[from] serde_json::Error),

    /// The tool ran and reported an MCP error
    #[error("mcp error: {0}")]
    McpError(String),
}

impl From<rmcp::ErrorData> for EmbeddableError {
    fn from(err: rmcp::ErrorData) -> Self {
        EmbeddableError::McpError(err.message.to_string())
    }
}

pub type EmbeddableResult<T> = Result<T, EmbeddableError>;

/// A tool server that can be driven in-process.
///
/// Implementations are `Send + Sync` so several tasks may call tools at once.
#[async_trait]
pub trait EmbeddableMcp: Send + Sync {
    /// Name used for the server in MCP configuration files
    fn server_name(&self) -> &str;

    /// All tools with their descriptions and input schemas
    fn list_tools(&self) -> Vec<Tool>;

    /// Run the named tool with a JSON object of arguments
    async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult>;

    fn server_description(&self) -> Option<&str> {
        None
    }
}
