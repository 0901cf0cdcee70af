//! MCP Common - Shared utilities for the email workspace
//!
//! - **Initialization**: [`init_tracing`] for the service and tool-server binaries
//! - **Results**: helpers for building and reading `CallToolResult` responses
//! - **Errors**: helpers for mapping failures onto MCP error codes
//! - **Embeddable**: [`EmbeddableMcp`] trait for calling tools in-process
//!
//! Everything but [`init_tracing`] sits behind the `mcp` feature, so a binary
//! with no tool server can depend on this crate without pulling in rmcp.
//!
//! # Example
//!
//! ```rust,ignore
//! use mcp_common::{json_success, not_found, McpError, CallToolResult};
//!
//! async fn get_email(&self, id: i64) -> Result<CallToolResult, McpError> {
//!     match self.client.get_email(id).await {
//!         Ok(email) => json_success(&email),
//!         Err(_) => Err(not_found(format!("Email {id} not found"))),
//!     }
//! }
//! ```

#[cfg(feature = "mcp")]
pub mod embeddable;
#[cfg(feature = "mcp")]
pub mod error;
pub mod init;
#[cfg(feature = "mcp")]
pub mod result;

#[cfg(feature = "mcp")]
pub use embeddable::{EmbeddableError, EmbeddableMcp, EmbeddableResult};
#[cfg(feature = "mcp")]
pub use error::{internal_error, invalid_params, not_found};
pub use init::init_tracing;
#[cfg(feature = "mcp")]
pub use result::{first_text, json_success};

// Re-export rmcp types that tool servers need alongside the helpers
#[cfg(feature = "mcp")]
pub use rmcp::{
    model::{CallToolResult, Tool},
    ErrorData as McpError,
};

#[cfg(feature = "mcp")]
pub use async_trait::async_trait;
