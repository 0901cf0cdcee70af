//! Email MCP Library
//!
//! Exposes the email service as MCP tools for an LLM tool-calling loop, plus
//! the prompt wrapper and console rendering used around that loop.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use email_mcp::{AdapterConfig, EmailMcpServer, EmbeddableMcp};
//!
//! let server = EmailMcpServer::new(&AdapterConfig::from_env())?;
//! let result = server.call_tool("list_unread_emails", serde_json::json!({})).await?;
//! ```
//!
//! # Usage as Binary
//!
//! Run directly: `email-mcp` (serves MCP over stdio)
//!
//! Or configure in `.mcp.json`:
//! ```json
//! { "mcpServers": { "email": { "command": "./email-mcp", "env": { "EMAIL_SERVICE_URL": "http://localhost:8000" } } } }
//! ```

pub mod client;
pub mod config;
pub mod display;
pub mod handlers;
pub mod params;
pub mod prompt;
pub mod server;
pub mod types;

pub use client::{ClientError, ClientResult, EmailClient};
pub use config::AdapterConfig;
pub use prompt::build_prompt;
pub use server::EmailMcpServer;
pub use types::{Email, FilterRequest, MessageResponse, ResetResponse, SendEmailRequest};

// Re-export EmbeddableMcp trait for in-process usage
pub use mcp_common::{EmbeddableError, EmbeddableMcp, EmbeddableResult};
