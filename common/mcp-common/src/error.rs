//! Error helpers for MCP tool handlers

use rmcp::ErrorData as McpError;

/// Internal error: the tool could not complete (transport, server, encoding)
pub fn internal_error(message: impl Into<String>) -> McpError {
    McpError::internal_error(message.into(), None)
}

/// Invalid params: the caller sent arguments the backend rejected
pub fn invalid_params(message: impl Into<String>) -> McpError {
    McpError::invalid_params(message.into(), None)
}

/// Resource not found: the referenced record does not exist
pub fn not_found(message: impl Into<String>) -> McpError {
    McpError::resource_not_found(message.into(), None)
}
