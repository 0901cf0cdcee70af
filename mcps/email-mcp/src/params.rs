//! Parameter definitions for email-mcp tools

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SendEmailParams {
    /// Recipient email address
    pub recipient: String,
    pub subject: String,
    pub body: String,
    /// Sender address; defaults to the user's own address
    #[serde(default)]
    pub sender: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchEmailsParams {
    /// Text to look for in subject, body or sender (case-insensitive)
    pub query: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct FilterEmailsParams {
    /// Exact recipient address
    #[serde(default)]
    pub recipient: Option<String>,
    /// Earliest timestamp, ISO-8601 (e.g. 2024-01-31 or 2024-01-31T09:00:00Z)
    #[serde(default)]
    pub start_date: Option<String>,
    /// Latest timestamp, ISO-8601
    #[serde(default)]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EmailIdParams {
    /// ID of the email
    pub email_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SenderParams {
    /// Sender address to match (case-insensitive)
    pub sender_address: String,
}
