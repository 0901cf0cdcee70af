//! Email record and per-operation request/response types

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// A stored email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    pub id: i64,
    pub sender: String,
    pub recipient: String,
    pub subject: String,
    pub body: String,
    /// Creation time, assigned by the store
    pub timestamp: DateTime<Utc>,
    pub read: bool,
}

/// Input for creating ("sending") an email
///
/// Fields default to empty so a missing field is reported by store validation
/// rather than by the JSON decoder.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewEmail {
    #[serde(default)]
    pub recipient: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
    /// Defaults to the store's self address when absent or blank
    #[serde(default)]
    pub sender: Option<String>,
}

/// Criteria for [`EmailStore::filter`](crate::store::EmailStore::filter), combined with AND
#[derive(Debug, Clone, Default)]
pub struct EmailFilter {
    /// Exact, case-sensitive recipient match
    pub recipient: Option<String>,
    /// Inclusive lower bound on `timestamp`
    pub start_date: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `timestamp`
    pub end_date: Option<DateTime<Utc>>,
}

/// Confirmation for operations on a single email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub id: i64,
    pub message: String,
}

impl MessageResponse {
    pub fn new(id: i64, message: impl Into<String>) -> Self {
        Self {
            id,
            message: message.into(),
        }
    }
}

/// Confirmation for a database reset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetResponse {
    pub message: String,
}

/// Parse a date bound supplied by a caller.
///
/// Accepts RFC 3339, naive `YYYY-MM-DDTHH:MM:SS[.f]` or `YYYY-MM-DD HH:MM:SS[.f]`
/// (taken as UTC), and a bare `YYYY-MM-DD` (midnight UTC).
///
/// Sub-microsecond digits are kept here; the query layer rounds a start bound
/// up and an end bound down to the microsecond stored timestamps carry.
pub fn parse_timestamp(input: &str) -> StoreResult<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(input) {
        return Ok(ts.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(naive.and_utc());
        }
    }

    Err(StoreError::validation(format!(
        "invalid datetime '{}': expected ISO-8601 (e.g. 2024-01-31T09:00:00Z or 2024-01-31)",
        input
    )))
}
