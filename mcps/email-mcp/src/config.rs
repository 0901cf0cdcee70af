//! Configuration for email-mcp
//!
//! Configuration is loaded from:
//! 1. Environment variables EMAIL_SERVICE_URL and EMAIL_SELF_ADDRESS
//! 2. Default values

use serde::{Deserialize, Serialize};

pub const DEFAULT_SERVICE_URL: &str = "http://localhost:8000";
pub const DEFAULT_SELF_ADDRESS: &str = "you@email.com";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdapterConfig {
    /// Base URL of the email service
    pub service_url: String,
    /// The user's own address, quoted in the assistant prompt
    pub self_address: String,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            self_address: DEFAULT_SELF_ADDRESS.to_string(),
        }
    }
}

impl AdapterConfig {
    /// Defaults overridden by the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("EMAIL_SERVICE_URL").filter(|v| !v.is_empty()) {
            config.service_url = url;
        }
        if let Some(address) = lookup("EMAIL_SELF_ADDRESS").filter(|v| !v.is_empty()) {
            config.self_address = address;
        }

        config
    }
}
