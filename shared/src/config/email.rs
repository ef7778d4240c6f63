//! Outbound email provider configuration

use serde::{Deserialize, Serialize};
use std::env;

/// Outbound email configuration
///
/// When `api_key` is empty the server falls back to the console mailer,
/// which logs messages instead of delivering them.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Provider API key (empty = console mailer)
    pub api_key: String,

    /// Provider sending domain (e.g. mg.freshmart.example)
    pub domain: String,

    /// From address shown to recipients
    pub from_address: String,

    /// Request timeout for the provider API in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            domain: String::from("mg.freshmart.example"),
            from_address: String::from("Freshmart <no-reply@freshmart.example>"),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl EmailConfig {
    /// Load email settings from environment variables
    pub fn from_env() -> Self {
        Self {
            api_key: env::var("MAILGUN_API_KEY").unwrap_or_default(),
            domain: env::var("MAILGUN_DOMAIN")
                .unwrap_or_else(|_| String::from("mg.freshmart.example")),
            from_address: env::var("EMAIL_FROM")
                .unwrap_or_else(|_| String::from("Freshmart <no-reply@freshmart.example>")),
            request_timeout_secs: env::var("EMAIL_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_request_timeout),
        }
    }

    /// Whether a real provider is configured
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

fn default_request_timeout() -> u64 {
    30
}
