//! Mailgun Email Service Implementation
//!
//! Sends transactional email through the Mailgun HTTP API. Implements the
//! EmailService trait for production delivery.
//!
//! ## Features
//!
//! - Plain-text message delivery via the v3 messages endpoint
//! - Automatic retry with exponential backoff on rate limits and 5xx
//! - Delivery message id tracking
//! - Security: Recipient addresses masked in logs

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use std::time::Duration;
use tracing::{debug, error, info, warn};

use fm_shared::config::EmailConfig;
use fm_shared::utils::validation::{is_valid_email, mask_email};

use super::email_service::EmailService;
use crate::InfrastructureError;

const MAILGUN_API_BASE: &str = "https://api.mailgun.net/v3";

/// Mailgun email service implementation
pub struct MailgunEmailService {
    client: reqwest::Client,
    config: EmailConfig,
    /// Maximum retry attempts for failed requests
    max_retries: u32,
    /// Initial retry delay in milliseconds
    retry_delay_ms: u64,
}

impl MailgunEmailService {
    /// Create a new Mailgun email service
    pub fn new(config: EmailConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .unwrap_or_default();

        info!(
            "Mailgun email service initialized for domain: {}",
            config.domain
        );

        Self {
            client,
            config,
            max_retries: 3,
            retry_delay_ms: 1000,
        }
    }

    fn messages_url(&self) -> String {
        format!("{}/{}/messages", MAILGUN_API_BASE, self.config.domain)
    }

    /// Basic auth header value for the `api` user
    fn auth_header(&self) -> String {
        let credentials = format!("api:{}", self.config.api_key);
        format!("Basic {}", BASE64.encode(credentials))
    }

    /// Send with retry logic
    async fn send_with_retry(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = Duration::from_millis(self.retry_delay_ms);

        loop {
            attempts += 1;

            debug!(
                "Sending email attempt {}/{} to {}",
                attempts,
                self.max_retries,
                mask_email(to)
            );

            let form = [
                ("from", self.config.from_address.as_str()),
                ("to", to),
                ("subject", subject),
                ("text", body),
            ];

            let response = self
                .client
                .post(self.messages_url())
                .header(reqwest::header::AUTHORIZATION, self.auth_header())
                .form(&form)
                .send()
                .await;

            match response {
                Ok(resp) if resp.status().is_success() => {
                    let message_id = resp
                        .json::<serde_json::Value>()
                        .await
                        .ok()
                        .and_then(|v| v.get("id").and_then(|id| id.as_str()).map(String::from))
                        .unwrap_or_default();

                    info!(
                        "Email sent successfully to {} with id: {}",
                        mask_email(to),
                        message_id
                    );
                    return Ok(message_id);
                }
                Ok(resp) => {
                    let status = resp.status();
                    let detail = resp.text().await.unwrap_or_default();
                    error!(
                        "Mailgun request failed (attempt {}/{}): {} {}",
                        attempts, self.max_retries, status, detail
                    );

                    // Client errors other than rate limiting never succeed on
                    // retry.
                    if status.is_client_error() && status.as_u16() != 429 {
                        return Err(InfrastructureError::Email(format!(
                            "Mailgun rejected the request: {} {}",
                            status, detail
                        )));
                    }

                    if attempts >= self.max_retries {
                        return Err(InfrastructureError::Email(format!(
                            "Failed to send email after {} attempts: {}",
                            self.max_retries, status
                        )));
                    }

                    if status.as_u16() == 429 {
                        warn!("Rate limit detected, backing off for {:?}", delay);
                    } else {
                        warn!("Server error detected, retrying after {:?}", delay);
                    }
                }
                Err(e) => {
                    error!(
                        "Failed to reach Mailgun (attempt {}/{}): {}",
                        attempts, self.max_retries, e
                    );

                    if attempts >= self.max_retries {
                        return Err(InfrastructureError::Email(format!(
                            "Failed to send email after {} attempts: {}",
                            self.max_retries, e
                        )));
                    }
                }
            }

            tokio::time::sleep(delay).await;
            delay *= 2;
        }
    }
}

#[async_trait]
impl EmailService for MailgunEmailService {
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, InfrastructureError> {
        if !is_valid_email(to) {
            return Err(InfrastructureError::Email(format!(
                "Invalid email address: {}",
                mask_email(to)
            )));
        }

        info!(
            "Sending email to {} via Mailgun (body length: {} chars)",
            mask_email(to),
            body.len()
        );

        self.send_with_retry(to, subject, body).await
    }

    fn provider_name(&self) -> &str {
        "Mailgun"
    }
}
