//! Email Service Interface
//!
//! Defines the trait for outbound email implementations that carry
//! verification codes and other transactional mail.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use fm_core::services::EmailServiceTrait;
use fm_shared::config::EmailConfig;

use crate::InfrastructureError;

/// Email service trait for sending transactional mail
///
/// Implementations include:
/// - Mailgun HTTP API
/// - Mock implementation for development
#[async_trait]
pub trait EmailService: Send + Sync {
    /// Send an email to a recipient
    ///
    /// # Arguments
    ///
    /// * `to` - The recipient's email address
    /// * `subject` - The message subject line
    /// * `body` - The plain-text message body
    ///
    /// # Returns
    ///
    /// * `Ok(message_id)` - Provider identifier for the sent message
    /// * `Err(InfrastructureError)` - If sending fails
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, InfrastructureError>;

    /// Get the service provider name
    fn provider_name(&self) -> &str;

    /// Check if the service is available
    ///
    /// Default implementation always returns true.
    async fn is_available(&self) -> bool {
        true
    }
}

/// Subject line used for verification-code emails
pub const OTP_EMAIL_SUBJECT: &str = "Your Freshmart verification code";

/// Format the standard verification-code message body
pub fn format_otp_body(code: &str) -> String {
    format!(
        "Hello!\n\n\
         Thank you for registering with Freshmart.\n\n\
         Your verification code is: {}\n\n\
         This code is valid for 5 minutes. Do not share it with anyone.\n\n\
         If you didn't request this verification, please ignore this email.",
        code
    )
}

/// Bridge from the transport-level [`EmailService`] to the domain-facing
/// delivery trait consumed by the OTP service.
///
/// The domain layer only knows "deliver this code to this address"; the
/// subject line and body template are an infrastructure concern and live
/// here.
pub struct EmailServiceAdapter {
    inner: Arc<dyn EmailService>,
}

impl EmailServiceAdapter {
    pub fn new(inner: Arc<dyn EmailService>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl EmailServiceTrait for EmailServiceAdapter {
    async fn send_otp_email(&self, email: &str, code: &str) -> Result<String, String> {
        self.inner
            .send_email(email, OTP_EMAIL_SUBJECT, &format_otp_body(code))
            .await
            .map_err(|e| e.to_string())
    }
}

/// Build the email transport from configuration
///
/// Falls back to the console mailer when no provider API key is set, so
/// development environments work without credentials.
pub fn create_email_service(config: &EmailConfig) -> Arc<dyn EmailService> {
    if config.is_configured() {
        info!(domain = %config.domain, "Using Mailgun email service");
        Arc::new(crate::email::MailgunEmailService::new(config.clone()))
    } else {
        info!("No email provider configured, using mock email service");
        Arc::new(crate::email::MockEmailService::new())
    }
}
