//! Email Service Module
//!
//! Outbound email implementations for delivering verification codes and
//! other transactional mail.
//!
//! ## Features
//!
//! - **Email Service Trait**: Common interface for all providers
//! - **Mock Implementation**: Console output for development
//! - **Mailgun Support**: Production delivery via the Mailgun HTTP API
//! - **Security**: Recipient address masking in logs

pub mod email_service;
pub mod mailgun;
pub mod mock_email;

pub use email_service::{
    create_email_service, format_otp_body, EmailService, EmailServiceAdapter, OTP_EMAIL_SUBJECT,
};
pub use mailgun::MailgunEmailService;
pub use mock_email::MockEmailService;

#[cfg(test)]
mod tests;
