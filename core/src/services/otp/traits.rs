//! Traits for outbound email integration

use async_trait::async_trait;

/// Trait for the out-of-band OTP delivery channel
///
/// Delivery runs detached from the issuing request: implementations may
/// fail, and the caller logs the failure without surfacing it. A log-only
/// implementation is an acceptable substitute when no provider is
/// configured.
#[async_trait]
pub trait EmailServiceTrait: Send + Sync {
    /// Deliver the OTP to the given address
    ///
    /// Returns the provider message id on success.
    async fn send_otp_email(&self, email: &str, code: &str) -> Result<String, String>;
}
