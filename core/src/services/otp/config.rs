//! Configuration for the OTP service

use crate::domain::entities::otp_challenge::DEFAULT_EXPIRATION_MINUTES;

/// Policy for signup requests against an already-verified email
///
/// Observed behavior differed between flow revisions, so this is an
/// explicit configuration decision rather than an assumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateRegistrationPolicy {
    /// Reject signup with an "already registered" error
    Reject,
    /// Silently issue a fresh challenge, allowing re-verification
    Reissue,
}

/// Configuration for the OTP service
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Number of minutes before an OTP challenge expires
    pub code_ttl_minutes: i64,
    /// How signup treats an already-verified email
    pub duplicate_registration: DuplicateRegistrationPolicy,
    /// Echo the generated code in operation results (debug/testing only;
    /// production leaves this off)
    pub expose_code: bool,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self {
            code_ttl_minutes: DEFAULT_EXPIRATION_MINUTES,
            duplicate_registration: DuplicateRegistrationPolicy::Reject,
            expose_code: false,
        }
    }
}
