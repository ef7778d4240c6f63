//! Types for OTP service results

use chrono::{DateTime, Utc};

/// Result of issuing (or re-issuing) an OTP challenge
#[derive(Debug, Clone)]
pub struct SendOtpResult {
    /// Email address the code was issued for
    pub email: String,
    /// When the issued code expires
    pub expires_at: DateTime<Utc>,
    /// The generated code, present only when `expose_code` is enabled
    pub code: Option<String>,
}
