use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use fm_core::services::SendOtpResult;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupOtpRequest {
    /// Email address to register
    #[validate(email)]
    pub email: String,

    /// Given name
    #[validate(length(max = 100))]
    #[serde(default)]
    pub first_name: String,

    /// Family name
    #[validate(length(max = 100))]
    #[serde(default)]
    pub last_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendOtpRequest {
    /// Email address to issue a code for
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyOtpRequest {
    /// Email address the code was issued for
    #[validate(email)]
    pub email: String,

    /// 6-digit verification code
    #[validate(length(equal = 6))]
    pub otp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResendOtpRequest {
    /// Email address of the existing registration
    #[validate(email)]
    pub email: String,
}

/// Response body for endpoints that issue an OTP challenge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpIssuedResponse {
    pub email: String,
    pub expires_at: DateTime<Utc>,

    /// Issued code, present only in debug configurations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub otp: Option<String>,
}

impl From<SendOtpResult> for OtpIssuedResponse {
    fn from(result: SendOtpResult) -> Self {
        Self {
            email: result.email,
            expires_at: result.expires_at,
            otp: result.code,
        }
    }
}
