//! Authentication and token error definitions
//!
//! Error messages are presentation-agnostic; HTTP status mapping lives in
//! the api layer.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid email format: {email}")]
    InvalidEmailFormat { email: String },

    #[error("Invalid OTP")]
    InvalidOtp,

    #[error("OTP expired")]
    OtpExpired,

    #[error("User not found")]
    UserNotFound,

    #[error("Email already registered and verified")]
    EmailAlreadyRegistered,
}

impl AuthError {
    /// Machine-readable error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::InvalidEmailFormat { .. } => "INVALID_EMAIL_FORMAT",
            AuthError::InvalidOtp => "INVALID_OTP",
            AuthError::OtpExpired => "OTP_EXPIRED",
            AuthError::UserNotFound => "USER_NOT_FOUND",
            AuthError::EmailAlreadyRegistered => "EMAIL_ALREADY_REGISTERED",
        }
    }
}

/// Token-related errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Token signature verification failed")]
    InvalidSignature,

    #[error("Invalid token claims")]
    InvalidClaims,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

impl TokenError {
    /// Machine-readable error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::TokenExpired => "TOKEN_EXPIRED",
            TokenError::InvalidTokenFormat => "INVALID_TOKEN_FORMAT",
            TokenError::InvalidSignature => "INVALID_SIGNATURE",
            TokenError::InvalidClaims => "INVALID_CLAIMS",
            TokenError::TokenGenerationFailed => "TOKEN_GENERATION_FAILED",
        }
    }
}
