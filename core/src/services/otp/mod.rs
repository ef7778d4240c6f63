//! OTP issuance and verification lifecycle

pub mod config;
pub mod service;
pub mod traits;
pub mod types;

#[cfg(test)]
mod tests;

pub use config::{DuplicateRegistrationPolicy, OtpServiceConfig};
pub use service::OtpService;
pub use traits::EmailServiceTrait;
pub use types::SendOtpResult;
