//! Business services

pub mod otp;
pub mod token;

pub use otp::{DuplicateRegistrationPolicy, EmailServiceTrait, OtpService, OtpServiceConfig, SendOtpResult};
pub use token::{Claims, TokenService, TokenServiceConfig};
