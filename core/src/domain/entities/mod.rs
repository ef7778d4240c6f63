//! Domain entities

pub mod otp_challenge;
pub mod user;

pub use otp_challenge::OtpChallenge;
pub use user::User;
