//! Authentication route handlers
//!
//! Endpoints covering the email OTP lifecycle:
//! - Signup and code issuance
//! - Code verification and session token issuance
//! - Code resend for existing registrations
//! - Authenticated profile lookup

use std::sync::Arc;

use fm_core::repositories::UserRepository;
use fm_core::services::{EmailServiceTrait, OtpService, TokenService};

pub mod me;
pub mod resend_otp;
pub mod send_otp;
pub mod signup;
pub mod verify_otp;

pub use me::me;
pub use resend_otp::resend_otp;
pub use send_otp::send_otp;
pub use signup::signup_otp;
pub use verify_otp::verify_otp;

/// Application state that holds shared services
pub struct AppState<U, M>
where
    U: UserRepository,
    M: EmailServiceTrait + 'static,
{
    pub otp_service: Arc<OtpService<U, M>>,
    pub token_service: Arc<TokenService>,
}
