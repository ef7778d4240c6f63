//! User entity representing a shopper account in the Freshmart system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::otp_challenge::OtpChallenge;

/// User entity keyed by email address
///
/// A user starts unverified with an outstanding OTP challenge; successful
/// verification clears the challenge and sets the flag. The record is never
/// deleted by the authentication flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Email address (unique, stored case-sensitively)
    pub email: String,

    /// Given name, set during signup
    pub first_name: Option<String>,

    /// Family name, set during signup
    pub last_name: Option<String>,

    /// Outstanding OTP challenge, if any. Code and expiry live together
    /// here so the pair is always present or absent as a whole.
    pub challenge: Option<OtpChallenge>,

    /// Whether the user's email address has been verified
    pub is_email_verified: bool,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new unverified user with a fresh OTP challenge
    pub fn new(email: String, ttl_minutes: i64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            first_name: None,
            last_name: None,
            challenge: Some(OtpChallenge::with_expiration(ttl_minutes)),
            is_email_verified: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces any outstanding challenge with a fresh one
    ///
    /// Returns the generated code so the caller can hand it to the mailer.
    /// The previous code, if any, becomes invalid immediately.
    pub fn issue_challenge(&mut self, ttl_minutes: i64) -> String {
        let challenge = OtpChallenge::with_expiration(ttl_minutes);
        let code = challenge.code.clone();
        self.challenge = Some(challenge);
        self.updated_at = Utc::now();
        code
    }

    /// Marks the email as verified and clears the challenge pair
    pub fn verify_email(&mut self) {
        self.is_email_verified = true;
        self.challenge = None;
        self.updated_at = Utc::now();
    }

    /// Updates the profile names
    pub fn set_names(&mut self, first_name: Option<String>, last_name: Option<String>) {
        self.first_name = first_name;
        self.last_name = last_name;
        self.updated_at = Utc::now();
    }

    /// Whether an OTP challenge is currently outstanding
    pub fn has_pending_challenge(&self) -> bool {
        self.challenge.is_some()
    }
}
