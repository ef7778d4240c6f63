//! One-time-password challenge embedded in the user record.

use chrono::{DateTime, Duration, Utc};
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Default expiration time for OTP challenges (5 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 5;

/// An outstanding OTP challenge for a user.
///
/// The code and its expiry always travel together: a user either holds a
/// whole challenge or none at all, so the pair can never be half-written.
/// Issuing a new challenge replaces the previous one unconditionally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpChallenge {
    /// The 6-digit verification code
    pub code: String,

    /// Timestamp when the challenge was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,
}

impl OtpChallenge {
    /// Creates a new challenge with a random 6-digit code and the default
    /// 5-minute expiry
    pub fn new() -> Self {
        Self::with_expiration(DEFAULT_EXPIRATION_MINUTES)
    }

    /// Creates a new challenge with a custom expiration time in minutes
    pub fn with_expiration(expiration_minutes: i64) -> Self {
        let now = Utc::now();
        Self {
            code: Self::generate_code(),
            created_at: now,
            expires_at: now + Duration::minutes(expiration_minutes),
        }
    }

    /// Generates a random 6-digit code in the range 100000..=999999
    ///
    /// Uses the OS CSPRNG. Codes never carry a leading zero, matching what
    /// recipients see in the delivery email.
    pub fn generate_code() -> String {
        let mut rng = OsRng;
        let mut bytes = [0u8; 4];
        rng.fill_bytes(&mut bytes);
        let num = u32::from_le_bytes(bytes);
        // Map into [100000, 999999]. The modulo bias is negligible for a
        // 6-digit code.
        let code = 100_000 + num % 900_000;
        format!("{}", code)
    }

    /// Checks if the challenge has expired
    ///
    /// Expiry is strict: a code presented at the exact expiry instant is
    /// already expired (`now >= expires_at`).
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// Checks whether the supplied code exactly matches this challenge
    pub fn matches(&self, input_code: &str) -> bool {
        self.code == input_code
    }

    /// Gets the time remaining until expiration, or zero if expired
    pub fn time_until_expiration(&self) -> Duration {
        let now = Utc::now();
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }
}

impl Default for OtpChallenge {
    fn default() -> Self {
        Self::new()
    }
}
