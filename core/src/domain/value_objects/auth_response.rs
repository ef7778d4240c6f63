//! Authentication response value objects

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::User;

/// Redacted view of a user, safe to return to callers
///
/// Never carries the OTP code or challenge state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}

/// Result of a successful OTP verification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Signed session token
    pub token: String,

    /// Redacted user summary
    pub user: UserSummary,
}

impl AuthResponse {
    pub fn new(token: String, user: &User) -> Self {
        Self {
            token,
            user: UserSummary::from(user),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_redacts_challenge() {
        let user = User::new("alice@example.com".to_string(), 5);
        let summary = UserSummary::from(&user);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["email"], "alice@example.com");
        assert!(json.get("challenge").is_none());
        assert!(json.get("otp").is_none());
    }
}
