//! Configuration for the token service

use fm_shared::config::JwtConfig;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// Token expiry in seconds
    pub token_expiry_seconds: i64,
    /// Issuer claim
    pub issuer: String,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "development-secret-please-change-in-production".to_string(),
            token_expiry_seconds: 86400,
            issuer: "freshmart".to_string(),
        }
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            jwt_secret: config.secret.clone(),
            token_expiry_seconds: config.token_expiry,
            issuer: config.issuer.clone(),
        }
    }
}
