//! MySQL implementation of the UserRepository trait.
//!
//! Persists the user record with the OTP pair inline; code and expiry are
//! always written by the same statement, so the pair cannot be
//! half-updated. The unique index on `email` is what resolves concurrent
//! double-creates.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use fm_core::domain::entities::{OtpChallenge, User};
use fm_core::errors::DomainError;
use fm_core::repositories::UserRepository;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to get id: {}", e),
            })?;

        let otp_code: Option<String> = row.try_get("otp_code").map_err(|e| {
            DomainError::Internal {
                message: format!("Failed to get otp_code: {}", e),
            }
        })?;
        let otp_created_at: Option<DateTime<Utc>> =
            row.try_get("otp_created_at").map_err(|e| DomainError::Internal {
                message: format!("Failed to get otp_created_at: {}", e),
            })?;
        let otp_expires_at: Option<DateTime<Utc>> =
            row.try_get("otp_expires_at").map_err(|e| DomainError::Internal {
                message: format!("Failed to get otp_expires_at: {}", e),
            })?;

        // The pair invariant holds at the type level: a challenge exists
        // only when code and expiry are both present.
        let challenge = match (otp_code, otp_expires_at) {
            (Some(code), Some(expires_at)) => Some(OtpChallenge {
                code,
                created_at: otp_created_at.unwrap_or(expires_at),
                expires_at,
            }),
            _ => None,
        };

        Ok(User {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid UUID: {}", e),
            })?,
            email: row.try_get("email").map_err(|e| DomainError::Internal {
                message: format!("Failed to get email: {}", e),
            })?,
            first_name: row.try_get("first_name").map_err(|e| DomainError::Internal {
                message: format!("Failed to get first_name: {}", e),
            })?,
            last_name: row.try_get("last_name").map_err(|e| DomainError::Internal {
                message: format!("Failed to get last_name: {}", e),
            })?,
            challenge,
            is_email_verified: row.try_get("is_email_verified").map_err(|e| {
                DomainError::Internal {
                    message: format!("Failed to get is_email_verified: {}", e),
                }
            })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get created_at: {}", e),
                })?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get updated_at: {}", e),
                })?,
        })
    }

    /// Whether a sqlx error is a unique-constraint violation
    fn is_duplicate_key(error: &sqlx::Error) -> bool {
        matches!(
            error,
            sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23000")
        )
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, email, first_name, last_name,
                   otp_code, otp_created_at, otp_expires_at,
                   is_email_verified, created_at, updated_at
            FROM users
            WHERE email = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Database query failed: {}", e),
            })?;

        result.map(|row| Self::row_to_user(&row)).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, email, first_name, last_name,
                   otp_code, otp_created_at, otp_expires_at,
                   is_email_verified, created_at, updated_at
            FROM users
            WHERE id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Database query failed: {}", e),
            })?;

        result.map(|row| Self::row_to_user(&row)).transpose()
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (id, email, first_name, last_name,
                               otp_code, otp_created_at, otp_expires_at,
                               is_email_verified, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.email)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(user.challenge.as_ref().map(|c| c.code.as_str()))
            .bind(user.challenge.as_ref().map(|c| c.created_at))
            .bind(user.challenge.as_ref().map(|c| c.expires_at))
            .bind(user.is_email_verified)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if Self::is_duplicate_key(&e) {
                    DomainError::Validation {
                        message: "Email already registered".to_string(),
                    }
                } else {
                    DomainError::Internal {
                        message: format!("Failed to create user: {}", e),
                    }
                }
            })?;

        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        // Single statement: names, OTP pair, and verification flag move
        // together, never independently.
        let query = r#"
            UPDATE users
            SET first_name = ?, last_name = ?,
                otp_code = ?, otp_created_at = ?, otp_expires_at = ?,
                is_email_verified = ?, updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(user.challenge.as_ref().map(|c| c.code.as_str()))
            .bind(user.challenge.as_ref().map(|c| c.created_at))
            .bind(user.challenge.as_ref().map(|c| c.expires_at))
            .bind(user.is_email_verified)
            .bind(user.updated_at)
            .bind(user.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to update user: {}", e),
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: "User".to_string(),
            });
        }

        Ok(user)
    }
}
