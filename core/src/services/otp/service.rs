//! Main OTP service implementation
//!
//! Owns the create/update/validate/expire lifecycle of OTP challenges
//! bound to a user record, and hands off to the token service once a
//! challenge is verified.

use std::sync::Arc;

use fm_shared::utils::validation::{is_valid_email, mask_email};

use uuid::Uuid;

use crate::domain::entities::User;
use crate::domain::value_objects::{AuthResponse, UserSummary};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::UserRepository;
use crate::services::token::TokenService;

use super::config::{DuplicateRegistrationPolicy, OtpServiceConfig};
use super::traits::EmailServiceTrait;
use super::types::SendOtpResult;

/// OTP service for managing the email verification flow
pub struct OtpService<R, M>
where
    R: UserRepository,
    M: EmailServiceTrait + 'static,
{
    /// User repository for persistence
    user_repository: Arc<R>,
    /// Outbound email channel for code delivery
    email_service: Arc<M>,
    /// Token service for session issuance
    token_service: Arc<TokenService>,
    /// Service configuration
    config: OtpServiceConfig,
}

impl<R, M> OtpService<R, M>
where
    R: UserRepository,
    M: EmailServiceTrait + 'static,
{
    /// Create a new OTP service
    pub fn new(
        user_repository: Arc<R>,
        email_service: Arc<M>,
        token_service: Arc<TokenService>,
        config: OtpServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            email_service,
            token_service,
            config,
        }
    }

    /// Register a user by email, issuing an OTP challenge
    ///
    /// - Unknown email: creates a new unverified user with the given names
    ///   and a fresh challenge.
    /// - Known but unverified: overwrites the challenge and the names.
    /// - Known and verified: behavior follows the configured
    ///   [`DuplicateRegistrationPolicy`].
    ///
    /// The code is persisted before delivery is dispatched; delivery runs
    /// detached and its outcome never reaches the caller.
    pub async fn signup(
        &self,
        email: &str,
        first_name: &str,
        last_name: &str,
    ) -> DomainResult<SendOtpResult> {
        self.ensure_valid_email(email)?;

        let existing = self.user_repository.find_by_email(email).await?;

        if let Some(ref user) = existing {
            if user.is_email_verified
                && self.config.duplicate_registration == DuplicateRegistrationPolicy::Reject
            {
                tracing::warn!(
                    email = %mask_email(email),
                    event = "signup_rejected",
                    "Signup attempt for already-verified email"
                );
                return Err(DomainError::Auth(AuthError::EmailAlreadyRegistered));
            }
        }

        let names = (
            Some(first_name.to_string()).filter(|s| !s.is_empty()),
            Some(last_name.to_string()).filter(|s| !s.is_empty()),
        );

        let (user, code) = match existing {
            Some(mut user) => {
                let code = user.issue_challenge(self.config.code_ttl_minutes);
                user.set_names(names.0, names.1);
                (self.user_repository.update(user).await?, code)
            }
            None => {
                let mut user = User::new(email.to_string(), self.config.code_ttl_minutes);
                user.set_names(names.0, names.1);
                let code = user
                    .challenge
                    .as_ref()
                    .map(|c| c.code.clone())
                    .unwrap_or_default();
                (self.user_repository.create(user).await?, code)
            }
        };

        Ok(self.finish_issue(user, code))
    }

    /// Issue (or re-issue) an OTP challenge for an email address
    ///
    /// Creates the user record on first sight; otherwise overwrites the
    /// outstanding challenge unconditionally, verified or not.
    pub async fn send_otp(&self, email: &str) -> DomainResult<SendOtpResult> {
        self.ensure_valid_email(email)?;

        let (user, code) = match self.user_repository.find_by_email(email).await? {
            Some(mut user) => {
                let code = user.issue_challenge(self.config.code_ttl_minutes);
                (self.user_repository.update(user).await?, code)
            }
            None => {
                let user = User::new(email.to_string(), self.config.code_ttl_minutes);
                let code = user
                    .challenge
                    .as_ref()
                    .map(|c| c.code.clone())
                    .unwrap_or_default();
                (self.user_repository.create(user).await?, code)
            }
        };

        Ok(self.finish_issue(user, code))
    }

    /// Re-issue an OTP challenge for an existing user
    ///
    /// Fails with `UserNotFound` for unknown emails; otherwise behaves like
    /// the overwrite branch of `send_otp`, regardless of verified state.
    pub async fn resend_otp(&self, email: &str) -> DomainResult<SendOtpResult> {
        self.ensure_valid_email(email)?;

        let mut user = self
            .user_repository
            .find_by_email(email)
            .await?
            .ok_or(DomainError::Auth(AuthError::UserNotFound))?;

        let code = user.issue_challenge(self.config.code_ttl_minutes);
        let user = self.user_repository.update(user).await?;

        Ok(self.finish_issue(user, code))
    }

    /// Verify a submitted code and mint a session token
    ///
    /// The stored challenge is checked for exact match first, then for
    /// expiry (strict: a code at the exact expiry instant is expired).
    /// On success the challenge is cleared, the email marked verified, and
    /// a token issued for the user.
    pub async fn verify_otp(&self, email: &str, code: &str) -> DomainResult<AuthResponse> {
        let mut user = self
            .user_repository
            .find_by_email(email)
            .await?
            .ok_or(DomainError::Auth(AuthError::UserNotFound))?;

        let challenge = match user.challenge.as_ref() {
            Some(challenge) if challenge.matches(code) => challenge,
            _ => {
                tracing::warn!(
                    email = %mask_email(email),
                    event = "otp_verification_failed",
                    "Submitted code does not match the stored challenge"
                );
                return Err(DomainError::Auth(AuthError::InvalidOtp));
            }
        };

        if challenge.is_expired() {
            tracing::warn!(
                email = %mask_email(email),
                event = "otp_expired",
                "Submitted code matched but the challenge has expired"
            );
            return Err(DomainError::Auth(AuthError::OtpExpired));
        }

        user.verify_email();
        let user = self.user_repository.update(user).await?;

        let token = self.token_service.issue(user.id, &user.email)?;

        tracing::info!(
            email = %mask_email(email),
            event = "otp_verified",
            user_id = %user.id,
            "Email verified and session token issued"
        );

        Ok(AuthResponse::new(token, &user))
    }

    /// Fetch the redacted profile of an authenticated user
    pub async fn current_user(&self, user_id: Uuid) -> DomainResult<UserSummary> {
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::Auth(AuthError::UserNotFound))?;

        Ok(UserSummary::from(&user))
    }

    /// Common tail of the issue paths: log, dispatch delivery, build result
    fn finish_issue(&self, user: User, code: String) -> SendOtpResult {
        let expires_at = user
            .challenge
            .as_ref()
            .map(|c| c.expires_at)
            .unwrap_or_else(chrono::Utc::now);

        tracing::info!(
            email = %mask_email(&user.email),
            event = "otp_generated",
            expires_at = %expires_at,
            "Issued OTP challenge"
        );

        self.dispatch_delivery(user.email.clone(), code.clone());

        SendOtpResult {
            email: user.email,
            expires_at,
            code: Some(code).filter(|_| self.config.expose_code),
        }
    }

    /// Submit the delivery as a detached background task
    ///
    /// The caller never awaits this: the state mutation already succeeded,
    /// so a delivery failure is logged and absorbed. The stored challenge
    /// stays valid either way.
    fn dispatch_delivery(&self, email: String, code: String) {
        let mailer = Arc::clone(&self.email_service);
        tokio::spawn(async move {
            match mailer.send_otp_email(&email, &code).await {
                Ok(message_id) => {
                    tracing::info!(
                        email = %mask_email(&email),
                        event = "otp_email_sent",
                        message_id = %message_id,
                        "OTP email delivered"
                    );
                }
                Err(err) => {
                    tracing::error!(
                        email = %mask_email(&email),
                        event = "otp_email_failed",
                        error = %err,
                        "OTP email delivery failed; stored code remains valid"
                    );
                }
            }
        });
    }

    fn ensure_valid_email(&self, email: &str) -> DomainResult<()> {
        if !is_valid_email(email) {
            return Err(DomainError::Auth(AuthError::InvalidEmailFormat {
                email: mask_email(email),
            }));
        }
        Ok(())
    }
}
