//! Behavioral tests for the OTP issuance/verification lifecycle

use chrono::{Duration, Utc};
use std::sync::Arc;

use crate::errors::{AuthError, DomainError};
use crate::repositories::{MockUserRepository, UserRepository};
use crate::services::otp::config::{DuplicateRegistrationPolicy, OtpServiceConfig};
use crate::services::otp::service::OtpService;
use crate::services::token::{TokenService, TokenServiceConfig};

use super::mocks::MockEmailService;

fn test_config() -> OtpServiceConfig {
    OtpServiceConfig {
        code_ttl_minutes: 5,
        duplicate_registration: DuplicateRegistrationPolicy::Reject,
        expose_code: true,
    }
}

fn build_service(
    repo: Arc<MockUserRepository>,
    mailer: Arc<MockEmailService>,
    config: OtpServiceConfig,
) -> OtpService<MockUserRepository, MockEmailService> {
    let token_service = Arc::new(TokenService::new(TokenServiceConfig {
        jwt_secret: "test-secret".to_string(),
        token_expiry_seconds: 3600,
        issuer: "freshmart".to_string(),
    }));
    OtpService::new(repo, mailer, token_service, config)
}

#[tokio::test]
async fn test_send_otp_creates_unverified_record() {
    let repo = Arc::new(MockUserRepository::new());
    let mailer = Arc::new(MockEmailService::new());
    let service = build_service(repo.clone(), mailer, test_config());

    let result = service.send_otp("alice@example.com").await.unwrap();
    assert_eq!(result.email, "alice@example.com");
    assert!(result.code.is_some());

    let user = repo
        .find_by_email("alice@example.com")
        .await
        .unwrap()
        .expect("record should exist");
    assert!(!user.is_email_verified);
    assert!(user.first_name.is_none());

    let challenge = user.challenge.expect("challenge should be stored");
    let remaining = challenge.expires_at - Utc::now();
    assert!(remaining > Duration::minutes(4));
    assert!(remaining <= Duration::minutes(5));
    assert_eq!(repo.count().await, 1);
}

#[tokio::test]
async fn test_signup_stores_names() {
    let repo = Arc::new(MockUserRepository::new());
    let mailer = Arc::new(MockEmailService::new());
    let service = build_service(repo.clone(), mailer, test_config());

    service
        .signup("alice@example.com", "Alice", "Smith")
        .await
        .unwrap();

    let user = repo.find_by_email("alice@example.com").await.unwrap().unwrap();
    assert_eq!(user.first_name.as_deref(), Some("Alice"));
    assert_eq!(user.last_name.as_deref(), Some("Smith"));
    assert!(!user.is_email_verified);
}

#[tokio::test]
async fn test_signup_overwrites_unverified_user() {
    let repo = Arc::new(MockUserRepository::new());
    let mailer = Arc::new(MockEmailService::new());
    let service = build_service(repo.clone(), mailer, test_config());

    let first = service.send_otp("alice@example.com").await.unwrap();
    let second = service
        .signup("alice@example.com", "Alice", "Smith")
        .await
        .unwrap();

    assert_ne!(first.code, second.code);
    assert_eq!(repo.count().await, 1);

    let user = repo.find_by_email("alice@example.com").await.unwrap().unwrap();
    assert_eq!(user.first_name.as_deref(), Some("Alice"));
    assert_eq!(
        user.challenge.as_ref().map(|c| c.code.clone()),
        second.code
    );
}

#[tokio::test]
async fn test_signup_rejects_verified_email_under_reject_policy() {
    let repo = Arc::new(MockUserRepository::new());
    let mailer = Arc::new(MockEmailService::new());
    let service = build_service(repo.clone(), mailer, test_config());

    let issued = service.send_otp("alice@example.com").await.unwrap();
    service
        .verify_otp("alice@example.com", &issued.code.unwrap())
        .await
        .unwrap();

    let result = service.signup("alice@example.com", "Alice", "Smith").await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::EmailAlreadyRegistered))
    ));
}

#[tokio::test]
async fn test_signup_reissues_for_verified_email_under_reissue_policy() {
    let repo = Arc::new(MockUserRepository::new());
    let mailer = Arc::new(MockEmailService::new());
    let config = OtpServiceConfig {
        duplicate_registration: DuplicateRegistrationPolicy::Reissue,
        ..test_config()
    };
    let service = build_service(repo.clone(), mailer, config);

    let issued = service.send_otp("alice@example.com").await.unwrap();
    service
        .verify_otp("alice@example.com", &issued.code.unwrap())
        .await
        .unwrap();

    let result = service
        .signup("alice@example.com", "Alice", "Smith")
        .await
        .unwrap();
    assert!(result.code.is_some());

    let user = repo.find_by_email("alice@example.com").await.unwrap().unwrap();
    assert!(user.has_pending_challenge());
}

#[tokio::test]
async fn test_verify_success_clears_challenge_and_issues_token() {
    let repo = Arc::new(MockUserRepository::new());
    let mailer = Arc::new(MockEmailService::new());
    let service = build_service(repo.clone(), mailer, test_config());

    let issued = service.send_otp("alice@example.com").await.unwrap();
    let code = issued.code.unwrap();

    let auth = service.verify_otp("alice@example.com", &code).await.unwrap();
    assert!(!auth.token.is_empty());
    assert_eq!(auth.user.email, "alice@example.com");

    let user = repo.find_by_email("alice@example.com").await.unwrap().unwrap();
    assert!(user.is_email_verified);
    assert!(user.challenge.is_none());

    // Replaying the consumed code fails: the pair is gone.
    let replay = service.verify_otp("alice@example.com", &code).await;
    assert!(matches!(
        replay,
        Err(DomainError::Auth(AuthError::InvalidOtp))
    ));
}

#[tokio::test]
async fn test_verify_unknown_email_fails_not_found() {
    let repo = Arc::new(MockUserRepository::new());
    let mailer = Arc::new(MockEmailService::new());
    let service = build_service(repo, mailer, test_config());

    let result = service.verify_otp("ghost@example.com", "123456").await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::UserNotFound))
    ));
}

#[tokio::test]
async fn test_verify_wrong_code_fails() {
    let repo = Arc::new(MockUserRepository::new());
    let mailer = Arc::new(MockEmailService::new());
    let service = build_service(repo.clone(), mailer, test_config());

    let issued = service.send_otp("alice@example.com").await.unwrap();
    let code = issued.code.unwrap();
    let wrong = if code == "123456" { "654321" } else { "123456" };

    let result = service.verify_otp("alice@example.com", wrong).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::InvalidOtp))
    ));

    // The challenge survives a failed attempt.
    let user = repo.find_by_email("alice@example.com").await.unwrap().unwrap();
    assert!(user.has_pending_challenge());
    assert!(!user.is_email_verified);
}

#[tokio::test]
async fn test_verify_expired_code_fails() {
    let repo = Arc::new(MockUserRepository::new());
    let mailer = Arc::new(MockEmailService::new());
    let config = OtpServiceConfig {
        code_ttl_minutes: 0,
        ..test_config()
    };
    let service = build_service(repo, mailer, config);

    let issued = service.send_otp("alice@example.com").await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;

    let result = service
        .verify_otp("alice@example.com", &issued.code.unwrap())
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::OtpExpired))
    ));
}

#[tokio::test]
async fn test_resend_unknown_email_fails_not_found() {
    let repo = Arc::new(MockUserRepository::new());
    let mailer = Arc::new(MockEmailService::new());
    let service = build_service(repo, mailer, test_config());

    let result = service.resend_otp("ghost@example.com").await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::UserNotFound))
    ));
}

#[tokio::test]
async fn test_resend_invalidates_previous_code() {
    let repo = Arc::new(MockUserRepository::new());
    let mailer = Arc::new(MockEmailService::new());
    let service = build_service(repo.clone(), mailer, test_config());

    let first = service.send_otp("alice@example.com").await.unwrap();
    let second = service.resend_otp("alice@example.com").await.unwrap();

    let first_code = first.code.unwrap();
    let second_code = second.code.unwrap();

    // The superseded code fails even though it has not yet expired.
    if first_code != second_code {
        let result = service.verify_otp("alice@example.com", &first_code).await;
        assert!(matches!(
            result,
            Err(DomainError::Auth(AuthError::InvalidOtp))
        ));
    }

    // Only the most recent code validates.
    service
        .verify_otp("alice@example.com", &second_code)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_resend_allowed_for_verified_user() {
    let repo = Arc::new(MockUserRepository::new());
    let mailer = Arc::new(MockEmailService::new());
    let service = build_service(repo.clone(), mailer, test_config());

    let issued = service.send_otp("alice@example.com").await.unwrap();
    service
        .verify_otp("alice@example.com", &issued.code.unwrap())
        .await
        .unwrap();

    // Re-issuing is always permitted here, verified or not.
    let result = service.resend_otp("alice@example.com").await.unwrap();
    assert!(result.code.is_some());
}

#[tokio::test]
async fn test_delivery_failure_does_not_block_verification() {
    let repo = Arc::new(MockUserRepository::new());
    let mailer = Arc::new(MockEmailService::failing());
    let service = build_service(repo.clone(), mailer.clone(), test_config());

    let issued = service.send_otp("alice@example.com").await.unwrap();
    let code = issued.code.unwrap();

    // Give the detached delivery task a chance to run and fail.
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    assert_eq!(mailer.sent_count().await, 1);

    // The stored code is still valid despite the delivery failure.
    let auth = service.verify_otp("alice@example.com", &code).await.unwrap();
    assert!(!auth.token.is_empty());
}

#[tokio::test]
async fn test_code_hidden_without_expose_flag() {
    let repo = Arc::new(MockUserRepository::new());
    let mailer = Arc::new(MockEmailService::new());
    let config = OtpServiceConfig {
        expose_code: false,
        ..test_config()
    };
    let service = build_service(repo, mailer.clone(), config);

    let result = service.send_otp("alice@example.com").await.unwrap();
    assert!(result.code.is_none());

    // The mailer still received the real code.
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    let sent = mailer.sent.lock().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].1.len(), 6);
}

#[tokio::test]
async fn test_invalid_email_rejected() {
    let repo = Arc::new(MockUserRepository::new());
    let mailer = Arc::new(MockEmailService::new());
    let service = build_service(repo.clone(), mailer, test_config());

    let result = service.send_otp("not-an-email").await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::InvalidEmailFormat { .. }))
    ));
    assert_eq!(repo.count().await, 0);
}

#[tokio::test]
async fn test_current_user_returns_redacted_profile() {
    let repo = Arc::new(MockUserRepository::new());
    let mailer = Arc::new(MockEmailService::new());
    let service = build_service(repo.clone(), mailer, test_config());

    let issued = service
        .signup("alice@example.com", "Alice", "Smith")
        .await
        .unwrap();
    service
        .verify_otp("alice@example.com", &issued.code.unwrap())
        .await
        .unwrap();

    let user = repo.find_by_email("alice@example.com").await.unwrap().unwrap();
    let summary = service.current_user(user.id).await.unwrap();

    assert_eq!(summary.email, "alice@example.com");
    assert_eq!(summary.first_name.as_deref(), Some("Alice"));
}

#[tokio::test]
async fn test_current_user_unknown_id_fails_not_found() {
    let repo = Arc::new(MockUserRepository::new());
    let mailer = Arc::new(MockEmailService::new());
    let service = build_service(repo, mailer, test_config());

    let result = service.current_user(uuid::Uuid::new_v4()).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::UserNotFound))
    ));
}
