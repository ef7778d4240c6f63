//! User repository trait defining the interface for user data persistence.
//!
//! The OTP flow treats persistence as a keyed record store: look up by
//! email, create, and whole-record update. Implementations handle the
//! actual database operations while keeping the domain layer storage
//! agnostic.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// `update` replaces the whole record in one operation, so the OTP
/// code/expiry pair can never be half-written. `create` must fail when
/// the email already exists; the email column carries a unique
/// constraint, which is also what resolves concurrent double-creates.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by email address
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with the given email
    /// * `Err(DomainError)` - Storage error occurred
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by their unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Create a new user
    ///
    /// Fails with a validation error when a user with the same email
    /// already exists.
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Update an existing user, replacing the stored record
    async fn update(&self, user: User) -> Result<User, DomainError>;
}
