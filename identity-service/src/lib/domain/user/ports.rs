use async_trait::async_trait;

use crate::domain::user::errors::AuthError;
use crate::domain::user::models::IssuedToken;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Port for authentication and account operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Verify credentials and issue a session token.
    ///
    /// The response carries only the token; profile details are fetched
    /// separately with it.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    ///   (indistinguishable by design)
    /// * `RoleMismatch` - Credentials valid but the asserted role differs
    ///   from the stored one
    /// * `DatabaseError` / `Token` - Infrastructure failure
    async fn login(&self, command: LoginCommand) -> Result<IssuedToken, AuthError>;

    /// Register a new account and issue a session token for it.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` / `Password` / `Token` - Infrastructure failure
    async fn register(&self, command: RegisterUserCommand) -> Result<IssuedToken, AuthError>;

    /// Retrieve the account behind a validated session.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn current_user(&self, id: &UserId) -> Result<User, AuthError>;

    /// Update the mutable profile fields of an account.
    ///
    /// `id` and `role` are never altered by this operation.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn update_profile(
        &self,
        id: &UserId,
        command: UpdateProfileCommand,
    ) -> Result<User, AuthError>;
}

/// Persistence operations for the credential store.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    ///   (case-insensitive)
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, AuthError>;

    /// Retrieve a user by identifier.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AuthError>;

    /// Retrieve a user by email, matched case-insensitively.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;

    /// Update an existing user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, user: User) -> Result<User, AuthError>;
}
