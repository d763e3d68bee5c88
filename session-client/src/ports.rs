use async_trait::async_trait;
use auth::Role;

use crate::errors::SessionError;
use crate::models::AuthUser;
use crate::models::ProfileChanges;
use crate::models::SignUpDetails;

/// Port over the identity service's HTTP API.
#[async_trait]
pub trait IdentityApi: Send + Sync + 'static {
    /// Exchange credentials for a session token.
    ///
    /// # Errors
    /// * `Validation` - Request shape rejected by the server
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `RoleMismatch` - Asserted role differs from the stored one
    /// * `Network` / `Server` - Transport or server failure
    async fn login(
        &self,
        email: &str,
        password: &str,
        expected_role: Option<Role>,
    ) -> Result<String, SessionError>;

    /// Register a new account and receive a session token for it.
    ///
    /// # Errors
    /// * `Validation` - Request shape rejected (including duplicate email)
    /// * `Network` / `Server` - Transport or server failure
    async fn register(&self, details: &SignUpDetails) -> Result<String, SessionError>;

    /// Fetch the identity behind a session token.
    ///
    /// # Errors
    /// * `SessionExpired` - Token rejected (expired, tampered, malformed)
    /// * `Network` / `Server` - Transport or server failure
    async fn fetch_current_user(&self, token: &str) -> Result<AuthUser, SessionError>;

    /// Send changed profile fields; returns the updated profile.
    ///
    /// # Errors
    /// * `SessionExpired` - Token rejected
    /// * `Validation` - Rejected fields
    /// * `Network` / `Server` - Transport or server failure
    async fn update_profile(
        &self,
        token: &str,
        changes: &ProfileChanges,
    ) -> Result<AuthUser, SessionError>;
}

/// Port over persistent key-value token storage (the browser's local
/// storage in the original system). Synchronous by design; implementations
/// must not block.
pub trait TokenStore: Send + Sync + 'static {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}
