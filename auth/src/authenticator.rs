use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::SessionClaims;
use crate::jwt::DEFAULT_TOKEN_VALIDITY_SECS;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::role::Role;

/// Authentication coordinator combining password verification and session
/// token issuance.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    validity_secs: i64,
}

/// Result of successful authentication.
pub struct IssuedSession {
    /// Signed session token
    pub token: String,
    /// Claims embedded in the token
    pub claims: SessionClaims,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create an authenticator with the default 360000-second session window.
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self::with_validity(jwt_secret, DEFAULT_TOKEN_VALIDITY_SECS)
    }

    /// Create an authenticator with an explicit session validity window.
    pub fn with_validity(jwt_secret: &[u8], validity_secs: i64) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
            validity_secs,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a session token for the user.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is unreadable
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        user_id: impl ToString,
        role: Role,
    ) -> Result<IssuedSession, AuthenticationError> {
        let is_valid = self.password_hasher.verify(password, stored_hash)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issue_session(user_id, role)?)
    }

    /// Issue a session token without password verification.
    ///
    /// Used right after registration, where the plaintext password was just
    /// hashed and no stored hash exists yet.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_session(
        &self,
        user_id: impl ToString,
        role: Role,
    ) -> Result<IssuedSession, JwtError> {
        let claims = SessionClaims::new(user_id, role, self.validity_secs);
        let token = self.jwt_handler.encode(&claims)?;

        Ok(IssuedSession { token, claims })
    }

    /// Validate a session token and return its claims.
    ///
    /// # Errors
    /// * `JwtError` - Token is expired, tampered, or malformed
    pub fn validate_session(&self, token: &str) -> Result<SessionClaims, JwtError> {
        self.jwt_handler.decode(token)
    }
}
