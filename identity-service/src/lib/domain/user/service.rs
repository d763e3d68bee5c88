use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::user::errors::AuthError;
use crate::domain::user::models::IssuedToken;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::ports::AuthServicePort;
use crate::user::ports::UserRepository;

/// Domain service implementation for authentication operations.
///
/// Concrete implementation of AuthServicePort with dependency injection.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    /// Create a new auth service with injected dependencies.
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn login(&self, command: LoginCommand) -> Result<IssuedToken, AuthError> {
        let user = self
            .repository
            .find_by_email(command.email.as_str())
            .await?
            // Unknown email and wrong password must be indistinguishable
            .ok_or(AuthError::InvalidCredentials)?;

        let session = self
            .authenticator
            .authenticate(&command.password, &user.password_hash, user.id, user.role)
            .map_err(|e| match e {
                auth::AuthenticationError::InvalidCredentials => AuthError::InvalidCredentials,
                auth::AuthenticationError::PasswordError(err) => {
                    AuthError::Password(err.to_string())
                }
                auth::AuthenticationError::JwtError(err) => AuthError::Token(err.to_string()),
            })?;

        // Role assertion is checked only after the password, so a mismatch
        // never becomes a credential oracle
        if let Some(expected) = command.expected_role {
            if expected != user.role {
                tracing::warn!(
                    user_id = %user.id,
                    asserted = %expected,
                    "Login rejected: asserted role does not match account"
                );
                return Err(AuthError::RoleMismatch);
            }
        }

        Ok(IssuedToken {
            token: session.token,
            expires_at: session.claims.exp,
        })
    }

    async fn register(&self, command: RegisterUserCommand) -> Result<IssuedToken, AuthError> {
        let password_hash = self.authenticator.hash_password(&command.password)?;

        let user = User {
            id: UserId::new(),
            email: command.email,
            password_hash,
            first_name: command.first_name,
            last_name: command.last_name,
            role: command.role,
            created_at: Utc::now(),
        };

        let created = self.repository.create(user).await?;

        tracing::info!(user_id = %created.id, role = %created.role, "User registered");

        let session = self.authenticator.issue_session(created.id, created.role)?;

        Ok(IssuedToken {
            token: session.token,
            expires_at: session.claims.exp,
        })
    }

    async fn current_user(&self, id: &UserId) -> Result<User, AuthError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(AuthError::NotFound(id.to_string()))
    }

    async fn update_profile(
        &self,
        id: &UserId,
        command: UpdateProfileCommand,
    ) -> Result<User, AuthError> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(AuthError::NotFound(id.to_string()))?;

        if let Some(first_name) = command.first_name {
            user.first_name = first_name;
        }

        if let Some(last_name) = command.last_name {
            user.last_name = last_name;
        }

        if let Some(email) = command.email {
            user.email = email;
        }

        self.repository.update(user).await
    }
}
