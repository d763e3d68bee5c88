use auth::Role;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::FieldError;
use super::TokenResponse;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::ports::AuthServicePort;
use crate::domain::user::ports::UserRepository;
use crate::inbound::http::router::AppState;

/// `POST /api/auth/login`
///
/// Request shape is validated before any credential lookup; invalid shape
/// short-circuits with a 400 and the store is never consulted.
pub async fn login<UR: UserRepository>(
    State(state): State<AppState<UR>>,
    Json(body): Json<LoginRequestBody>,
) -> Result<Json<TokenResponse>, ApiError> {
    let command = body.try_into_command()?;

    let issued = state.auth_service.login(command).await?;

    Ok(Json(TokenResponse {
        token: issued.token,
    }))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
    /// Role the caller expects to sign in as (optional)
    #[serde(default)]
    role: Option<String>,
}

impl LoginRequestBody {
    fn try_into_command(self) -> Result<LoginCommand, ApiError> {
        let mut errors = Vec::new();

        let email = if self.email.is_empty() {
            errors.push(FieldError::new("email", "Email is required"));
            None
        } else {
            match EmailAddress::new(self.email) {
                Ok(email) => Some(email),
                Err(_) => {
                    errors.push(FieldError::new("email", "Please include a valid email"));
                    None
                }
            }
        };

        if self.password.is_empty() {
            errors.push(FieldError::new("password", "Password is required"));
        }

        let expected_role = match self.role.as_deref() {
            None | Some("") => None,
            Some(raw) => match raw.parse::<Role>() {
                Ok(role) => Some(role),
                Err(_) => {
                    errors.push(FieldError::new("role", "Unknown role"));
                    None
                }
            },
        };

        match email {
            Some(email) if errors.is_empty() => Ok(LoginCommand {
                email,
                password: self.password,
                expected_role,
            }),
            _ => Err(ApiError::Validation(errors)),
        }
    }
}
