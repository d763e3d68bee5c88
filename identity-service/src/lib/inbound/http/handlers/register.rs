use auth::Role;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::FieldError;
use super::TokenResponse;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::ports::AuthServicePort;
use crate::domain::user::ports::UserRepository;
use crate::inbound::http::router::AppState;

const MIN_PASSWORD_LENGTH: usize = 6;

/// `POST /api/auth/register`
///
/// On success the new account is immediately signed in: the response is the
/// same `{token}` shape as login.
pub async fn register<UR: UserRepository>(
    State(state): State<AppState<UR>>,
    Json(body): Json<RegisterRequestBody>,
) -> Result<Json<TokenResponse>, ApiError> {
    let command = body.try_into_command()?;

    let issued = state.auth_service.register(command).await?;

    Ok(Json(TokenResponse {
        token: issued.token,
    }))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequestBody {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    /// Defaults to `patient` when omitted
    #[serde(default)]
    role: Option<String>,
}

impl RegisterRequestBody {
    fn try_into_command(self) -> Result<RegisterUserCommand, ApiError> {
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

        // Server-side mirror of the client's pre-validation; counts
        // characters, not bytes
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            errors.push(FieldError::new(
                "password",
                "Password must be at least 6 characters long",
            ));
        }

        if self.first_name.is_empty() {
            errors.push(FieldError::new("first_name", "First name is required"));
        }

        if self.last_name.is_empty() {
            errors.push(FieldError::new("last_name", "Last name is required"));
        }

        let role = match self.role.as_deref() {
            None | Some("") => Role::Patient,
            Some(raw) => match raw.parse::<Role>() {
                Ok(role) => role,
                Err(_) => {
                    errors.push(FieldError::new("role", "Unknown role"));
                    Role::Patient
                }
            },
        };

        match email {
            Some(email) if errors.is_empty() => Ok(RegisterUserCommand {
                email,
                password: self.password,
                first_name: self.first_name,
                last_name: self.last_name,
                role,
            }),
            _ => Err(ApiError::Validation(errors)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(email: &str, password: &str, role: Option<&str>) -> RegisterRequestBody {
        RegisterRequestBody {
            email: email.to_string(),
            password: password.to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            role: role.map(|r| r.to_string()),
        }
    }

    #[test]
    fn test_valid_body_with_role() {
        let command = body("new@example.com", "password123", Some("sales"))
            .try_into_command()
            .unwrap();
        assert_eq!(command.role, Role::Sales);
    }

    #[test]
    fn test_role_defaults_to_patient() {
        let command = body("new@example.com", "password123", None)
            .try_into_command()
            .unwrap();
        assert_eq!(command.role, Role::Patient);
    }

    #[test]
    fn test_short_password_rejected() {
        let result = body("new@example.com", "short", None).try_into_command();

        let Err(ApiError::Validation(errors)) = result else {
            panic!("expected validation error");
        };
        assert_eq!(errors[0].field, "password");
        assert_eq!(
            errors[0].message,
            "Password must be at least 6 characters long"
        );
    }

    #[test]
    fn test_password_length_counts_characters_not_bytes() {
        // 5 characters, 6 bytes
        let result = body("new@example.com", "p\u{e4}ss5", None).try_into_command();

        let Err(ApiError::Validation(errors)) = result else {
            panic!("expected validation error");
        };
        assert_eq!(errors[0].field, "password");
    }

    #[test]
    fn test_missing_names_rejected() {
        let result = RegisterRequestBody {
            email: "new@example.com".to_string(),
            password: "password123".to_string(),
            first_name: String::new(),
            last_name: String::new(),
            role: None,
        }
        .try_into_command();

        let Err(ApiError::Validation(errors)) = result else {
            panic!("expected validation error");
        };
        assert_eq!(errors.len(), 2);
    }
}
