use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;
use serde_json::json;

use crate::user::errors::AuthError;

pub mod current_user;
pub mod login;
pub mod register;
pub mod update_profile;

/// Single field failure inside a validation error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// HTTP error taxonomy of the auth API.
///
/// Wire shapes:
/// * `Validation` - 400 `{"errors": [{"field", "message"}, ..]}`
/// * message variants - 4xx `{"msg": "..."}`
/// * `InternalServerError` - 500 plain-text `"Server Error"`; the detail is
///   logged server-side and never sent to the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    Validation(Vec<FieldError>),
    InvalidCredentials,
    RoleMismatch,
    UserAlreadyExists,
    Unauthorized(String),
    NotFound(String),
    InternalServerError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response()
            }
            ApiError::InvalidCredentials => msg_response(StatusCode::BAD_REQUEST, "Invalid credentials"),
            ApiError::RoleMismatch => msg_response(
                StatusCode::BAD_REQUEST,
                "Selected role does not match your account type",
            ),
            ApiError::UserAlreadyExists => {
                msg_response(StatusCode::BAD_REQUEST, "User already exists")
            }
            ApiError::Unauthorized(msg) => msg_response(StatusCode::UNAUTHORIZED, &msg),
            ApiError::NotFound(msg) => msg_response(StatusCode::NOT_FOUND, &msg),
            ApiError::InternalServerError(detail) => {
                tracing::error!(detail = %detail, "Internal error while handling auth request");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server Error").into_response()
            }
        }
    }
}

fn msg_response(status: StatusCode, msg: &str) -> Response {
    (status, Json(json!({ "msg": msg }))).into_response()
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => ApiError::InvalidCredentials,
            AuthError::RoleMismatch => ApiError::RoleMismatch,
            AuthError::EmailAlreadyExists => ApiError::UserAlreadyExists,
            AuthError::NotFound(_) => ApiError::NotFound(err.to_string()),
            AuthError::InvalidEmail(e) => {
                ApiError::Validation(vec![FieldError::new("email", e.to_string())])
            }
            AuthError::InvalidUserId(_) => {
                ApiError::Unauthorized("Token is not valid".to_string())
            }
            AuthError::Password(_)
            | AuthError::Token(_)
            | AuthError::DatabaseError(_)
            | AuthError::Unknown(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::InternalServerError(e.to_string())
    }
}

/// Response body for login and registration: the token only. Profile details
/// are fetched separately through `/api/auth/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenResponse {
    pub token: String,
}
