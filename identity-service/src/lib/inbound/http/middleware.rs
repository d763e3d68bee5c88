use auth::Role;
use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::inbound::http::router::AppState;

/// Extension type carrying the validated session identity through protected
/// routes. Built from token claims only; handlers load the full record when
/// they need it.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub role: Role,
}

/// Middleware that validates the bearer session token and adds the claimed
/// identity to request extensions
pub async fn authenticate<UR: UserRepository>(
    State(state): State<AppState<UR>>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)?;

    let claims = state.authenticator.validate_session(token).map_err(|e| {
        tracing::warn!("Session token validation failed: {}", e);
        unauthorized("Token is not valid")
    })?;

    let user_id = UserId::from_string(&claims.user.id).map_err(|e| {
        tracing::error!("Failed to parse user ID from token: {}", e);
        unauthorized("Token is not valid")
    })?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id,
        role: claims.user.role,
    });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| unauthorized("No token, authorization denied"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| unauthorized("Invalid Authorization header"))?;

    auth_str.strip_prefix("Bearer ").ok_or_else(|| {
        unauthorized("Invalid Authorization header format. Expected: Bearer <token>")
    })
}

fn unauthorized(msg: &str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "msg": msg }))).into_response()
}
