use auth::Role;
use axum::extract::State;
use axum::Extension;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use crate::domain::user::models::User;
use crate::domain::user::ports::AuthServicePort;
use crate::domain::user::ports::UserRepository;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// `GET /api/auth/me`
///
/// Identity fetch behind the bearer-token middleware. This is the call the
/// session bootstrapper makes on every application load.
pub async fn current_user<UR: UserRepository>(
    State(state): State<AppState<UR>>,
    Extension(authenticated): Extension<AuthenticatedUser>,
) -> Result<Json<UserProfileData>, ApiError> {
    let user = state
        .auth_service
        .current_user(&authenticated.user_id)
        .await?;

    Ok(Json((&user).into()))
}

/// Public projection of a user record. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfileData {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserProfileData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.as_str().to_string(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            role: user.role,
            created_at: user.created_at,
        }
    }
}
