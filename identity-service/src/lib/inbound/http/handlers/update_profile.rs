use axum::extract::State;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::current_user::UserProfileData;
use super::ApiError;
use crate::domain::user::errors::AuthError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::ports::AuthServicePort;
use crate::domain::user::ports::UserRepository;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// `PATCH /api/auth/me`
///
/// Partial profile update for the authenticated account. `id` and `role`
/// are not accepted here and cannot change through this route.
pub async fn update_profile<UR: UserRepository>(
    State(state): State<AppState<UR>>,
    Extension(authenticated): Extension<AuthenticatedUser>,
    Json(body): Json<UpdateProfileRequestBody>,
) -> Result<Json<UserProfileData>, ApiError> {
    let command = body.try_into_command()?;

    let user = state
        .auth_service
        .update_profile(&authenticated.user_id, command)
        .await?;

    Ok(Json((&user).into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateProfileRequestBody {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

impl UpdateProfileRequestBody {
    fn try_into_command(self) -> Result<UpdateProfileCommand, AuthError> {
        let email = self.email.map(EmailAddress::new).transpose()?;

        Ok(UpdateProfileCommand {
            first_name: self.first_name,
            last_name: self.last_name,
            email,
        })
    }
}
