use auth::Role;
use serde::Deserialize;
use serde::Serialize;

/// Read-projection of the authenticated user, trusted only after the
/// session token has been validated by the identity service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

impl AuthUser {
    /// Dashboard the role map assigns to this user.
    pub fn dashboard_path(&self) -> &'static str {
        self.role.dashboard_path()
    }
}

/// In-memory auth state driving all routing decisions.
///
/// `initialized` flips to true exactly once, when the first bootstrap
/// attempt resolves (success, failure, or "no token"); until then no route
/// decision may be made. `loading` is true only while a network validation
/// is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<AuthUser>,
    pub loading: bool,
    pub initialized: bool,
}

impl AuthState {
    /// State at application start: nothing known, bootstrap pending.
    pub fn initial() -> Self {
        Self {
            user: None,
            loading: true,
            initialized: false,
        }
    }

    /// Terminal state with no session.
    pub fn unauthenticated() -> Self {
        Self {
            user: None,
            loading: false,
            initialized: true,
        }
    }

    /// Terminal state with a verified session.
    pub fn authenticated(user: AuthUser) -> Self {
        Self {
            user: Some(user),
            loading: false,
            initialized: true,
        }
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self::initial()
    }
}

/// Mutable profile fields sent to the server on update. `id` and `role`
/// are deliberately absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Registration payload for sign-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpDetails {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Option<Role>,
}
