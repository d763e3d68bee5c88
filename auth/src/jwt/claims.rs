use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::role::Role;

/// Default session validity window: 360000 seconds (100 hours).
pub const DEFAULT_TOKEN_VALIDITY_SECS: i64 = 360_000;

/// Identity embedded in a session token.
///
/// Only the id and the role travel in the token; profile details are fetched
/// separately with the token itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenUser {
    pub id: String,
    pub role: Role,
}

/// Claims carried by a session token.
///
/// Tokens are immutable and time-bounded: once issued they cannot be revoked
/// server-side, they simply stop validating after `exp`. Logout is a
/// client-side discard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// Authenticated identity (id + role)
    pub user: TokenUser,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl SessionClaims {
    /// Create claims for a user session expiring after `validity_secs`.
    pub fn new(user_id: impl ToString, role: Role, validity_secs: i64) -> Self {
        let now = Utc::now();
        let expiration = now + Duration::seconds(validity_secs);

        Self {
            user: TokenUser {
                id: user_id.to_string(),
                role,
            },
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        }
    }

    /// Check whether the session has passed its expiry.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}
