use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// The closed set of platform roles.
///
/// Serialized as lowercase strings in tokens, the database, and API bodies.
/// Adding a role requires extending this enum; unknown role strings fail
/// parsing instead of flowing through as raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Patient,
    Hospital,
    Admin,
    Sales,
    Crm,
    Agent,
    Support,
}

/// Error for role parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleParseError {
    #[error("Unknown role: {0}")]
    Unknown(String),
}

impl Role {
    /// All roles, in a stable order. Useful for exhaustive checks in tests
    /// and for building selection lists.
    pub const ALL: [Role; 7] = [
        Role::Patient,
        Role::Hospital,
        Role::Admin,
        Role::Sales,
        Role::Crm,
        Role::Agent,
        Role::Support,
    ];

    /// Lowercase wire representation of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Patient => "patient",
            Role::Hospital => "hospital",
            Role::Admin => "admin",
            Role::Sales => "sales",
            Role::Crm => "crm",
            Role::Agent => "agent",
            Role::Support => "support",
        }
    }

    /// Dashboard path a freshly authenticated user of this role lands on.
    ///
    /// An exhaustive map rather than string interpolation, so a new role
    /// without a destination is a compile error, not a malformed path.
    pub fn dashboard_path(&self) -> &'static str {
        match self {
            Role::Patient => "/patient-dashboard",
            Role::Hospital => "/hospital-dashboard",
            Role::Admin => "/admin-dashboard",
            Role::Sales => "/sales-dashboard",
            Role::Crm => "/crm-dashboard",
            Role::Agent => "/agent-dashboard",
            Role::Support => "/support-dashboard",
        }
    }
}

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "patient" => Ok(Role::Patient),
            "hospital" => Ok(Role::Hospital),
            "admin" => Ok(Role::Admin),
            "sales" => Ok(Role::Sales),
            "crm" => Ok(Role::Crm),
            "agent" => Ok(Role::Agent),
            "support" => Ok(Role::Support),
            other => Err(RoleParseError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
