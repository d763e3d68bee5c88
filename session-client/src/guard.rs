use auth::Role;

use crate::models::AuthState;

/// Role constraints a route declares.
///
/// `required_role` and `allowed_roles` are both enforced when both are
/// present; a user must satisfy every constraint the route names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutePolicy {
    pub required_role: Option<Role>,
    pub allowed_roles: Option<Vec<Role>>,
}

impl RoutePolicy {
    /// Policy with no role constraint: any authenticated user passes.
    pub fn authenticated_only() -> Self {
        Self::default()
    }

    /// Policy requiring exactly one role.
    pub fn require(role: Role) -> Self {
        Self {
            required_role: Some(role),
            allowed_roles: None,
        }
    }

    /// Policy allowing any of the given roles.
    pub fn allow(roles: impl Into<Vec<Role>>) -> Self {
        Self {
            required_role: None,
            allowed_roles: Some(roles.into()),
        }
    }
}

/// What the router should do with a navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Auth state not yet initialized; hold rendering, never redirect
    Pending,
    /// No authenticated user; send to the login view
    RedirectToLogin,
    /// Authenticated but the role fails the policy; send to the
    /// unauthorized view
    RedirectToUnauthorized,
    /// Render the protected route; carries the dashboard the role map
    /// assigns to the user
    Allow { dashboard: &'static str },
}

impl RoutePolicy {
    /// Evaluate this policy against the current auth state.
    ///
    /// Decision order is fixed: an uninitialized state is always `Pending`
    /// (a slow bootstrap must not bounce a signed-in user to login), then
    /// missing user, then `required_role`, then `allowed_roles`.
    pub fn evaluate(&self, state: &AuthState) -> GuardOutcome {
        if !state.initialized {
            return GuardOutcome::Pending;
        }

        let Some(user) = &state.user else {
            return GuardOutcome::RedirectToLogin;
        };

        if let Some(required) = self.required_role {
            if user.role != required {
                tracing::debug!(
                    role = %user.role,
                    required = %required,
                    "Role failed route requirement"
                );
                return GuardOutcome::RedirectToUnauthorized;
            }
        }

        if let Some(allowed) = &self.allowed_roles {
            if !allowed.contains(&user.role) {
                tracing::debug!(role = %user.role, "Role not in route allow-list");
                return GuardOutcome::RedirectToUnauthorized;
            }
        }

        GuardOutcome::Allow {
            dashboard: user.role.dashboard_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AuthUser;

    fn user_with_role(role: Role) -> AuthUser {
        AuthUser {
            id: "user-1".to_string(),
            email: "test@example.com".to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            role,
        }
    }

    #[test]
    fn test_uninitialized_state_never_redirects() {
        let policy = RoutePolicy::require(Role::Admin);

        // Regardless of what the rest of the state says
        let empty = AuthState::initial();
        assert_eq!(policy.evaluate(&empty), GuardOutcome::Pending);

        let wrong_role = AuthState {
            user: Some(user_with_role(Role::Patient)),
            loading: false,
            initialized: false,
        };
        assert_eq!(policy.evaluate(&wrong_role), GuardOutcome::Pending);
    }

    #[test]
    fn test_missing_user_redirects_to_login() {
        let policy = RoutePolicy::authenticated_only();
        assert_eq!(
            policy.evaluate(&AuthState::unauthenticated()),
            GuardOutcome::RedirectToLogin
        );
    }

    #[test]
    fn test_required_role_mismatch_redirects_to_unauthorized() {
        let policy = RoutePolicy::require(Role::Admin);
        let state = AuthState::authenticated(user_with_role(Role::Patient));

        assert_eq!(policy.evaluate(&state), GuardOutcome::RedirectToUnauthorized);
    }

    #[test]
    fn test_required_role_match_allows_with_dashboard() {
        let policy = RoutePolicy::require(Role::Admin);
        let state = AuthState::authenticated(user_with_role(Role::Admin));

        assert_eq!(
            policy.evaluate(&state),
            GuardOutcome::Allow {
                dashboard: "/admin-dashboard"
            }
        );
    }

    #[test]
    fn test_allowed_roles_enforced() {
        let policy = RoutePolicy::allow([Role::Sales, Role::Crm]);

        let crm = AuthState::authenticated(user_with_role(Role::Crm));
        assert_eq!(
            policy.evaluate(&crm),
            GuardOutcome::Allow {
                dashboard: "/crm-dashboard"
            }
        );

        let patient = AuthState::authenticated(user_with_role(Role::Patient));
        assert_eq!(
            policy.evaluate(&patient),
            GuardOutcome::RedirectToUnauthorized
        );
    }

    #[test]
    fn test_both_constraints_must_pass() {
        // Contradictory policy: required role is not in the allow-list, so
        // nobody passes
        let policy = RoutePolicy {
            required_role: Some(Role::Admin),
            allowed_roles: Some(vec![Role::Sales]),
        };

        let admin = AuthState::authenticated(user_with_role(Role::Admin));
        assert_eq!(policy.evaluate(&admin), GuardOutcome::RedirectToUnauthorized);

        let sales = AuthState::authenticated(user_with_role(Role::Sales));
        assert_eq!(policy.evaluate(&sales), GuardOutcome::RedirectToUnauthorized);
    }

    #[test]
    fn test_no_constraints_allows_any_authenticated_user() {
        let policy = RoutePolicy::authenticated_only();

        for role in Role::ALL {
            let state = AuthState::authenticated(user_with_role(role));
            assert_eq!(
                policy.evaluate(&state),
                GuardOutcome::Allow {
                    dashboard: role.dashboard_path()
                }
            );
        }
    }
}
