use thiserror::Error;

/// Client-side error taxonomy for session operations.
///
/// Mirrors the server's failure responses plus the purely local failures
/// (pre-validation, missing session, concurrent mutation).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    /// Request shape rejected, either locally before any network call or by
    /// the server's schema validation
    #[error("{0}")]
    Validation(String),

    /// Unknown email or wrong password; the server keeps the two
    /// indistinguishable
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Credentials valid but the asserted role differs from the account's
    #[error("Selected role does not match your account type")]
    RoleMismatch,

    /// Persisted token rejected by the identity fetch
    #[error("Session expired")]
    SessionExpired,

    /// Operation requires an authenticated user and there is none
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Another auth-mutating operation is already in flight
    #[error("Another sign-in attempt is already in progress")]
    OperationInFlight,

    /// Transport-level failure (connection refused, timeout, bad payload)
    #[error("Network error: {0}")]
    Network(String),

    /// The server failed internally; it never explains itself
    #[error("Server Error")]
    Server,
}
