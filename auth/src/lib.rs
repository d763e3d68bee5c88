//! Authentication utilities library
//!
//! Provides the reusable authentication infrastructure shared by the
//! identity service and the session client:
//! - Password hashing (Argon2id)
//! - Session token generation and validation (JWT with an embedded role claim)
//! - The closed set of platform roles
//!
//! Each crate adapts these primitives through its own ports; this crate holds
//! no I/O and no storage.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, Role};
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue a session token
//! let result = auth.authenticate("password123", &hash, "user123", Role::Patient).unwrap();
//! println!("Token: {}", result.token);
//!
//! // Validate token
//! let claims = auth.validate_session(&result.token).unwrap();
//! assert_eq!(claims.user.role, Role::Patient);
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;
pub mod role;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::IssuedSession;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::SessionClaims;
pub use jwt::TokenUser;
pub use jwt::DEFAULT_TOKEN_VALIDITY_SECS;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use role::Role;
pub use role::RoleParseError;
