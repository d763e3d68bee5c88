//! Client-side session core for the medipay platform.
//!
//! Owns everything between "the user typed a password" and "a dashboard may
//! render": token persistence (with one-time cleanup of legacy per-role
//! keys), the bootstrap state machine that reconciles a persisted token with
//! a server-verified identity, the session store exposing
//! sign-in/sign-up/sign-out/update-profile, and the role route guard.
//!
//! The store is an explicit, dependency-injected object with a defined
//! lifecycle (init → bootstrap → mutate → teardown); nothing here is
//! process-global.

pub mod errors;
pub mod guard;
pub mod http_api;
pub mod models;
pub mod ports;
pub mod storage;
pub mod store;

// Re-export commonly used items
pub use errors::SessionError;
pub use guard::GuardOutcome;
pub use guard::RoutePolicy;
pub use http_api::HttpIdentityApi;
pub use models::AuthState;
pub use models::AuthUser;
pub use models::ProfileChanges;
pub use models::SignUpDetails;
pub use ports::IdentityApi;
pub use ports::TokenStore;
pub use storage::MemoryTokenStore;
pub use store::SessionStore;
