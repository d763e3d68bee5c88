pub mod claims;
pub mod errors;
pub mod handler;

pub use claims::SessionClaims;
pub use claims::TokenUser;
pub use claims::DEFAULT_TOKEN_VALIDITY_SECS;
pub use errors::JwtError;
pub use handler::JwtHandler;
