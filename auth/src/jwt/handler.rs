use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::SessionClaims;
use super::errors::JwtError;

/// Session token handler for encoding and decoding tokens.
///
/// Uses HS256 (HMAC with SHA-256). Every issued token carries an `exp`
/// claim, and expiry is enforced on decode.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new handler with a signing secret.
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Encode session claims into a signed token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &SessionClaims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a session token.
    ///
    /// Checks the signature and the expiry claim.
    ///
    /// # Errors
    /// * `TokenExpired` - Token has passed its expiry
    /// * `InvalidToken` - Signature is invalid
    /// * `DecodingFailed` - Token is malformed
    pub fn decode(&self, token: &str) -> Result<SessionClaims, JwtError> {
        let validation = Validation::new(self.algorithm);

        let token_data =
            decode::<SessionClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                    ErrorKind::InvalidSignature => JwtError::InvalidToken(e.to_string()),
                    _ => JwtError::DecodingFailed(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::Role;

    #[test]
    fn test_encode_and_decode() {
        let handler = JwtHandler::new(b"my_secret_key_at_least_32_bytes_long!");

        let claims = SessionClaims::new("user123", Role::Admin, 3600);

        let token = handler.encode(&claims).expect("Failed to encode token");
        assert!(!token.is_empty());

        let decoded = handler.decode(&token).expect("Failed to decode token");
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_decode_malformed_token() {
        let handler = JwtHandler::new(b"my_secret_key_at_least_32_bytes_long!");

        let result = handler.decode("invalid.token.here");
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_with_wrong_secret() {
        let handler1 = JwtHandler::new(b"secret1_at_least_32_bytes_long_key!");
        let handler2 = JwtHandler::new(b"secret2_at_least_32_bytes_long_key!");

        let claims = SessionClaims::new("user123", Role::Sales, 3600);
        let token = handler1.encode(&claims).expect("Failed to encode token");

        let result = handler2.decode(&token);
        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn test_decode_expired_token() {
        let handler = JwtHandler::new(b"my_secret_key_at_least_32_bytes_long!");

        // Expired well past jsonwebtoken's default leeway
        let mut claims = SessionClaims::new("user123", Role::Patient, 3600);
        claims.iat -= 7200;
        claims.exp = claims.iat + 60;

        let token = handler.encode(&claims).expect("Failed to encode token");

        let result = handler.decode(&token);
        assert!(matches!(result, Err(JwtError::TokenExpired)));
    }
}
