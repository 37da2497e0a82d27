//! Session token verification
//!
//! Sessions are minted by the managed auth backend, not by the gateway.
//! The gateway only verifies the HS256 signature and the standard claims,
//! then resolves the role separately (the token does not carry one).

use crate::config::SessionConfig;
use crate::utils::error::{GatewayError, Result};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

/// Claims carried by a backend-issued session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (user ID)
    pub sub: Uuid,
    /// Email address, when the backend includes one
    #[serde(default)]
    pub email: Option<String>,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Audience
    pub aud: String,
}

/// Verifies session tokens against the shared backend secret
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    audience: String,
    leeway: u64,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("decoding_key", &"[REDACTED]")
            .field("algorithm", &self.algorithm)
            .field("audience", &self.audience)
            .field("leeway", &self.leeway)
            .finish()
    }
}

impl TokenVerifier {
    /// Create a new token verifier
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            algorithm: Algorithm::HS256,
            audience: config.audience.clone(),
            leeway: config.leeway,
        }
    }

    /// Verify and decode a session token
    pub fn verify(&self, token: &str) -> Result<SessionClaims> {
        let mut validation = Validation::new(self.algorithm);
        validation.set_audience(&[&self.audience]);
        validation.leeway = self.leeway;

        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| {
                warn!("Session token verification failed: {}", e);
                GatewayError::Jwt(e)
            })?;

        debug!("Session token verified for user: {}", token_data.claims.sub);
        Ok(token_data.claims)
    }
}
