//! Token issuance and verification

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AuthError, Result};
use crate::roles::Role;

/// Token service configuration.
///
/// Set once at startup, immutable thereafter.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenConfig {
    /// HMAC signing secret.
    pub secret: String,
    /// Token lifetime in seconds.
    pub ttl_seconds: u64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            ttl_seconds: 1800, // 30 minutes
        }
    }
}

/// Verified token claims returned to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claims {
    pub subject: String,
    pub role: Role,
}

/// Wire-level claim set embedded in the JWT.
#[derive(Debug, Serialize, Deserialize)]
struct TokenClaims {
    sub: String,
    role: u32,
    iat: u64,
    exp: u64,
    jti: String,
}

/// Signs and verifies compact, expiring identity tokens.
///
/// Holds no state beyond the signing secret and configured lifetime;
/// safe for unsynchronized concurrent use.
pub struct TokenService {
    config: TokenConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    header: Header,
}

impl TokenService {
    pub fn new(config: TokenConfig) -> Result<Self> {
        if config.secret.is_empty() {
            return Err(AuthError::Config("token signing secret is empty".to_string()));
        }

        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Ok(Self {
            config,
            encoding_key,
            decoding_key,
            header: Header::new(Algorithm::HS256),
        })
    }

    /// Issue a token asserting `subject` with `role`.
    ///
    /// Embeds `iat = now` and `exp = now + ttl`. Fails only when the
    /// signing operation itself fails.
    pub fn issue(&self, subject: &str, role: Role) -> Result<String> {
        let now = chrono::Utc::now().timestamp() as u64;

        let claims = TokenClaims {
            sub: subject.to_string(),
            role: role.id(),
            iat: now,
            exp: now + self.config.ttl_seconds,
            jti: Uuid::new_v4().to_string(),
        };

        encode(&self.header, &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("token signing failed: {}", e)))
    }

    /// Verify a token and return its claims.
    ///
    /// Distinguishes [`AuthError::TokenExpired`] (valid signature, past
    /// expiry) from [`AuthError::InvalidToken`] (malformed input, bad
    /// signature, unsupported algorithm, or a role id outside the known
    /// enumeration).
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;

        let data = decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            })?;

        // The library treats `exp == now` as still valid; the expiry
        // boundary here is strict (`now >= exp` fails).
        let now = chrono::Utc::now().timestamp() as u64;
        if now >= data.claims.exp {
            return Err(AuthError::TokenExpired);
        }

        let role = Role::from_id(data.claims.role)
            .map_err(|_| AuthError::InvalidToken(format!("unknown role id: {}", data.claims.role)))?;

        Ok(Claims {
            subject: data.claims.sub,
            role,
        })
    }

    /// Configured token lifetime in seconds.
    pub fn ttl_seconds(&self) -> u64 {
        self.config.ttl_seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new(TokenConfig {
            secret: "test-secret".to_string(),
            ttl_seconds: 60,
        })
        .unwrap()
    }

    #[test]
    fn empty_secret_is_rejected() {
        let result = TokenService::new(TokenConfig {
            secret: String::new(),
            ttl_seconds: 60,
        });
        assert!(matches!(result, Err(AuthError::Config(_))));
    }

    #[test]
    fn issue_then_verify_round_trips() {
        let svc = service();
        let token = svc.issue("alice", Role::Admin).unwrap();
        let claims = svc.verify(&token).unwrap();
        assert_eq!(claims.subject, "alice");
        assert_eq!(claims.role, Role::Admin);
    }
}
