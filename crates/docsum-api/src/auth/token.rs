//! Session tokens: HS256 JWTs carrying the user id and email.
//!
//! ```json
//! {"sub": "<user uuid>", "email": "a@x.com", "iat": 1700000000, "exp": 1700604800}
//! ```

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use docsum_core::User;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Default token lifetime (7 days).
pub const DEFAULT_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Claims embedded in every session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: String,
    /// User email at issue time.
    pub email: String,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: u64,
    /// Expiry, seconds since the Unix epoch.
    pub exp: u64,
}

/// Token errors. The variant is logged, never returned to clients.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Signing failed.
    #[error("failed to sign token: {0}")]
    Encode(jsonwebtoken::errors::Error),
    /// Signature, format or expiry check failed.
    #[error("token rejected: {0}")]
    Invalid(jsonwebtoken::errors::Error),
}

/// HS256 signing and verification keys plus the token lifetime.
///
/// Custom `Debug` omits the key material.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl std::fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenKeys")
            .field("secret", &"[REDACTED]")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl TokenKeys {
    /// Derive keys from a shared secret.
    pub fn from_secret(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    /// Issue a token for `user`.
    pub fn issue(&self, user: &User) -> Result<String, TokenError> {
        let iat = now_secs();
        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            iat,
            exp: iat + self.ttl.as_secs(),
        };
        self.sign(&claims)
    }

    /// Sign arbitrary claims.
    pub fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding).map_err(TokenError::Encode)
    }

    /// Verify signature and expiry, returning the claims.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);
        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(TokenError::Invalid)
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> TokenKeys {
        TokenKeys::from_secret(b"test-secret-with-enough-bytes-123", DEFAULT_TTL)
    }

    #[test]
    fn issue_then_verify() {
        let user = User::new("a@x.com", "hash".into(), None);
        let token = keys().issue(&user).unwrap();
        let claims = keys().verify(&token).unwrap();
        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.exp - claims.iat, DEFAULT_TTL.as_secs());
    }

    #[test]
    fn expired_token_rejected() {
        let now = now_secs();
        let token = keys()
            .sign(&Claims {
                sub: "x".into(),
                email: "a@x.com".into(),
                iat: now - 7200,
                exp: now - 3600,
            })
            .unwrap();
        assert!(matches!(keys().verify(&token), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn wrong_secret_rejected() {
        let user = User::new("a@x.com", "hash".into(), None);
        let token = TokenKeys::from_secret(b"another-secret", DEFAULT_TTL)
            .issue(&user)
            .unwrap();
        assert!(keys().verify(&token).is_err());
        assert!(keys().verify("not.a.jwt").is_err());
    }

    #[test]
    fn debug_redacts_secret() {
        let rendered = format!("{:?}", keys());
        assert!(!rendered.contains("test-secret"));
    }
}
