//! Access tokens.
//!
//! Login hands out a signed token carrying the user id and username; every
//! authenticated request presents it back and gets the identity out of
//! [`TokenSigner::verify`].

use std::fmt::{self, Debug};

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, util::parse_uuid};

pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// The contents of a JSON Web Token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: String,
    pub username: String,
    /// The expiry time of the token.
    pub exp: i64,
    /// The time the token was issued.
    pub iat: i64,
}

/// Identity carried by a verified token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenIdentity {
    pub user_id: Uuid,
    pub username: String,
}

/// Issues and verifies access tokens.
pub trait TokenSigner: Debug + Send + Sync {
    fn issue(&self, user_id: Uuid, username: &str) -> ResultEngine<String>;

    /// Fails with [`EngineError::Unauthorized`] on a bad signature, a
    /// malformed token or an expired one.
    fn verify(&self, token: &str) -> ResultEngine<TokenIdentity>;
}

/// HS256 JWT signer.
#[derive(Clone)]
pub struct JwtSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl JwtSigner {
    pub fn new(secret: &str, ttl: Duration) -> ResultEngine<Self> {
        if secret.is_empty() {
            return Err(EngineError::InvalidArgument(
                "jwt secret must not be empty".to_string(),
            ));
        }
        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        })
    }
}

impl Debug for JwtSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtSigner")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenSigner for JwtSigner {
    fn issue(&self, user_id: Uuid, username: &str) -> ResultEngine<String> {
        let now = Utc::now();
        let claims = Claims {
            user_id: user_id.to_string(),
            username: username.to_string(),
            exp: (now + self.ttl).timestamp(),
            iat: now.timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|err| EngineError::Internal(format!("failed to sign token: {err}")))
    }

    fn verify(&self, token: &str) -> ResultEngine<TokenIdentity> {
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map_err(|_| EngineError::Unauthorized("invalid token".to_string()))?;
        Ok(TokenIdentity {
            user_id: parse_uuid(&data.claims.user_id, "user")
                .map_err(|_| EngineError::Unauthorized("invalid token".to_string()))?,
            username: data.claims.username,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer(secret: &str) -> JwtSigner {
        JwtSigner::new(secret, Duration::hours(DEFAULT_TOKEN_TTL_HOURS)).unwrap()
    }

    #[test]
    fn issued_token_carries_identity() {
        let signer = signer("secret");
        let user_id = Uuid::new_v4();

        let token = signer.issue(user_id, "alice").unwrap();
        let identity = signer.verify(&token).unwrap();

        assert_eq!(identity.user_id, user_id);
        assert_eq!(identity.username, "alice");
    }

    #[test]
    fn token_from_another_secret_is_rejected() {
        let token = signer("one").issue(Uuid::new_v4(), "alice").unwrap();
        assert_eq!(
            signer("two").verify(&token),
            Err(EngineError::Unauthorized("invalid token".to_string()))
        );
    }

    #[test]
    fn expired_token_is_rejected() {
        let signer = JwtSigner::new("secret", Duration::hours(-2)).unwrap();
        let token = signer.issue(Uuid::new_v4(), "alice").unwrap();
        assert!(signer.verify(&token).is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(signer("secret").verify("not-a-token").is_err());
    }

    #[test]
    fn empty_secret_is_rejected() {
        assert!(JwtSigner::new("", Duration::hours(1)).is_err());
    }
}
