use anyhow::{Context, Result};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::UserId;

/// JWT payload: the user id and the expiry timestamp.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: UserId,
    pub exp: i64,
}

/// Issues and verifies the bearer tokens that carry a session.
#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_hours: i64,
}

impl TokenSigner {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_hours,
        }
    }

    pub fn issue(&self, user_id: UserId) -> Result<String> {
        let expires_at = Utc::now() + chrono::Duration::hours(self.ttl_hours);
        let claims = Claims {
            sub: user_id,
            exp: expires_at.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding).context("Failed to sign token")
    }

    /// Returns the user id the token was issued for. Expired, malformed,
    /// and re-signed tokens all fail verification.
    pub fn verify(&self, token: &str) -> Result<UserId> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())
            .context("Token is invalid or expired")?;

        Ok(data.claims.sub)
    }
}
