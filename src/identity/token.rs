use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AccessToken, Identity, IdentityError};

#[derive(Debug, Deserialize, Serialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub exp: usize,
}

/// Signs and checks HS256 access tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    secret: String,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ttl: Duration::hours(24),
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn issue(&self, account_id: Uuid, email: &str) -> Result<AccessToken, IdentityError> {
        let expiration = Utc::now()
            .checked_add_signed(self.ttl)
            .ok_or_else(|| IdentityError::new("Failed to set token expiration"))?;

        let claims = Claims {
            sub: account_id.to_string(),
            email: email.to_string(),
            exp: expiration.timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map(AccessToken::new)
        .map_err(|e| {
            tracing::error!(error = %e, "token signing failed");
            IdentityError::new("Unable to sign in")
        })
    }

    pub fn verify(&self, token: &str) -> Result<Identity, IdentityError> {
        let decoded = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| IdentityError::new("Invalid or expired token"))?;

        let account_id = Uuid::parse_str(&decoded.claims.sub)
            .map_err(|_| IdentityError::new("Invalid account id in token"))?;

        Ok(Identity {
            account_id,
            email: decoded.claims.email,
        })
    }
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
