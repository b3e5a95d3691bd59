//! Identity provider seam: email/password accounts, federated sign-in and
//! access-token verification.

use std::fmt;

use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use async_trait::async_trait;
use password_hash::rand_core::OsRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

pub mod memory;
pub mod orm;
pub mod token;

pub use memory::MemoryIdentityProvider;
pub use orm::OrmIdentityProvider;
pub use token::TokenIssuer;

/// Failure reported by the provider. `message` is meant to be shown to the user as is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct IdentityError {
    pub message: String,
}

impl IdentityError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FederatedProvider {
    Google,
}

impl fmt::Display for FederatedProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FederatedProvider::Google => f.write_str("google"),
        }
    }
}

/// Who a verified access token belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub account_id: Uuid,
    pub email: String,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AccessToken, IdentityError>;

    async fn create_user(&self, email: &str, password: &str) -> Result<(), IdentityError>;

    async fn sign_in_with_popup(&self, provider: FederatedProvider) -> Result<(), IdentityError>;

    async fn verify(&self, token: &str) -> Result<Identity, IdentityError>;
}

pub(crate) const INVALID_CREDENTIALS: &str = "Invalid email or password";
pub(crate) const EMAIL_TAKEN: &str = "Email is already taken";

pub(crate) fn hash_password(password: &str) -> Result<String, IdentityError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            tracing::error!(error = %e, "password hashing failed");
            IdentityError::new("Unable to create account")
        })
}

pub(crate) fn verify_password(password: &str, password_hash: &str) -> bool {
    match PasswordHash::new(password_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::warn!(error = %e, "stored password hash is unreadable");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashed_password_verifies_only_itself() {
        let hash = hash_password("secret1").unwrap();
        assert!(verify_password("secret1", &hash));
        assert!(!verify_password("secret2", &hash));
        assert!(!verify_password("secret1", "not-a-hash"));
    }
}
