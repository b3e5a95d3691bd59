use std::{
    collections::{HashMap, HashSet},
    sync::atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    AccessToken, EMAIL_TAKEN, FederatedProvider, INVALID_CREDENTIALS, Identity, IdentityError,
    IdentityProvider, TokenIssuer, hash_password, verify_password,
};

#[derive(Debug, Clone)]
struct Account {
    id: Uuid,
    password_hash: String,
}

/// In-process provider with the same observable behavior as the database one.
#[derive(Debug)]
pub struct MemoryIdentityProvider {
    accounts: RwLock<HashMap<String, Account>>,
    federated: RwLock<HashSet<FederatedProvider>>,
    tokens: TokenIssuer,
    calls: AtomicUsize,
}

impl MemoryIdentityProvider {
    pub fn new(tokens: TokenIssuer) -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            federated: RwLock::new(HashSet::new()),
            tokens,
            calls: AtomicUsize::new(0),
        }
    }

    pub async fn enable_federated(&self, provider: FederatedProvider) {
        self.federated.write().await.insert(provider);
    }

    /// Number of sign-in, sign-up and federated requests received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl IdentityProvider for MemoryIdentityProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AccessToken, IdentityError> {
        self.record_call();
        let account = self
            .accounts
            .read()
            .await
            .get(email)
            .cloned()
            .ok_or_else(|| IdentityError::new(INVALID_CREDENTIALS))?;

        if !verify_password(password, &account.password_hash) {
            return Err(IdentityError::new(INVALID_CREDENTIALS));
        }
        self.tokens.issue(account.id, email)
    }

    async fn create_user(&self, email: &str, password: &str) -> Result<(), IdentityError> {
        self.record_call();
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(email) {
            return Err(IdentityError::new(EMAIL_TAKEN));
        }
        let password_hash = hash_password(password)?;
        accounts.insert(
            email.to_string(),
            Account {
                id: Uuid::new_v4(),
                password_hash,
            },
        );
        Ok(())
    }

    async fn sign_in_with_popup(&self, provider: FederatedProvider) -> Result<(), IdentityError> {
        self.record_call();
        if self.federated.read().await.contains(&provider) {
            Ok(())
        } else {
            Err(IdentityError::new(format!(
                "Sign-in with {provider} is not available"
            )))
        }
    }

    async fn verify(&self, token: &str) -> Result<Identity, IdentityError> {
        self.tokens.verify(token)
    }
}
