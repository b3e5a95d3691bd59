use std::sync::Arc;

use thiserror::Error;

use crate::{
    identity::{AccessToken, FederatedProvider, IdentityProvider},
    models::UserProfile,
    session::{SessionError, TOKEN_KEY, TokenStorage},
    store::RemoteStore,
    views::auth::{LoginForm, RegisterForm, Route, ValidationError},
};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Provider message, passed through untouched.
    #[error("{0}")]
    Provider(String),

    #[error("failed to persist session")]
    Session(#[from] SessionError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub token: AccessToken,
    pub route: Route,
}

/// Login, registration and federated sign-in, wired to injected collaborators.
#[derive(Clone)]
pub struct AuthFlow {
    identity: Arc<dyn IdentityProvider>,
    store: Arc<dyn RemoteStore>,
    storage: Arc<dyn TokenStorage>,
}

impl AuthFlow {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        store: Arc<dyn RemoteStore>,
        storage: Arc<dyn TokenStorage>,
    ) -> Self {
        Self {
            identity,
            store,
            storage,
        }
    }

    /// Validates, signs in, stores the token and routes to the board.
    pub async fn login(&self, form: &LoginForm) -> Result<LoginOutcome, AuthError> {
        form.validate()?;

        let token = self
            .identity
            .sign_in(&form.email, &form.password)
            .await
            .map_err(|e| AuthError::Provider(e.message))?;

        self.storage.set(TOKEN_KEY, token.as_str()).await?;
        tracing::info!(email = %form.email, "signed in");

        Ok(LoginOutcome {
            token,
            route: Route::Board,
        })
    }

    /// Validates, creates the account, writes the profile and routes to login.
    ///
    /// The profile write is awaited before returning, but a failure there is
    /// only logged and registration still routes to login.
    pub async fn register(&self, form: &RegisterForm) -> Result<Route, AuthError> {
        form.validate()?;

        self.identity
            .create_user(&form.email, &form.password)
            .await
            .map_err(|e| AuthError::Provider(e.message))?;
        tracing::info!(email = %form.email, "account created");

        let profile = UserProfile {
            name: form.name.clone(),
            email: form.email.clone(),
        };
        if let Err(err) = self.store.add_user(profile).await {
            tracing::warn!(email = %form.email, error = %err, "writing user profile failed");
        }

        Ok(Route::Login)
    }

    /// Navigates only after the provider call has settled.
    pub async fn sign_in_federated(&self, provider: FederatedProvider) -> Result<Route, AuthError> {
        self.identity
            .sign_in_with_popup(provider)
            .await
            .map_err(|e| AuthError::Provider(e.message))?;
        tracing::info!(%provider, "federated sign-in completed");
        Ok(Route::Login)
    }

    pub async fn logout(&self) -> Result<Route, AuthError> {
        self.storage.remove(TOKEN_KEY).await?;
        Ok(Route::Login)
    }

    /// Stored token, if any.
    pub async fn current_token(&self) -> Result<Option<String>, AuthError> {
        Ok(self.storage.get(TOKEN_KEY).await?)
    }
}
