use axum::{extract::FromRequestParts, http::header};
use uuid::Uuid;

use crate::{error::AppError, state::AppState};

/// Caller identified by a bearer token issued by the identity provider.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub account_id: Uuid,
    pub email: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".into()))?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid Authorization header".into()))?;

        let token = auth_str
            .strip_prefix("Bearer ")
            .map(str::trim)
            .ok_or_else(|| AppError::Unauthorized("Invalid Authorization scheme".into()))?;

        let identity = state
            .identity
            .verify(token)
            .await
            .map_err(|e| AppError::Unauthorized(e.message))?;

        Ok(AuthUser {
            account_id: identity.account_id,
            email: identity.email,
        })
    }
}
