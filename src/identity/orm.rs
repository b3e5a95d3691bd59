use async_trait::async_trait;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set, SqlErr,
};
use uuid::Uuid;

use super::{
    AccessToken, EMAIL_TAKEN, FederatedProvider, INVALID_CREDENTIALS, Identity, IdentityError,
    IdentityProvider, TokenIssuer, hash_password, verify_password,
};
use crate::entity::accounts::{ActiveModel as AccountActive, Column as AccountCol, Entity as Accounts};

/// Provider backed by the `accounts` table. Federated sign-in is not offered.
#[derive(Debug, Clone)]
pub struct OrmIdentityProvider {
    conn: DatabaseConnection,
    tokens: TokenIssuer,
}

impl OrmIdentityProvider {
    pub fn new(conn: DatabaseConnection, tokens: TokenIssuer) -> Self {
        Self { conn, tokens }
    }
}

fn unavailable(e: DbErr) -> IdentityError {
    tracing::error!(error = %e, "identity store query failed");
    IdentityError::new("Identity service is unavailable")
}

// The lookup in `create_user` can race another registration; the unique index
// on `accounts.email` settles it.
fn account_insert_error(e: DbErr) -> IdentityError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => IdentityError::new(EMAIL_TAKEN),
        _ => unavailable(e),
    }
}

#[async_trait]
impl IdentityProvider for OrmIdentityProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AccessToken, IdentityError> {
        let account = Accounts::find()
            .filter(AccountCol::Email.eq(email))
            .one(&self.conn)
            .await
            .map_err(unavailable)?
            .ok_or_else(|| IdentityError::new(INVALID_CREDENTIALS))?;

        if !verify_password(password, &account.password_hash) {
            return Err(IdentityError::new(INVALID_CREDENTIALS));
        }
        self.tokens.issue(account.id, &account.email)
    }

    async fn create_user(&self, email: &str, password: &str) -> Result<(), IdentityError> {
        let exists = Accounts::find()
            .filter(AccountCol::Email.eq(email))
            .one(&self.conn)
            .await
            .map_err(unavailable)?
            .is_some();
        if exists {
            return Err(IdentityError::new(EMAIL_TAKEN));
        }

        AccountActive {
            id: Set(Uuid::new_v4()),
            email: Set(email.to_string()),
            password_hash: Set(hash_password(password)?),
            created_at: NotSet,
        }
        .insert(&self.conn)
        .await
        .map_err(account_insert_error)?;

        Ok(())
    }

    async fn sign_in_with_popup(&self, provider: FederatedProvider) -> Result<(), IdentityError> {
        Err(IdentityError::new(format!(
            "Sign-in with {provider} is not available"
        )))
    }

    async fn verify(&self, token: &str) -> Result<Identity, IdentityError> {
        self.tokens.verify(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn other_insert_failures_report_unavailable() {
        let err = account_insert_error(DbErr::Custom("connection reset".into()));
        assert_eq!(err.message, "Identity service is unavailable");
    }
}
