use std::sync::Arc;

use crate::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    identity::{IdentityProvider, MemoryIdentityProvider, OrmIdentityProvider, TokenIssuer},
    services::order_service::OrderRepository,
    store::{MemoryStore, OrmStore, RemoteStore},
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RemoteStore>,
    pub identity: Arc<dyn IdentityProvider>,
    pub orders: Arc<OrderRepository>,
}

impl AppState {
    pub fn new(store: Arc<dyn RemoteStore>, identity: Arc<dyn IdentityProvider>) -> Self {
        let orders = Arc::new(OrderRepository::new(store.clone()));
        Self {
            store,
            identity,
            orders,
        }
    }

    pub fn in_memory(jwt_secret: &str) -> Self {
        Self::new(
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryIdentityProvider::new(TokenIssuer::new(jwt_secret))),
        )
    }

    /// Postgres-backed collaborators when `DATABASE_URL` is configured, in-memory ones otherwise.
    pub async fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let Some(database_url) = config.database_url.as_deref() else {
            tracing::warn!("DATABASE_URL not set; orders and accounts are kept in memory");
            return Ok(Self::in_memory(&config.jwt_secret));
        };

        let conn = create_orm_conn(database_url).await?;
        run_migrations(&conn).await?;

        let tokens = TokenIssuer::new(config.jwt_secret.clone());
        Ok(Self::new(
            Arc::new(OrmStore::new(conn.clone())),
            Arc::new(OrmIdentityProvider::new(conn, tokens)),
        ))
    }
}
