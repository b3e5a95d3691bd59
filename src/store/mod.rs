//! Remote document store holding the `orders` and `users` collections.
//!
//! The application never talks to a database directly; everything goes through
//! [`RemoteStore`] so the backend can be swapped (Postgres via sea-orm, or the
//! in-process [`MemoryStore`] used for tests and local runs).

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{NewOrder, Order, OrderId, OrderPatch, UserId, UserProfile};

pub mod memory;
pub mod orm;

pub use memory::MemoryStore;
pub use orm::OrmStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document {0} not found")]
    NotFound(Uuid),

    #[error("malformed document {id}: {reason}")]
    Malformed { id: Uuid, reason: String },

    #[error("serialization error")]
    Serialization(#[from] serde_json::Error),

    #[error("ORM error")]
    Orm(#[from] sea_orm::DbErr),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Adds a document to `orders` and returns the id the store assigned.
    async fn add_order(&self, order: NewOrder) -> StoreResult<OrderId>;

    /// Every document in `orders`, in the order the store returns them.
    async fn list_orders(&self) -> StoreResult<Vec<Order>>;

    /// Merges the present fields of `patch` into the document at `id`.
    async fn update_order(&self, id: OrderId, patch: OrderPatch) -> StoreResult<()>;

    /// Removes the document at `id`. Removing a missing document is not an error.
    async fn delete_order(&self, id: OrderId) -> StoreResult<()>;

    async fn add_user(&self, profile: UserProfile) -> StoreResult<UserId>;
}
