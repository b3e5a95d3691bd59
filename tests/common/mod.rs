use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use order_board_api::{
    models::{NewOrder, Order, OrderId, OrderPatch, UserId, UserProfile},
    store::{MemoryStore, RemoteStore, StoreError, StoreResult},
};
use uuid::Uuid;

/// Store whose reads can be switched off to simulate a failing refresh.
///
/// Writes always reach `inner`, which other repositories can share to play a
/// second client.
#[derive(Default)]
pub struct FlakyStore {
    pub inner: Arc<MemoryStore>,
    pub fail_reads: AtomicBool,
}

impl FlakyStore {
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl RemoteStore for FlakyStore {
    async fn add_order(&self, order: NewOrder) -> StoreResult<OrderId> {
        self.inner.add_order(order).await
    }

    async fn list_orders(&self) -> StoreResult<Vec<Order>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::NotFound(Uuid::nil()));
        }
        self.inner.list_orders().await
    }

    async fn update_order(&self, id: OrderId, patch: OrderPatch) -> StoreResult<()> {
        self.inner.update_order(id, patch).await
    }

    async fn delete_order(&self, id: OrderId) -> StoreResult<()> {
        self.inner.delete_order(id).await
    }

    async fn add_user(&self, profile: UserProfile) -> StoreResult<UserId> {
        self.inner.add_user(profile).await
    }
}
