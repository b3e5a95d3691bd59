use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    models::{NewOrder, Order, OrderId, OrderPatch, OrderStatus},
    store::{RemoteStore, StoreError, StoreResult},
};

/// Adapter between board actions and the remote `orders` collection.
///
/// Holds the in-memory order list the board renders from. The list is only
/// ever replaced wholesale by a successful [`list_all`](Self::list_all); every
/// mutation re-fetches instead of patching locally.
pub struct OrderRepository {
    store: Arc<dyn RemoteStore>,
    orders: RwLock<Vec<Order>>,
}

impl OrderRepository {
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self {
            store,
            orders: RwLock::new(Vec::new()),
        }
    }

    /// Fetches every order, replaces the in-memory list and returns it.
    pub async fn list_all(&self) -> StoreResult<Vec<Order>> {
        let orders = self.store.list_orders().await?;
        tracing::debug!(count = orders.len(), "order list refreshed");
        *self.orders.write().await = orders.clone();
        Ok(orders)
    }

    /// Current in-memory list, as of the last successful refresh.
    pub async fn orders(&self) -> Vec<Order> {
        self.orders.read().await.clone()
    }

    /// Looks the order up in a fresh fetch, never in the possibly stale list.
    pub async fn find(&self, id: OrderId) -> StoreResult<Option<Order>> {
        let orders = self.list_all().await?;
        Ok(orders.into_iter().find(|o| o.id == id))
    }

    /// Adds the order with status forced to `create`, whatever the caller passed.
    pub async fn create(&self, order: NewOrder) -> StoreResult<OrderId> {
        let order = NewOrder {
            status: OrderStatus::Create,
            ..order
        };
        let id = self.store.add_order(order).await?;
        tracing::info!(order_id = %id, "order created");
        self.refresh().await;
        Ok(id)
    }

    pub async fn update(&self, id: OrderId, patch: OrderPatch) -> StoreResult<()> {
        self.store.update_order(id, patch).await?;
        tracing::info!(order_id = %id, "order updated");
        self.refresh().await;
        Ok(())
    }

    /// Writes the status one step after `current` and returns the status the
    /// order ends up in.
    ///
    /// `current` is what the caller rendered and may be stale. The stored status
    /// is read first and the order never moves to an earlier column than it is
    /// already in.
    pub async fn move_order(&self, id: OrderId, current: OrderStatus) -> StoreResult<OrderStatus> {
        let stored = self
            .store
            .list_orders()
            .await?
            .into_iter()
            .find(|o| o.id == id)
            .ok_or(StoreError::NotFound(id))?
            .status;
        let next = current.next().max(stored);
        if next != current.next() {
            tracing::debug!(order_id = %id, %current, %stored, "move from a stale status");
        }
        self.store
            .update_order(id, OrderPatch::status(next))
            .await?;
        tracing::info!(order_id = %id, from = %stored, to = %next, "order moved");
        self.refresh().await;
        Ok(next)
    }

    pub async fn delete(&self, id: OrderId) -> StoreResult<()> {
        self.store.delete_order(id).await?;
        tracing::info!(order_id = %id, "order deleted");
        self.refresh().await;
        Ok(())
    }

    // A failed refresh leaves the previous list in place.
    async fn refresh(&self) {
        if let Err(err) = self.list_all().await {
            tracing::warn!(error = %err, "order refresh failed; keeping previous list");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn mutations_refresh_the_in_memory_list() {
        let repository = OrderRepository::new(Arc::new(MemoryStore::new()));
        assert!(repository.orders().await.is_empty());

        let id = repository
            .create(NewOrder {
                description: "Fruit basket".into(),
                status: OrderStatus::Done,
                ..Default::default()
            })
            .await
            .unwrap();

        let orders = repository.orders().await;
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].id, id);
        assert_eq!(orders[0].status, OrderStatus::Create);

        repository.delete(id).await.unwrap();
        assert!(repository.orders().await.is_empty());
        assert_eq!(repository.find(id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn moving_from_a_stale_status_never_goes_backwards() {
        let store = Arc::new(MemoryStore::new());
        let repository = OrderRepository::new(store.clone());
        let id = repository.create(NewOrder::default()).await.unwrap();

        let other = OrderRepository::new(store);
        other.move_order(id, OrderStatus::Create).await.unwrap();
        other.move_order(id, OrderStatus::InProgress).await.unwrap();

        let status = repository.move_order(id, OrderStatus::Create).await.unwrap();
        assert_eq!(status, OrderStatus::Done);
        assert_eq!(repository.orders().await[0].status, OrderStatus::Done);

        let missing = repository.move_order(uuid::Uuid::new_v4(), OrderStatus::Create).await;
        assert!(matches!(missing, Err(StoreError::NotFound(_))));
    }
}
