use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{RemoteStore, StoreError, StoreResult};
use crate::models::{NewOrder, Order, OrderId, OrderPatch, UserId, UserProfile};

/// In-process store. Documents are kept in insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    orders: RwLock<Vec<Order>>,
    users: RwLock<Vec<(UserId, UserProfile)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn users(&self) -> Vec<(UserId, UserProfile)> {
        self.users.read().await.clone()
    }
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn add_order(&self, order: NewOrder) -> StoreResult<OrderId> {
        let id = Uuid::new_v4();
        self.orders.write().await.push(Order {
            id,
            description: order.description,
            products: order.products,
            total: order.total,
            status: order.status,
        });
        Ok(id)
    }

    async fn list_orders(&self) -> StoreResult<Vec<Order>> {
        Ok(self.orders.read().await.clone())
    }

    async fn update_order(&self, id: OrderId, patch: OrderPatch) -> StoreResult<()> {
        let mut orders = self.orders.write().await;
        let order = orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or(StoreError::NotFound(id))?;
        patch.apply(order);
        Ok(())
    }

    async fn delete_order(&self, id: OrderId) -> StoreResult<()> {
        self.orders.write().await.retain(|o| o.id != id);
        Ok(())
    }

    async fn add_user(&self, profile: UserProfile) -> StoreResult<UserId> {
        let id = Uuid::new_v4();
        self.users.write().await.push((id, profile));
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OrderStatus;

    #[tokio::test]
    async fn update_of_missing_document_is_not_found() {
        let store = MemoryStore::new();
        let err = store
            .update_order(Uuid::new_v4(), OrderPatch::status(OrderStatus::Done))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn list_keeps_insertion_order() {
        let store = MemoryStore::new();
        let first = store
            .add_order(NewOrder {
                description: "first".into(),
                ..Default::default()
            })
            .await
            .unwrap();
        let second = store
            .add_order(NewOrder {
                description: "second".into(),
                ..Default::default()
            })
            .await
            .unwrap();

        let ids: Vec<_> = store.list_orders().await.unwrap().into_iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![first, second]);

        store.delete_order(first).await.unwrap();
        store.delete_order(first).await.unwrap();
        assert_eq!(store.list_orders().await.unwrap().len(), 1);
    }
}
