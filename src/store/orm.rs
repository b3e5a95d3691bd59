use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use super::{RemoteStore, StoreError, StoreResult};
use crate::{
    entity::{
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel},
        users::ActiveModel as UserActive,
    },
    models::{
        NewOrder, Order, OrderId, OrderPatch, OrderStatus, ParseStatusError, ProductLine, UserId,
        UserProfile,
    },
};

/// Postgres-backed store. Products are kept as a JSON array on the order row.
#[derive(Debug, Clone)]
pub struct OrmStore {
    conn: DatabaseConnection,
}

impl OrmStore {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl RemoteStore for OrmStore {
    async fn add_order(&self, order: NewOrder) -> StoreResult<OrderId> {
        let model = OrderActive {
            id: Set(Uuid::new_v4()),
            description: Set(order.description),
            products: Set(serde_json::to_value(&order.products)?),
            total: Set(order.total),
            status: Set(order.status.as_str().to_string()),
            created_at: NotSet,
            updated_at: NotSet,
        }
        .insert(&self.conn)
        .await?;

        Ok(model.id)
    }

    async fn list_orders(&self) -> StoreResult<Vec<Order>> {
        Orders::find()
            .order_by_asc(OrderCol::CreatedAt)
            .order_by_asc(OrderCol::Id)
            .all(&self.conn)
            .await?
            .into_iter()
            .map(order_from_entity)
            .collect()
    }

    async fn update_order(&self, id: OrderId, patch: OrderPatch) -> StoreResult<()> {
        let model = Orders::find_by_id(id)
            .one(&self.conn)
            .await?
            .ok_or(StoreError::NotFound(id))?;

        let mut active: OrderActive = model.into();
        if let Some(description) = patch.description {
            active.description = Set(description);
        }
        if let Some(products) = patch.products {
            active.products = Set(serde_json::to_value(&products)?);
        }
        if let Some(total) = patch.total {
            active.total = Set(total);
        }
        if let Some(status) = patch.status {
            active.status = Set(status.as_str().to_string());
        }
        active.updated_at = Set(Utc::now().into());
        active.update(&self.conn).await?;

        Ok(())
    }

    async fn delete_order(&self, id: OrderId) -> StoreResult<()> {
        Orders::delete_by_id(id).exec(&self.conn).await?;
        Ok(())
    }

    async fn add_user(&self, profile: UserProfile) -> StoreResult<UserId> {
        let model = UserActive {
            id: Set(Uuid::new_v4()),
            name: Set(profile.name),
            email: Set(profile.email),
            created_at: NotSet,
        }
        .insert(&self.conn)
        .await?;

        Ok(model.id)
    }
}

fn order_from_entity(model: OrderModel) -> StoreResult<Order> {
    let products: Vec<ProductLine> =
        serde_json::from_value(model.products).map_err(|e| StoreError::Malformed {
            id: model.id,
            reason: e.to_string(),
        })?;
    let status: OrderStatus = model.status.parse().map_err(|e: ParseStatusError| {
        StoreError::Malformed {
            id: model.id,
            reason: e.to_string(),
        }
    })?;

    Ok(Order {
        id: model.id,
        description: model.description,
        products,
        total: model.total,
        status,
    })
}
