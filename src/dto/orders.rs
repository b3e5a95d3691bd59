use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Order, OrderId, OrderStatus, ProductLine};

/// Body of the order dialog. Line prices and the total are computed on save;
/// any values sent for them are ignored. There is no status field: new orders
/// start in `create` and only the move endpoint changes status, so a `status`
/// key in the body is dropped like any other unknown key.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct OrderFormRequest {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub products: Vec<ProductLine>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderList {
    pub items: Vec<Order>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SavedOrder {
    #[schema(value_type = uuid::Uuid)]
    pub id: OrderId,
    pub items: Vec<Order>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MovedOrder {
    #[schema(value_type = uuid::Uuid)]
    pub id: OrderId,
    pub status: OrderStatus,
}
