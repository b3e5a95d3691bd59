use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

pub type OrderId = Uuid;
pub type UserId = Uuid;

/// Lifecycle column of an order. Every order sits in exactly one of these.
///
/// Variants are declared in board order, so `Ord` follows the lifecycle.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    #[default]
    Create,
    InProgress,
    Done,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 3] = [
        OrderStatus::Create,
        OrderStatus::InProgress,
        OrderStatus::Done,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Create => "create",
            OrderStatus::InProgress => "in-progress",
            OrderStatus::Done => "done",
        }
    }

    /// Status after a single move. Anything that is not `create` lands on `done`,
    /// so moving a finished order re-writes `done`.
    pub fn next(self) -> Self {
        match self {
            OrderStatus::Create => OrderStatus::InProgress,
            _ => OrderStatus::Done,
        }
    }

    pub fn can_advance(self) -> bool {
        self != OrderStatus::Done
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown order status `{0}`")]
pub struct ParseStatusError(pub String);

impl FromStr for OrderStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(OrderStatus::Create),
            "in-progress" => Ok(OrderStatus::InProgress),
            "done" => Ok(OrderStatus::Done),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// Product catalog offered by the order form. `Unselected` is the empty choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
pub enum ProductName {
    #[default]
    #[serde(rename = "")]
    Unselected,
    Olma,
    Anor,
}

impl ProductName {
    pub const CATALOG: [ProductName; 2] = [ProductName::Olma, ProductName::Anor];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductName::Unselected => "",
            ProductName::Olma => "Olma",
            ProductName::Anor => "Anor",
        }
    }
}

impl fmt::Display for ProductName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown product `{0}`")]
pub struct ParseProductError(pub String);

impl FromStr for ProductName {
    type Err = ParseProductError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(ProductName::Unselected),
            "Olma" => Ok(ProductName::Olma),
            "Anor" => Ok(ProductName::Anor),
            other => Err(ParseProductError(other.to_string())),
        }
    }
}

fn default_quantity() -> i64 {
    1
}

/// One line of an order. `price` is assigned at save time and never taken from input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductLine {
    #[serde(default)]
    pub name: ProductName,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
    #[serde(default)]
    pub price: i64,
}

impl ProductLine {
    pub fn new(name: ProductName, quantity: i64) -> Self {
        Self {
            name,
            quantity,
            price: 0,
        }
    }
}

impl Default for ProductLine {
    fn default() -> Self {
        Self::new(ProductName::Unselected, default_quantity())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    #[schema(value_type = uuid::Uuid)]
    pub id: OrderId,
    pub description: String,
    pub products: Vec<ProductLine>,
    pub total: i64,
    pub status: OrderStatus,
}

/// Fields written when a new order document is added.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewOrder {
    pub description: String,
    pub products: Vec<ProductLine>,
    pub total: i64,
    pub status: OrderStatus,
}

/// Partial update. `None` fields are left untouched on the stored document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrderPatch {
    pub description: Option<String>,
    pub products: Option<Vec<ProductLine>>,
    pub total: Option<i64>,
    pub status: Option<OrderStatus>,
}

impl OrderPatch {
    pub fn status(status: OrderStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn apply(self, order: &mut Order) {
        if let Some(description) = self.description {
            order.description = description;
        }
        if let Some(products) = self.products {
            order.products = products;
        }
        if let Some(total) = self.total {
            order.total = total;
        }
        if let Some(status) = self.status {
            order.status = status;
        }
    }
}

/// Profile document written to the `users` collection on registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_only_goes_forward() {
        assert_eq!(OrderStatus::Create.next(), OrderStatus::InProgress);
        assert_eq!(OrderStatus::InProgress.next(), OrderStatus::Done);
        assert_eq!(OrderStatus::Done.next(), OrderStatus::Done);
        assert!(!OrderStatus::Done.can_advance());
    }

    #[test]
    fn status_uses_kebab_case_on_the_wire() {
        let json = serde_json::to_string(&OrderStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
        assert_eq!("in-progress".parse::<OrderStatus>(), Ok(OrderStatus::InProgress));
        assert!("archived".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn product_line_defaults_fill_missing_fields() {
        let line: ProductLine = serde_json::from_str(r#"{"name":"Olma"}"#).unwrap();
        assert_eq!(line, ProductLine::new(ProductName::Olma, 1));

        let blank: ProductLine = serde_json::from_str(r#"{"name":"","quantity":3}"#).unwrap();
        assert_eq!(blank.name, ProductName::Unselected);
        assert_eq!(blank.quantity, 3);
    }

    #[test]
    fn patch_only_touches_present_fields() {
        let mut order = Order {
            id: Uuid::new_v4(),
            description: "keep".into(),
            products: vec![],
            total: 5,
            status: OrderStatus::Create,
        };
        OrderPatch::status(OrderStatus::Done).apply(&mut order);
        assert_eq!(order.description, "keep");
        assert_eq!(order.total, 5);
        assert_eq!(order.status, OrderStatus::Done);
    }
}
