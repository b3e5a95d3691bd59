use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    models::{NewOrder, Order, OrderId, OrderPatch, OrderStatus, ProductLine, ProductName},
    pricing::{PricedOrder, TotalOverflow},
    services::order_service::OrderRepository,
    store::StoreError,
};

/// State of the create/edit order dialog.
///
/// `editing` carries the id of the order being edited; when it is set, submit
/// updates that order instead of creating a new one. The form never carries a
/// status: new orders start in `create` and edits leave the stored status alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderForm {
    pub editing: Option<OrderId>,
    pub description: String,
    pub products: Vec<ProductLine>,
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Pricing(#[from] TotalOverflow),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(OrderId),
    Updated(OrderId),
}

impl OrderForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Form pre-populated from an existing order.
    pub fn for_order(order: &Order) -> Self {
        Self {
            editing: Some(order.id),
            description: order.description.clone(),
            products: order.products.clone(),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Appends a blank line with quantity 1.
    pub fn add_product(&mut self) {
        self.products.push(ProductLine::default());
    }

    pub fn remove_product(&mut self, index: usize) -> bool {
        if index < self.products.len() {
            self.products.remove(index);
            true
        } else {
            false
        }
    }

    pub fn set_product_name(&mut self, index: usize, name: ProductName) -> bool {
        match self.products.get_mut(index) {
            Some(line) => {
                line.name = name;
                true
            }
            None => false,
        }
    }

    /// Quantity is taken as given; values below 1 are not rejected.
    pub fn set_quantity(&mut self, index: usize, quantity: i64) -> bool {
        match self.products.get_mut(index) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Prices the lines, then creates or updates through the repository.
    ///
    /// The form is reset whether or not pricing and the store write succeed.
    /// An edit patches description, products and total only.
    pub async fn submit(
        &mut self,
        repository: &OrderRepository,
    ) -> Result<SubmitOutcome, SubmitError> {
        let form = std::mem::take(self);
        let priced = PricedOrder::from_draft(form.description, form.products)?;

        match form.editing {
            None => {
                let id = repository
                    .create(NewOrder {
                        description: priced.description,
                        products: priced.products,
                        total: priced.total,
                        status: OrderStatus::Create,
                    })
                    .await?;
                Ok(SubmitOutcome::Created(id))
            }
            Some(id) => {
                repository
                    .update(
                        id,
                        OrderPatch {
                            description: Some(priced.description),
                            products: Some(priced.products),
                            total: Some(priced.total),
                            status: None,
                        },
                    )
                    .await?;
                Ok(SubmitOutcome::Updated(id))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_lines_append_and_remove_by_index() {
        let mut form = OrderForm::new();
        form.add_product();
        form.add_product();
        assert_eq!(form.products, vec![ProductLine::default(); 2]);

        assert!(form.set_product_name(1, ProductName::Anor));
        assert!(form.set_quantity(1, 0));
        assert!(!form.set_quantity(5, 3));

        assert!(form.remove_product(0));
        assert!(!form.remove_product(4));
        assert_eq!(form.products, vec![ProductLine::new(ProductName::Anor, 0)]);
    }

    #[test]
    fn edit_form_carries_the_order_id() {
        let order = Order {
            id: uuid::Uuid::new_v4(),
            description: "Gift".into(),
            products: vec![ProductLine::new(ProductName::Olma, 1)],
            total: 20_000,
            status: OrderStatus::InProgress,
        };
        let mut form = OrderForm::for_order(&order);
        assert!(form.is_editing());
        assert_eq!(form.editing, Some(order.id));
        assert_eq!(form.description, "Gift");

        form.reset();
        assert_eq!(form, OrderForm::new());
    }

    #[tokio::test]
    async fn overflowing_total_is_not_written_and_resets_the_form() {
        let repository = OrderRepository::new(std::sync::Arc::new(crate::store::MemoryStore::new()));
        let mut form = OrderForm::new();
        form.add_product();
        form.set_quantity(0, i64::MAX);

        let err = form.submit(&repository).await.unwrap_err();
        assert!(matches!(err, SubmitError::Pricing(TotalOverflow)));
        assert_eq!(form, OrderForm::new());
        assert!(repository.list_all().await.unwrap().is_empty());
    }
}
