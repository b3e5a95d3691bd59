use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    models::{Order, OrderId, OrderStatus},
    services::order_service::OrderRepository,
    views::order_form::OrderForm,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct CardActions {
    pub delete: bool,
    #[serde(rename = "move")]
    pub advance: bool,
    pub edit: bool,
}

impl CardActions {
    pub fn for_status(status: OrderStatus) -> Self {
        Self {
            delete: true,
            advance: status.can_advance(),
            edit: true,
        }
    }
}

/// One order as shown in its column. `number` is the 1-based position within the column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct BoardCard {
    pub number: usize,
    pub order: Order,
    pub actions: CardActions,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct BoardColumns {
    pub create: Vec<BoardCard>,
    pub in_progress: Vec<BoardCard>,
    pub done: Vec<BoardCard>,
}

impl BoardColumns {
    /// Splits the list by status, keeping list order inside each column.
    pub fn from_orders(orders: &[Order]) -> Self {
        let column = |status: OrderStatus| -> Vec<BoardCard> {
            orders
                .iter()
                .filter(|o| o.status == status)
                .enumerate()
                .map(|(i, order)| BoardCard {
                    number: i + 1,
                    order: order.clone(),
                    actions: CardActions::for_status(status),
                })
                .collect()
        };

        Self {
            create: column(OrderStatus::Create),
            in_progress: column(OrderStatus::InProgress),
            done: column(OrderStatus::Done),
        }
    }

    pub fn column(&self, status: OrderStatus) -> &[BoardCard] {
        match status {
            OrderStatus::Create => &self.create,
            OrderStatus::InProgress => &self.in_progress,
            OrderStatus::Done => &self.done,
        }
    }

    pub fn len(&self) -> usize {
        self.create.len() + self.in_progress.len() + self.done.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Board screen. Actions dispatched from here never report store failures;
/// they are logged and the board keeps showing what it had.
pub struct OrderBoard {
    repository: Arc<OrderRepository>,
    loading: AtomicBool,
}

impl OrderBoard {
    pub fn new(repository: Arc<OrderRepository>) -> Self {
        Self {
            repository,
            loading: AtomicBool::new(false),
        }
    }

    pub fn repository(&self) -> &OrderRepository {
        &self.repository
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// Initial fetch of every order.
    pub async fn mount(&self) {
        self.loading.store(true, Ordering::SeqCst);
        if let Err(err) = self.repository.list_all().await {
            tracing::warn!(error = %err, "loading orders failed");
        }
        self.loading.store(false, Ordering::SeqCst);
    }

    pub async fn columns(&self) -> BoardColumns {
        BoardColumns::from_orders(&self.repository.orders().await)
    }

    pub async fn delete(&self, id: OrderId) {
        if let Err(err) = self.repository.delete(id).await {
            tracing::warn!(order_id = %id, error = %err, "delete failed");
        }
    }

    /// Moves the card one column to the right. Cards in `done` have no move action.
    pub async fn advance(&self, card: &BoardCard) {
        if !card.actions.advance {
            tracing::debug!(order_id = %card.order.id, "move not offered for finished order");
            return;
        }
        if let Err(err) = self
            .repository
            .move_order(card.order.id, card.order.status)
            .await
        {
            tracing::warn!(order_id = %card.order.id, error = %err, "move failed");
        }
    }

    pub fn open_create(&self) -> OrderForm {
        OrderForm::new()
    }

    /// Opens the form pre-populated with the order, if it is on the board.
    pub async fn edit(&self, id: OrderId) -> Option<OrderForm> {
        self.repository
            .orders()
            .await
            .iter()
            .find(|o| o.id == id)
            .map(OrderForm::for_order)
    }

    pub async fn submit(&self, form: &mut OrderForm) {
        if let Err(err) = form.submit(&self.repository).await {
            tracing::warn!(error = %err, "saving order failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn order(description: &str, status: OrderStatus) -> Order {
        Order {
            id: Uuid::new_v4(),
            description: description.into(),
            products: vec![],
            total: 0,
            status,
        }
    }

    #[test]
    fn every_order_lands_in_exactly_one_column() {
        let orders = vec![
            order("a", OrderStatus::Done),
            order("b", OrderStatus::Create),
            order("c", OrderStatus::InProgress),
            order("d", OrderStatus::Create),
        ];
        let columns = BoardColumns::from_orders(&orders);
        assert_eq!(columns.len(), orders.len());

        let create: Vec<_> = columns
            .create
            .iter()
            .map(|c| (c.number, c.order.description.as_str()))
            .collect();
        assert_eq!(create, vec![(1, "b"), (2, "d")]);
        assert_eq!(columns.column(OrderStatus::Done)[0].order.description, "a");
    }

    #[test]
    fn finished_orders_offer_no_move() {
        let columns = BoardColumns::from_orders(&[
            order("new", OrderStatus::Create),
            order("busy", OrderStatus::InProgress),
            order("old", OrderStatus::Done),
        ]);
        assert!(columns.create[0].actions.advance);
        assert!(columns.in_progress[0].actions.advance);
        assert_eq!(
            columns.done[0].actions,
            CardActions {
                delete: true,
                advance: false,
                edit: true
            }
        );
    }
}
