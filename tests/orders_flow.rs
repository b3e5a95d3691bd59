mod common;

use std::sync::Arc;

use common::FlakyStore;
use order_board_api::{
    models::{NewOrder, Order, OrderId, OrderStatus, ProductLine, ProductName},
    pricing::FIXED_UNIT_PRICE,
    services::order_service::OrderRepository,
    store::MemoryStore,
    views::{board::OrderBoard, order_form::OrderForm},
};

fn board() -> OrderBoard {
    OrderBoard::new(Arc::new(OrderRepository::new(Arc::new(MemoryStore::new()))))
}

async fn create_fruit_basket(board: &OrderBoard) -> OrderId {
    let mut form = board.open_create();
    form.set_description("Fruit basket");
    form.add_product();
    form.set_product_name(0, ProductName::Olma);
    form.set_quantity(0, 2);
    board.submit(&mut form).await;
    assert_eq!(form, OrderForm::new(), "form resets after submit");

    let orders = board.repository().orders().await;
    orders
        .iter()
        .find(|o| o.description == "Fruit basket")
        .map(|o| o.id)
        .expect("created order")
}

#[tokio::test]
async fn fruit_basket_is_priced_and_starts_in_create() {
    let board = board();
    board.mount().await;
    let id = create_fruit_basket(&board).await;

    let orders = board.repository().list_all().await.unwrap();
    assert_eq!(
        orders,
        vec![Order {
            id,
            description: "Fruit basket".into(),
            products: vec![ProductLine {
                name: ProductName::Olma,
                quantity: 2,
                price: 20_000,
            }],
            total: 40_000,
            status: OrderStatus::Create,
        }]
    );
    assert_eq!(board.columns().await.create.len(), 1);
}

#[tokio::test]
async fn moving_walks_the_columns_and_stops_at_done() {
    let board = board();
    let id = create_fruit_basket(&board).await;
    let repository = board.repository();

    assert_eq!(
        repository.move_order(id, OrderStatus::Create).await.unwrap(),
        OrderStatus::InProgress
    );
    assert_eq!(
        repository.move_order(id, OrderStatus::InProgress).await.unwrap(),
        OrderStatus::Done
    );
    assert_eq!(
        repository.move_order(id, OrderStatus::Done).await.unwrap(),
        OrderStatus::Done
    );

    let columns = board.columns().await;
    assert!(columns.create.is_empty());
    assert!(columns.in_progress.is_empty());
    assert_eq!(columns.done[0].order.id, id);
    assert_eq!(columns.done[0].order.status, OrderStatus::Done);
}

#[tokio::test]
async fn board_advance_skips_finished_cards() {
    let board = board();
    let id = create_fruit_basket(&board).await;

    let card = board.columns().await.create[0].clone();
    board.advance(&card).await;
    let card = board.columns().await.in_progress[0].clone();
    board.advance(&card).await;
    let card = board.columns().await.done[0].clone();
    assert!(!card.actions.advance);
    board.advance(&card).await;

    let columns = board.columns().await;
    assert_eq!(columns.done.len(), 1);
    assert_eq!(columns.done[0].order.id, id);
}

#[tokio::test]
async fn created_orders_ignore_caller_status() {
    let repository = OrderRepository::new(Arc::new(MemoryStore::new()));
    for status in OrderStatus::ALL {
        repository
            .create(NewOrder {
                description: format!("{status}"),
                status,
                ..Default::default()
            })
            .await
            .unwrap();
    }

    let orders = repository.list_all().await.unwrap();
    assert_eq!(orders.len(), 3);
    assert!(orders.iter().all(|o| o.status == OrderStatus::Create));
}

#[tokio::test]
async fn editing_recomputes_total_and_keeps_status() {
    let board = board();
    let id = create_fruit_basket(&board).await;
    board
        .repository()
        .move_order(id, OrderStatus::Create)
        .await
        .unwrap();

    let mut form = board.edit(id).await.expect("edit form");
    assert_eq!(form.editing, Some(id));
    form.set_description("Bigger basket");
    form.set_quantity(0, 5);
    form.add_product();
    form.set_product_name(1, ProductName::Anor);
    board.submit(&mut form).await;

    let orders = board.repository().orders().await;
    assert_eq!(orders.len(), 1, "edit must not create a new order");
    let order = &orders[0];
    assert_eq!(order.description, "Bigger basket");
    assert_eq!(order.status, OrderStatus::InProgress);
    assert_eq!(order.total, 6 * FIXED_UNIT_PRICE);
    assert_eq!(
        order.total,
        order.products.iter().map(|p| p.quantity * FIXED_UNIT_PRICE).sum::<i64>()
    );
}

#[tokio::test]
async fn edit_saved_after_another_client_moved_the_order_keeps_its_status() {
    let store = Arc::new(MemoryStore::new());
    let board = OrderBoard::new(Arc::new(OrderRepository::new(store.clone())));
    let id = create_fruit_basket(&board).await;

    let mut form = board.edit(id).await.expect("edit form");

    let other = OrderRepository::new(store);
    other.move_order(id, OrderStatus::Create).await.unwrap();
    other.move_order(id, OrderStatus::InProgress).await.unwrap();

    form.set_description("Edited while moving");
    board.submit(&mut form).await;

    let orders = board.repository().list_all().await.unwrap();
    assert_eq!(orders[0].description, "Edited while moving");
    assert_eq!(orders[0].status, OrderStatus::Done);
}

#[tokio::test]
async fn advancing_a_stale_card_never_moves_it_back() {
    let store = Arc::new(MemoryStore::new());
    let board = OrderBoard::new(Arc::new(OrderRepository::new(store.clone())));
    let id = create_fruit_basket(&board).await;
    let stale = board.columns().await.create[0].clone();

    let other = OrderRepository::new(store);
    other.move_order(id, OrderStatus::Create).await.unwrap();
    other.move_order(id, OrderStatus::InProgress).await.unwrap();

    board.advance(&stale).await;

    let columns = board.columns().await;
    assert!(columns.in_progress.is_empty());
    assert_eq!(columns.done[0].order.id, id);
}

#[tokio::test]
async fn deleted_order_is_gone_from_list_all() {
    let board = board();
    let id = create_fruit_basket(&board).await;
    let other = create_fruit_basket(&board).await;

    board.delete(id).await;

    let orders = board.repository().list_all().await.unwrap();
    assert!(orders.iter().all(|o| o.id != id));
    assert!(orders.iter().any(|o| o.id == other));
}

#[tokio::test]
async fn missing_order_edit_is_swallowed_by_board() {
    let board = board();
    let id = create_fruit_basket(&board).await;

    let mut form = board.edit(id).await.expect("edit form");
    board.repository().delete(id).await.unwrap();
    form.set_description("too late");
    board.submit(&mut form).await;

    assert!(board.repository().orders().await.is_empty());
    assert_eq!(form, OrderForm::new());
}

#[tokio::test]
async fn failed_refresh_keeps_previous_list() {
    let store = Arc::new(FlakyStore::default());
    let repository = OrderRepository::new(store.clone());
    let first = repository
        .create(NewOrder {
            description: "first".into(),
            ..Default::default()
        })
        .await
        .unwrap();

    store.fail_reads(true);
    repository
        .create(NewOrder {
            description: "second".into(),
            ..Default::default()
        })
        .await
        .unwrap();

    let shown: Vec<_> = repository.orders().await.into_iter().map(|o| o.id).collect();
    assert_eq!(shown, vec![first]);

    let board = OrderBoard::new(Arc::new(repository));
    board.mount().await;
    assert!(!board.is_loading());
    assert_eq!(board.columns().await.create.len(), 1);

    store.fail_reads(false);
    board.mount().await;
    assert_eq!(board.columns().await.create.len(), 2);
}
