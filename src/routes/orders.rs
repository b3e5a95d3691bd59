use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
};
use uuid::Uuid;

use crate::{
    dto::orders::{MovedOrder, OrderFormRequest, OrderList, SavedOrder},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Order,
    response::{ApiResponse, Meta},
    state::AppState,
    views::order_form::{OrderForm, SubmitOutcome},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route("/{id}", put(update_order).delete(delete_order))
        .route("/{id}/move", post(move_order))
}

fn order_list(items: Vec<Order>) -> ApiResponse<OrderList> {
    let meta = Meta::count(items.len());
    ApiResponse::success("Ok", OrderList { items }, Some(meta))
}

async fn existing(state: &AppState, id: Uuid) -> AppResult<Order> {
    state.orders.find(id).await?.ok_or(AppError::NotFound)
}

#[utoipa::path(
    get,
    path = "/api/orders",
    responses(
        (status = 200, description = "Every order in store order", body = ApiResponse<OrderList>),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let orders = state.orders.list_all().await?;
    Ok(Json(order_list(orders)))
}

#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = OrderFormRequest,
    responses(
        (status = 201, description = "Order created with status `create`", body = ApiResponse<SavedOrder>),
        (status = 400, description = "Order total is too large"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn create_order(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<OrderFormRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<SavedOrder>>)> {
    let mut form = OrderForm {
        description: payload.description,
        products: payload.products,
        ..OrderForm::new()
    };
    let id = match form.submit(&state.orders).await? {
        SubmitOutcome::Created(id) | SubmitOutcome::Updated(id) => id,
    };
    tracing::debug!(order_id = %id, account = %user.email, "order submitted");

    let data = SavedOrder {
        id,
        items: state.orders.orders().await,
    };
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Order created", data, None)),
    ))
}

#[utoipa::path(
    put,
    path = "/api/orders/{id}",
    params(("id" = Uuid, Path, description = "Order ID")),
    request_body = OrderFormRequest,
    responses(
        (status = 200, description = "Order saved, prices and total recomputed", body = ApiResponse<SavedOrder>),
        (status = 400, description = "Order total is too large"),
        (status = 404, description = "Not Found"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn update_order(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<OrderFormRequest>,
) -> AppResult<Json<ApiResponse<SavedOrder>>> {
    let order = existing(&state, id).await?;

    // The edit patch never carries a status; only move changes it.
    let mut form = OrderForm::for_order(&order);
    form.set_description(payload.description);
    form.products = payload.products;
    form.submit(&state.orders).await?;

    let data = SavedOrder {
        id,
        items: state.orders.orders().await,
    };
    Ok(Json(ApiResponse::success("Order updated", data, None)))
}

#[utoipa::path(
    post,
    path = "/api/orders/{id}/move",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order moved one column forward", body = ApiResponse<MovedOrder>),
        (status = 404, description = "Not Found"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn move_order(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<MovedOrder>>> {
    let order = existing(&state, id).await?;
    let status = state.orders.move_order(id, order.status).await?;
    Ok(Json(ApiResponse::success(
        "Order moved",
        MovedOrder { id, status },
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    delete,
    path = "/api/orders/{id}",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order deleted; remaining orders", body = ApiResponse<OrderList>),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn delete_order(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    state.orders.delete(id).await?;
    let orders = state.orders.orders().await;
    Ok(Json(order_list(orders)))
}
