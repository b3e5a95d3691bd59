use axum::{Json, Router, extract::State, routing::get};

use crate::{
    error::AppResult,
    middleware::auth::AuthUser,
    response::{ApiResponse, Meta},
    state::AppState,
    views::board::BoardColumns,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_board))
}

#[utoipa::path(
    get,
    path = "/api/board",
    responses(
        (status = 200, description = "Orders split into create, in-progress and done columns", body = ApiResponse<BoardColumns>),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "Board"
)]
pub async fn get_board(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<ApiResponse<BoardColumns>>> {
    let orders = state.orders.list_all().await?;
    let columns = BoardColumns::from_orders(&orders);
    let meta = Meta::count(columns.len());
    Ok(Json(ApiResponse::success("Board", columns, Some(meta))))
}
