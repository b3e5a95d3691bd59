use std::sync::Arc;

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};

use crate::{
    dto::auth::{FederatedSignInRequest, LoginResponse, RedirectResponse},
    error::AppResult,
    response::{ApiResponse, Meta},
    services::auth_service::AuthFlow,
    session::MemoryTokenStorage,
    state::AppState,
    views::auth::{LoginForm, RegisterForm},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/federated", post(federated))
}

// HTTP clients keep their own token; it goes back in the response body, so the
// flow only needs request-scoped storage.
fn auth_flow(state: &AppState) -> AuthFlow {
    AuthFlow::new(
        state.identity.clone(),
        state.store.clone(),
        Arc::new(MemoryTokenStorage::new()),
    )
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterForm,
    responses(
        (status = 201, description = "Account created, continue to login", body = ApiResponse<RedirectResponse>),
        (status = 400, description = "Validation or provider error")
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(form): Json<RegisterForm>,
) -> AppResult<(StatusCode, Json<ApiResponse<RedirectResponse>>)> {
    let route = auth_flow(&state).register(&form).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("User created", RedirectResponse::from(route), None)),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginForm,
    responses(
        (status = 200, description = "Login user", body = ApiResponse<LoginResponse>),
        (status = 400, description = "Validation or provider error")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(form): Json<LoginForm>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let outcome = auth_flow(&state).login(&form).await?;
    let resp = LoginResponse {
        token: outcome.token.into_inner(),
        redirect_to: outcome.route.path().to_string(),
    };
    Ok(Json(ApiResponse::success(
        "Logged in",
        resp,
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    post,
    path = "/api/auth/federated",
    request_body = FederatedSignInRequest,
    responses(
        (status = 200, description = "Federated sign-in settled", body = ApiResponse<RedirectResponse>),
        (status = 400, description = "Provider error")
    ),
    tag = "Auth"
)]
pub async fn federated(
    State(state): State<AppState>,
    Json(payload): Json<FederatedSignInRequest>,
) -> AppResult<Json<ApiResponse<RedirectResponse>>> {
    let route = auth_flow(&state)
        .sign_in_federated(payload.provider)
        .await?;
    Ok(Json(ApiResponse::success("Signed in", RedirectResponse::from(route), None)))
}
