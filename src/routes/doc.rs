use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{FederatedSignInRequest, LoginResponse, RedirectResponse},
        orders::{MovedOrder, OrderFormRequest, OrderList, SavedOrder},
    },
    identity::FederatedProvider,
    models::{Order, OrderStatus, ProductLine, ProductName, UserProfile},
    response::{ApiResponse, Meta},
    routes::{auth, board, health, orders},
    views::{
        auth::{LoginForm, RegisterForm, Route},
        board::{BoardCard, BoardColumns, CardActions},
    },
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::register,
        auth::federated,
        board::get_board,
        orders::list_orders,
        orders::create_order,
        orders::update_order,
        orders::move_order,
        orders::delete_order
    ),
    components(
        schemas(
            Order,
            OrderStatus,
            ProductLine,
            ProductName,
            UserProfile,
            LoginForm,
            RegisterForm,
            Route,
            FederatedProvider,
            FederatedSignInRequest,
            LoginResponse,
            RedirectResponse,
            OrderFormRequest,
            OrderList,
            SavedOrder,
            MovedOrder,
            BoardColumns,
            BoardCard,
            CardActions,
            Meta,
            ApiResponse<OrderList>,
            ApiResponse<BoardColumns>,
            ApiResponse<LoginResponse>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Login, registration and federated sign-in"),
        (name = "Board", description = "Orders grouped by status column"),
        (name = "Orders", description = "Order create, edit, move and delete"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
