use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{identity::FederatedProvider, views::auth::Route};

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub redirect_to: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RedirectResponse {
    pub redirect_to: String,
}

impl From<Route> for RedirectResponse {
    fn from(route: Route) -> Self {
        Self {
            redirect_to: route.path().to_string(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct FederatedSignInRequest {
    pub provider: FederatedProvider,
}
