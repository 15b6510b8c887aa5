//! API routes module

pub mod health;
pub mod products;

use axum::Router;
use axum_helpers::server::{create_router, health_router, with_request_logging};
use core_config::AppInfo;

use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Create all API routes.
/// Nested under `/api` by [`create_router`].
pub fn routes(state: &AppState) -> Router {
    Router::new().nest("/v1/products", products::router(state))
}

/// Initialize database indexes
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    products::init_indexes(state).await
}

/// Assemble the HTTP app: docs, API routes, liveness and `readiness`
/// routes, wrapped in request logging.
pub fn app(api_routes: Router, readiness: Router, app_info: AppInfo) -> Router {
    let router = create_router::<ApiDoc>(api_routes)
        .merge(health_router(app_info))
        .merge(readiness);
    with_request_logging(router)
}
