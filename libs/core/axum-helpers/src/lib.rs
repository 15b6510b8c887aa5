//! # Axum Helpers
//!
//! Shared building blocks for the catalog HTTP surface.
//!
//! ## Modules
//!
//! - **[`server`]**: Router setup, health checks, graceful shutdown
//! - **[`http`]**: Request logging middleware with correlation ids
//! - **[`errors`]**: `AppError` and its envelope-shaped responses
//! - **[`extractors`]**: JSON and query extractors rejecting with `AppError`
//! - **[`response`]**: The `{ status, data }` response envelope
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_production_app, create_router, with_request_logging};
//! use core_config::server::ServerConfig;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api_routes = Router::new(); // Add your routes
//!     let app = with_request_logging(create_router::<ApiDoc>(api_routes));
//!
//!     let config = ServerConfig::default();
//!     create_production_app(app, &config, std::time::Duration::from_secs(10), async {}).await?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod response;
pub mod server;

// Re-export server types
pub use server::{
    CleanupCoordinator, HealthCheckFuture, HealthResponse, ShutdownCoordinator,
    create_production_app, create_router, health_router, run_health_checks,
    with_request_logging,
};

// Re-export HTTP middleware
pub use http::{CORRELATION_ID_HEADER, CorrelationId, request_logger};

// Re-export error types
pub use errors::{AppError, ErrorCode, error_response};

// Re-export extractors
pub use extractors::{ApiJson, ApiQuery};

// Re-export envelope types
pub use response::{ApiResponse, EmptyResponse, ResponseStatus};
