//! Server infrastructure module.
//!
//! This module provides:
//! - Application setup with OpenAPI documentation
//! - Health endpoints and readiness aggregation
//! - Graceful shutdown coordination
//! - Cleanup of connections on shutdown
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, health_router, with_request_logging};
//! use core_config::app_info;
//!
//! let router = create_router::<ApiDoc>(api_routes).merge(health_router(app_info!()));
//! let app = with_request_logging(router);
//!
//! create_production_app(app, &config, Duration::from_secs(10), async {}).await?;
//! ```

pub mod app;
pub mod cleanup;
pub mod health;
pub mod shutdown;

pub use app::{create_production_app, create_router, with_request_logging};
pub use cleanup::CleanupCoordinator;
pub use health::{HealthCheckFuture, HealthResponse, health_router, run_health_checks};
pub use shutdown::ShutdownCoordinator;
