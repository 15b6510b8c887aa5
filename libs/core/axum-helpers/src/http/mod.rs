//! HTTP middleware.
//!
//! ```ignore
//! use axum_helpers::http::request_logger;
//!
//! let app = Router::new().layer(axum::middleware::from_fn(request_logger));
//! ```

pub mod request_log;

pub use request_log::{CORRELATION_ID_HEADER, CorrelationId, request_logger};
