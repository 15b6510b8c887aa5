//! Extractors whose rejections render as the failure envelope.
//!
//! axum's own `Json` and `Query` reject with plain-text bodies; these wrap
//! them so malformed input answers with the same shape as every other error.

pub mod json;
pub mod query;

pub use json::ApiJson;
pub use query::ApiQuery;
