//! Response envelope shared by every API endpoint.
//!
//! Every body has the shape `{ "status": { "code", "message" }, "data" }`.
//! Successful calls report code `0`; failures report the HTTP status code
//! and carry `data: null`.

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToSchema;

/// Status code reported by successful responses.
pub const SUCCESS_CODE: u16 = 0;

/// Status message reported by successful responses unless overridden.
pub const SUCCESS_MESSAGE: &str = "success";

/// The `status` block of the envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ResponseStatus {
    /// `0` on success, the HTTP status code otherwise
    #[schema(example = 0)]
    pub code: u16,
    #[schema(example = "success")]
    pub message: String,
}

impl ResponseStatus {
    pub fn success() -> Self {
        Self {
            code: SUCCESS_CODE,
            message: SUCCESS_MESSAGE.to_string(),
        }
    }
}

/// Envelope around a payload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub status: ResponseStatus,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: ResponseStatus::success(),
            data: Some(data),
        }
    }
}

/// Envelope without a payload, used for failures and for operations that
/// return nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EmptyResponse {
    pub status: ResponseStatus,
    #[schema(value_type = Option<Object>, example = json!(null))]
    pub data: Option<serde_json::Value>,
}

impl EmptyResponse {
    /// Success envelope with a custom message, e.g. `"Product deleted"`.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus {
                code: SUCCESS_CODE,
                message: message.into(),
            },
            data: None,
        }
    }

    pub fn success() -> Self {
        Self {
            status: ResponseStatus::success(),
            data: None,
        }
    }

    /// Failure envelope; the code mirrors the HTTP status.
    pub fn failure(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus {
                code: status.as_u16(),
                message: message.into(),
            },
            data: None,
        }
    }
}
