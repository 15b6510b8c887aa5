//! Reusable OpenAPI response types for consistent API documentation.

use crate::response::EmptyResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "status": {"code": 500, "message": "Internal Server Error"},
        "data": null
    })
)]
pub struct InternalServerErrorResponse(pub EmptyResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Validation Error",
    content_type = "application/json",
    example = json!({
        "status": {"code": 400, "message": "Invalid or missing 'name'"},
        "data": null
    })
)]
pub struct BadRequestValidationResponse(pub EmptyResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "status": {"code": 404, "message": "Product not found"},
        "data": null
    })
)]
pub struct NotFoundResponse(pub EmptyResponse);
