use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

use crate::product::{ProductId, ValidationError};

#[derive(Debug, Error)]
pub enum ProductError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Listing options outside the supported values
    #[error("{0}")]
    Configuration(String),

    #[error("Product not found: {0}")]
    NotFound(ProductId),

    #[error("Product with id '{0}' already exists")]
    Conflict(ProductId),

    #[error("Invalid id: {0}")]
    InvalidIdentifier(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::Validation(e) => AppError::Validation(e.message().to_string()),
            ProductError::Configuration(msg) => AppError::BadRequest(msg),
            ProductError::NotFound(_) => AppError::NotFound("Product not found".to_string()),
            ProductError::Conflict(id) => {
                AppError::InternalServerError(format!("Product with id '{}' already exists", id))
            }
            ProductError::InvalidIdentifier(id) => {
                AppError::InternalServerError(format!("Invalid id: {}", id))
            }
            ProductError::Database(msg) => AppError::Database(msg),
            ProductError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        ProductError::Database(err.to_string())
    }
}
