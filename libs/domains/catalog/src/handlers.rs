//! HTTP handlers for the catalog API

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestValidationResponse, InternalServerErrorResponse, NotFoundResponse,
    },
    ApiJson, ApiQuery, ApiResponse, EmptyResponse, ResponseStatus,
};
#[allow(unused_imports)]
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::input::{CreateProductRequest, ProductInput, UpdateProductRequest};
use crate::pagination::{ListOptions, ProductPagination, SortField, SortOrder};
use crate::product::{Product, ProductId};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI documentation for the catalog API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
    ),
    components(
        schemas(
            Product, ProductPagination, CreateProductRequest, UpdateProductRequest,
            SortField, SortOrder, ResponseStatus, EmptyResponse
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(shared_service)
}

/// List products, one page at a time
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    params(ListOptions),
    responses(
        (status = 200, description = "A page of products", body = ApiResponse<ProductPagination>),
        (status = 400, description = "Invalid listing options", body = EmptyResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ApiQuery(options): ApiQuery<ListOptions>,
) -> ProductResult<Json<ApiResponse<ProductPagination>>> {
    let page = service.get_products(options).await?;
    Ok(Json(ApiResponse::success(page)))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ApiResponse<Product>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ApiJson(input): ApiJson<ProductInput>,
) -> ProductResult<impl IntoResponse> {
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(product))))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ApiResponse<Product>),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<String>,
) -> ProductResult<Json<ApiResponse<Product>>> {
    let product = service.get_product_by_id(&ProductId::new(id)).await?;
    Ok(Json(ApiResponse::success(product)))
}

/// Update a product
///
/// The path id wins over any id in the body. Omitted fields keep their
/// stored values.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = EmptyResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<String>,
    ApiJson(mut input): ApiJson<ProductInput>,
) -> ProductResult<Json<EmptyResponse>> {
    input.insert("_id", id);
    service.update_product(input).await?;
    Ok(Json(EmptyResponse::success()))
}

/// Delete a product
///
/// Deleting a product that does not exist still succeeds.
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted", body = EmptyResponse,
            example = json!({"status": {"code": 0, "message": "Product deleted"}, "data": null})),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<String>,
) -> ProductResult<Json<EmptyResponse>> {
    service.delete_product(&ProductId::new(id)).await?;
    Ok(Json(EmptyResponse::with_message("Product deleted")))
}
