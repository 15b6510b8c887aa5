//! Catalog Domain
//!
//! Product catalog with strict input validation, paginated listings and
//! interchangeable storage (MongoDB or in-memory).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, response envelope
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Use cases, input validation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Port (trait) + MongoDB / in-memory adapters
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Product   │  ← Entity and its invariants
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_catalog::{handlers, MongoProductRepository, ProductService};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("catalog");
//!
//! let repository = MongoProductRepository::new(&db);
//! repository.init_indexes().await?;
//! let service = ProductService::new(repository);
//!
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod input;
pub mod memory;
pub mod mongodb;
pub mod pagination;
pub mod product;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use input::{
    apply_update_from_input, create_from_input, CreateProductRequest, ProductInput,
    UpdateProductRequest,
};
pub use memory::InMemoryProductRepository;
pub use mongodb::MongoProductRepository;
pub use pagination::{
    ListOptions, PageRequest, ProductPagination, SortField, SortOrder, DEFAULT_LIMIT,
    DEFAULT_PAGE,
};
pub use product::{Product, ProductChanges, ProductDraft, ProductField, ProductId, ValidationError};
pub use repository::ProductRepository;
pub use service::ProductService;
