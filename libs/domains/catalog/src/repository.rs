use async_trait::async_trait;

use crate::error::ProductResult;
use crate::pagination::{PageRequest, ProductPagination};
use crate::product::{Product, ProductId};

/// Repository trait for Product persistence
///
/// The service only ever hands validated products to a repository.
/// Implementations: [`MongoProductRepository`](crate::MongoProductRepository)
/// and [`InMemoryProductRepository`](crate::InMemoryProductRepository).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Store a new product. Fails with `Conflict` if the id is taken.
    async fn create(&self, product: Product) -> ProductResult<Product>;

    /// Get a product by ID. A missing product is `Ok(None)`.
    async fn find_by_id(&self, id: &ProductId) -> ProductResult<Option<Product>>;

    /// One page of products in `request` order, over-fetched by one to
    /// compute `has_next_page`.
    async fn list(&self, request: PageRequest) -> ProductResult<ProductPagination>;

    /// Replace the stored product with the same id. Fails with `NotFound`
    /// if there is none.
    async fn update(&self, product: Product) -> ProductResult<()>;

    /// Delete a product by ID. Deleting a missing product succeeds.
    async fn delete(&self, id: &ProductId) -> ProductResult<()>;
}
