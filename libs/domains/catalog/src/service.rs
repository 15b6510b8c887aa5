//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::input::{apply_update_from_input, create_from_input, ProductInput};
use crate::pagination::{ListOptions, ProductPagination};
use crate::product::{Product, ProductField, ProductId, ValidationError};
use crate::repository::ProductRepository;

/// Product service providing the catalog use cases
///
/// Input is validated before any repository call; repository errors pass
/// through unchanged and only absence is turned into `NotFound`.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Share an existing repository instance.
    pub fn from_arc(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Validate raw input and store the resulting product.
    #[instrument(skip(self, input))]
    pub async fn create_product(&self, input: ProductInput) -> ProductResult<Product> {
        let product = create_from_input(&input)?;
        let product = self.repository.create(product).await?;
        tracing::info!(product_id = %product.id(), "Product created");
        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn get_product_by_id(&self, id: &ProductId) -> ProductResult<Product> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.clone()))
    }

    /// List products; options are defaulted and validated before the
    /// repository is queried.
    #[instrument(skip(self))]
    pub async fn get_products(&self, options: ListOptions) -> ProductResult<ProductPagination> {
        let request = options.resolve()?;
        self.repository.list(request).await
    }

    /// Merge raw input into the product whose id is embedded in it
    /// (`_id` or `id`).
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, input: ProductInput) -> ProductResult<()> {
        let id = input
            .id()?
            .ok_or_else(|| ValidationError::new(ProductField::Id))?;

        let existing = self
            .repository
            .find_by_id(&id)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.clone()))?;

        let updated = apply_update_from_input(&existing, &input)?;
        self.repository.update(updated).await?;

        tracing::info!(product_id = %id, "Product updated");
        Ok(())
    }

    /// Delete a product; deleting a missing product succeeds.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &ProductId) -> ProductResult<()> {
        self.repository.delete(id).await?;
        tracing::info!(product_id = %id, "Product deleted");
        Ok(())
    }
}
