//! In-memory implementation of ProductRepository
//!
//! Used by tests and for running the API without a database. Each instance
//! owns its own map; nothing is shared between instances.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::pagination::{PageRequest, ProductPagination};
use crate::product::{Product, ProductId};
use crate::repository::ProductRepository;

#[derive(Default)]
pub struct InMemoryProductRepository {
    products: RwLock<HashMap<ProductId, Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored products.
    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    #[instrument(skip(self, product), fields(product_id = %product.id()))]
    async fn create(&self, product: Product) -> ProductResult<Product> {
        let mut products = self.products.write().await;
        if products.contains_key(product.id()) {
            return Err(ProductError::Conflict(product.id().clone()));
        }
        products.insert(product.id().clone(), product.clone());
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &ProductId) -> ProductResult<Option<Product>> {
        Ok(self.products.read().await.get(id).cloned())
    }

    #[instrument(skip(self))]
    async fn list(&self, request: PageRequest) -> ProductResult<ProductPagination> {
        let mut products: Vec<Product> = self.products.read().await.values().cloned().collect();
        products.sort_by(|a, b| request.compare(a, b));

        let window = products
            .into_iter()
            .skip(usize::try_from(request.skip()).unwrap_or(usize::MAX))
            .take(usize::try_from(request.fetch_limit()).unwrap_or(usize::MAX))
            .collect();

        Ok(ProductPagination::from_window(window, &request))
    }

    #[instrument(skip(self, product), fields(product_id = %product.id()))]
    async fn update(&self, product: Product) -> ProductResult<()> {
        let mut products = self.products.write().await;
        match products.get_mut(product.id()) {
            Some(stored) => {
                *stored = product;
                Ok(())
            }
            None => Err(ProductError::NotFound(product.id().clone())),
        }
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &ProductId) -> ProductResult<()> {
        self.products.write().await.remove(id);
        Ok(())
    }
}
