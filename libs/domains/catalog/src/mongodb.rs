//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use mongodb::{
    bson::{self, doc, oid::ObjectId, Document},
    error::{ErrorKind, WriteFailure},
    options::{FindOptions, IndexOptions},
    Collection, Database, IndexModel,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::pagination::{PageRequest, ProductPagination};
use crate::product::{Product, ProductDraft, ProductId};
use crate::repository::ProductRepository;

pub const COLLECTION_NAME: &str = "products";

const DUPLICATE_KEY: i32 = 11000;

/// Stored shape of a product.
///
/// Optional fields default when missing so documents written by other
/// clients still load.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ProductDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    name: String,
    price: f64,
    #[serde(default)]
    description: String,
    #[serde(default)]
    stock_quantity: i64,
    #[serde(default)]
    reserved_quantity: i64,
    #[serde(default)]
    sold_quantity: i64,
    #[serde(default)]
    is_published: bool,
    created_at: bson::DateTime,
    updated_at: bson::DateTime,
}

impl ProductDocument {
    fn from_product(product: &Product) -> ProductResult<Self> {
        Ok(Self {
            id: object_id(product.id())?,
            name: product.name().to_string(),
            price: product.price(),
            description: product.description().to_string(),
            stock_quantity: product.stock_quantity(),
            reserved_quantity: product.reserved_quantity(),
            sold_quantity: product.sold_quantity(),
            is_published: product.is_published(),
            created_at: to_bson_datetime(product.created_at()),
            updated_at: to_bson_datetime(product.updated_at()),
        })
    }

    fn into_product(self) -> ProductResult<Product> {
        let id = self.id.to_hex();
        Product::new(ProductDraft {
            id: ProductId::new(id.clone()),
            name: self.name,
            price: self.price,
            description: self.description,
            stock_quantity: self.stock_quantity,
            reserved_quantity: self.reserved_quantity,
            sold_quantity: self.sold_quantity,
            is_published: self.is_published,
            created_at: from_bson_datetime(self.created_at)?,
            updated_at: from_bson_datetime(self.updated_at)?,
        })
        .map_err(|e| ProductError::Database(format!("stored product {} is invalid: {}", id, e)))
    }
}

fn object_id(id: &ProductId) -> ProductResult<ObjectId> {
    ObjectId::parse_str(id.as_str()).map_err(|_| ProductError::InvalidIdentifier(id.to_string()))
}

fn to_bson_datetime(at: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(at.timestamp_millis())
}

fn from_bson_datetime(at: bson::DateTime) -> ProductResult<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(at.timestamp_millis())
        .ok_or_else(|| ProductError::Database(format!("timestamp out of range: {}", at)))
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(e)) if e.code == DUPLICATE_KEY
    )
}

/// MongoDB implementation of the ProductRepository
pub struct MongoProductRepository {
    collection: Collection<ProductDocument>,
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, COLLECTION_NAME)
    }

    /// Use a custom collection name (tests run against isolated collections).
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<ProductDocument>(collection_name);
        Self { collection }
    }

    /// Create the indexes backing every sortable field.
    pub async fn init_indexes(&self) -> ProductResult<()> {
        let indexes = ["price", "name", "created_at", "updated_at"]
            .into_iter()
            .map(|field| {
                IndexModel::builder()
                    .keys(doc! { field: 1 })
                    .options(
                        IndexOptions::builder()
                            .name(format!("idx_{}", field))
                            .build(),
                    )
                    .build()
            })
            .collect::<Vec<_>>();

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Product indexes created successfully");
        Ok(())
    }

    /// Number of stored documents.
    pub async fn count(&self) -> ProductResult<u64> {
        Ok(self.collection.count_documents(doc! {}).await?)
    }

    fn sort_document(request: &PageRequest) -> Document {
        let field = request.sort_by.as_str();
        let direction = request.order.direction();
        doc! { field: direction, "_id": direction }
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, product), fields(product_id = %product.id()))]
    async fn create(&self, product: Product) -> ProductResult<Product> {
        let document = ProductDocument::from_product(&product)?;

        self.collection
            .insert_one(&document)
            .await
            .map_err(|err| {
                if is_duplicate_key(&err) {
                    ProductError::Conflict(product.id().clone())
                } else {
                    err.into()
                }
            })?;

        Ok(product)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &ProductId) -> ProductResult<Option<Product>> {
        // Ids that cannot be ObjectIds can never have been stored.
        let Ok(oid) = object_id(id) else {
            return Ok(None);
        };

        self.collection
            .find_one(doc! { "_id": oid })
            .await?
            .map(ProductDocument::into_product)
            .transpose()
    }

    #[instrument(skip(self))]
    async fn list(&self, request: PageRequest) -> ProductResult<ProductPagination> {
        let limit = i64::try_from(request.fetch_limit())
            .map_err(|_| ProductError::Internal("page size out of range".to_string()))?;

        let options = FindOptions::builder()
            .sort(Self::sort_document(&request))
            .skip(request.skip())
            .limit(limit)
            .build();

        let cursor = self.collection.find(doc! {}).with_options(options).await?;
        let documents: Vec<ProductDocument> = cursor.try_collect().await?;

        let products = documents
            .into_iter()
            .map(ProductDocument::into_product)
            .collect::<ProductResult<Vec<_>>>()?;

        Ok(ProductPagination::from_window(products, &request))
    }

    #[instrument(skip(self, product), fields(product_id = %product.id()))]
    async fn update(&self, product: Product) -> ProductResult<()> {
        let document = ProductDocument::from_product(&product)?;

        let update = doc! {
            "$set": {
                "name": document.name.as_str(),
                "price": document.price,
                "description": document.description.as_str(),
                "stock_quantity": document.stock_quantity,
                "reserved_quantity": document.reserved_quantity,
                "sold_quantity": document.sold_quantity,
                "is_published": document.is_published,
                "updated_at": document.updated_at,
            }
        };

        let result = self
            .collection
            .update_one(doc! { "_id": document.id }, update)
            .await?;

        if result.matched_count == 0 {
            return Err(ProductError::NotFound(product.id().clone()));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &ProductId) -> ProductResult<()> {
        let oid = object_id(id)?;
        let result = self.collection.delete_one(doc! { "_id": oid }).await?;

        if result.deleted_count == 0 {
            tracing::debug!(product_id = %id, "Delete matched no product");
        }
        Ok(())
    }
}
