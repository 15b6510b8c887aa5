//! Untrusted product input and its validation.
//!
//! Create and update requests arrive as arbitrary JSON objects. Both paths
//! run the same field-by-field checks in a fixed order, so the first invalid
//! field reported is deterministic: name, price, stock_quantity,
//! reserved_quantity, sold_quantity, is_published, then description and the
//! fixture-only fields. JSON `null` counts as absent.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::product::{
    next_update_at, now, Product, ProductChanges, ProductDraft, ProductField, ProductId,
    ValidationError,
};

/// Raw product input as received from a client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductInput(Map<String, Value>);

impl ProductInput {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|value| !value.is_null())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Identifier embedded in the input, from `_id` or else `id`.
    pub fn id(&self) -> Result<Option<ProductId>, ValidationError> {
        let value = self.get(&ProductField::Id.key()).or_else(|| self.get("id"));

        match value {
            None => Ok(None),
            Some(Value::String(id)) if !id.trim().is_empty() => {
                Ok(Some(ProductId::new(id.as_str())))
            }
            Some(_) => Err(ValidationError::new(ProductField::Id)),
        }
    }

    fn field<T>(
        &self,
        field: ProductField,
        required: bool,
        parse: impl FnOnce(&Value) -> Option<T>,
    ) -> Result<Option<T>, ValidationError> {
        match self.get(&field.key()) {
            Some(value) => parse(value)
                .map(Some)
                .ok_or_else(|| ValidationError::new(field)),
            None if required => Err(ValidationError::new(field)),
            None => Ok(None),
        }
    }

    fn changes(&self, required: bool) -> Result<ProductChanges, ValidationError> {
        let name = self.field(ProductField::Name, required, |value| {
            value
                .as_str()
                .filter(|name| !name.trim().is_empty())
                .map(str::to_owned)
        })?;
        let price = self.field(ProductField::Price, required, |value| {
            value.as_f64().filter(|price| price.is_finite() && *price >= 0.0)
        })?;
        let stock_quantity = self.field(ProductField::StockQuantity, false, quantity)?;
        let reserved_quantity = self.field(ProductField::ReservedQuantity, false, quantity)?;
        let sold_quantity = self.field(ProductField::SoldQuantity, false, quantity)?;
        let is_published = self.field(ProductField::IsPublished, false, Value::as_bool)?;
        let description = self.field(ProductField::Description, false, |value| {
            value.as_str().map(str::to_owned)
        })?;

        Ok(ProductChanges {
            name,
            price,
            description,
            stock_quantity,
            reserved_quantity,
            sold_quantity,
            is_published,
        })
    }
}

impl From<Map<String, Value>> for ProductInput {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Non-negative whole number. `5.0` is accepted as 5; `2.5` is not.
fn quantity(value: &Value) -> Option<i64> {
    if let Some(quantity) = value.as_i64() {
        return (quantity >= 0).then_some(quantity);
    }
    value
        .as_f64()
        .filter(|q| q.is_finite() && *q >= 0.0 && q.fract() == 0.0 && *q < i64::MAX as f64)
        .map(|q| q as i64)
}

fn timestamp(value: &Value) -> Option<DateTime<Utc>> {
    value
        .as_str()
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|at| at.with_timezone(&Utc).trunc_subsecs(3))
}

/// Build a new product from raw input.
///
/// `name` and `price` are required. Quantities default to 0,
/// `is_published` to false and `description` to empty. `created_at` and
/// `updated_at` may be supplied for fixtures; otherwise both are now, and a
/// lone `created_at` is reused as `updated_at`. Without `_id`/`id` an
/// identifier is generated.
pub fn create_from_input(input: &ProductInput) -> Result<Product, ValidationError> {
    let changes = input.changes(true)?;
    let created_at = input.field(ProductField::CreatedAt, false, timestamp)?;
    let updated_at = input.field(ProductField::UpdatedAt, false, timestamp)?;
    let id = input.id()?.unwrap_or_else(ProductId::generate);

    let created_at = created_at.unwrap_or_else(now);
    let updated_at = updated_at.unwrap_or(created_at);

    Product::new(ProductDraft {
        id,
        name: changes.name.unwrap_or_default(),
        price: changes.price.unwrap_or_default(),
        description: changes.description.unwrap_or_default(),
        stock_quantity: changes.stock_quantity.unwrap_or(0),
        reserved_quantity: changes.reserved_quantity.unwrap_or(0),
        sold_quantity: changes.sold_quantity.unwrap_or(0),
        is_published: changes.is_published.unwrap_or(false),
        created_at,
        updated_at,
    })
}

/// Merge raw input into `existing`, returning the updated product.
///
/// Every field is optional but must be valid when present. Identifier and
/// timestamps in the input are ignored; `updated_at` becomes now, and is
/// always later than the existing value.
pub fn apply_update_from_input(
    existing: &Product,
    input: &ProductInput,
) -> Result<Product, ValidationError> {
    let changes = input.changes(false)?;
    existing.apply(changes, next_update_at(existing.updated_at()))
}

/// Request body for creating a product (documentation only).
///
/// Validation is performed on the raw JSON object; this type describes the
/// accepted shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    /// Optional caller-supplied identifier (24 hex characters)
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[schema(example = "Widget")]
    pub name: String,
    #[schema(example = 9.99, minimum = 0)]
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(minimum = 0)]
    pub stock_quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(minimum = 0)]
    pub reserved_quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(minimum = 0)]
    pub sold_quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request body for updating a product (documentation only). Absent fields
/// keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(minimum = 0)]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(minimum = 0)]
    pub stock_quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(minimum = 0)]
    pub reserved_quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(minimum = 0)]
    pub sold_quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
}

fn to_input<T: Serialize>(body: &T) -> ProductInput {
    match serde_json::to_value(body) {
        Ok(Value::Object(fields)) => ProductInput(fields),
        _ => ProductInput::default(),
    }
}

impl From<&CreateProductRequest> for ProductInput {
    fn from(body: &CreateProductRequest) -> Self {
        to_input(body)
    }
}

impl From<&UpdateProductRequest> for ProductInput {
    fn from(body: &UpdateProductRequest) -> Self {
        to_input(body)
    }
}
