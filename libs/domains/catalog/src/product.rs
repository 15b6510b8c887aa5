//! Product entity and its invariants

use chrono::{DateTime, SubsecRound, TimeDelta, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::Display;
use thiserror::Error;
use utoipa::ToSchema;

/// Opaque product identifier.
///
/// Generated identifiers are 24-character hex ObjectIds so every product can
/// be stored by the MongoDB adapter; callers may supply their own.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String, example = "665f1c2ab4d1e8a9c0f3b2a1")]
pub struct ProductId(String);

impl ProductId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn generate() -> Self {
        Self(ObjectId::new().to_hex())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Product fields that can fail validation, named as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ProductField {
    Name,
    Price,
    StockQuantity,
    ReservedQuantity,
    SoldQuantity,
    IsPublished,
    Description,
    CreatedAt,
    UpdatedAt,
    #[strum(serialize = "_id")]
    Id,
}

impl ProductField {
    /// Key of the field in raw input.
    pub fn key(&self) -> String {
        self.to_string()
    }

    /// Machine-readable reason, e.g. `"invalid name"`.
    pub fn reason(&self) -> String {
        format!("invalid {}", self)
    }

    /// Stable error code, e.g. `INVALID_NAME`.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Name => "INVALID_NAME",
            Self::Price => "INVALID_PRICE",
            Self::StockQuantity => "INVALID_STOCK_QUANTITY",
            Self::ReservedQuantity => "INVALID_RESERVED_QUANTITY",
            Self::SoldQuantity => "INVALID_SOLD_QUANTITY",
            Self::IsPublished => "INVALID_IS_PUBLISHED",
            Self::Description => "INVALID_DESCRIPTION",
            Self::CreatedAt => "INVALID_CREATED_AT",
            Self::UpdatedAt => "INVALID_UPDATED_AT",
            Self::Id => "INVALID_ID",
        }
    }

    /// Human-readable message returned to clients.
    pub fn message(&self) -> String {
        match self {
            Self::Name | Self::Price => format!("Invalid or missing '{}'", self),
            _ => format!("Invalid '{}'", self),
        }
    }
}

/// A product field failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    field: ProductField,
    message: String,
}

impl ValidationError {
    pub fn new(field: ProductField) -> Self {
        Self {
            field,
            message: field.message(),
        }
    }

    pub fn field(&self) -> ProductField {
        self.field
    }

    pub fn reason(&self) -> String {
        self.field.reason()
    }

    pub fn code(&self) -> &'static str {
        self.field.code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Current time at the precision products are stored with (milliseconds).
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Timestamp for a write that follows one stamped `previous`.
///
/// Always strictly after `previous`, even within the same millisecond.
pub fn next_update_at(previous: DateTime<Utc>) -> DateTime<Utc> {
    now().max(previous + TimeDelta::milliseconds(1))
}

/// Every field of a product, unchecked.
///
/// The only way to turn a draft into a [`Product`] is [`Product::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub description: String,
    pub stock_quantity: i64,
    pub reserved_quantity: i64,
    pub sold_quantity: i64,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Field values to merge into an existing product. `None` keeps the
/// current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub stock_quantity: Option<i64>,
    pub reserved_quantity: Option<i64>,
    pub sold_quantity: Option<i64>,
    pub is_published: Option<bool>,
}

/// A catalog product.
///
/// Invariants: `name` is non-empty after trimming, `price` is a finite
/// number ≥ 0 and every quantity is ≥ 0. They hold for every value of this
/// type; fields are private and changes go through [`Product::apply`].
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Product {
    #[serde(rename = "_id")]
    #[schema(value_type = String, example = "665f1c2ab4d1e8a9c0f3b2a1")]
    id: ProductId,
    #[schema(example = "Widget")]
    name: String,
    #[schema(example = 9.99)]
    price: f64,
    description: String,
    stock_quantity: i64,
    reserved_quantity: i64,
    sold_quantity: i64,
    is_published: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(draft: ProductDraft) -> Result<Self, ValidationError> {
        if draft.name.trim().is_empty() {
            return Err(ValidationError::new(ProductField::Name));
        }
        if !draft.price.is_finite() || draft.price < 0.0 {
            return Err(ValidationError::new(ProductField::Price));
        }
        if draft.stock_quantity < 0 {
            return Err(ValidationError::new(ProductField::StockQuantity));
        }
        if draft.reserved_quantity < 0 {
            return Err(ValidationError::new(ProductField::ReservedQuantity));
        }
        if draft.sold_quantity < 0 {
            return Err(ValidationError::new(ProductField::SoldQuantity));
        }

        Ok(Self {
            id: draft.id,
            name: draft.name,
            price: draft.price,
            description: draft.description,
            stock_quantity: draft.stock_quantity,
            reserved_quantity: draft.reserved_quantity,
            sold_quantity: draft.sold_quantity,
            is_published: draft.is_published,
            created_at: draft.created_at,
            updated_at: draft.updated_at,
        })
    }

    /// Merge `changes` into a copy of this product, stamping `updated_at`.
    ///
    /// `self` is left untouched whether or not the merge succeeds.
    pub fn apply(
        &self,
        changes: ProductChanges,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        Self::new(ProductDraft {
            id: self.id.clone(),
            name: changes.name.unwrap_or_else(|| self.name.clone()),
            price: changes.price.unwrap_or(self.price),
            description: changes
                .description
                .unwrap_or_else(|| self.description.clone()),
            stock_quantity: changes.stock_quantity.unwrap_or(self.stock_quantity),
            reserved_quantity: changes.reserved_quantity.unwrap_or(self.reserved_quantity),
            sold_quantity: changes.sold_quantity.unwrap_or(self.sold_quantity),
            is_published: changes.is_published.unwrap_or(self.is_published),
            created_at: self.created_at,
            updated_at,
        })
    }

    pub fn id(&self) -> &ProductId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn stock_quantity(&self) -> i64 {
        self.stock_quantity
    }

    pub fn reserved_quantity(&self) -> i64 {
        self.reserved_quantity
    }

    pub fn sold_quantity(&self) -> i64 {
        self.sold_quantity
    }

    pub fn is_published(&self) -> bool {
        self.is_published
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn draft() -> ProductDraft {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        ProductDraft {
            id: ProductId::new("665f1c2ab4d1e8a9c0f3b2a1"),
            name: "Widget".to_string(),
            price: 9.99,
            description: String::new(),
            stock_quantity: 10,
            reserved_quantity: 0,
            sold_quantity: 0,
            is_published: false,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn test_new_accepts_valid_draft() {
        let product = Product::new(draft()).unwrap();
        assert_eq!(product.name(), "Widget");
        assert_eq!(product.price(), 9.99);
        assert_eq!(product.stock_quantity(), 10);
    }

    #[test]
    fn test_new_rejects_blank_name() {
        let err = Product::new(ProductDraft {
            name: "   ".to_string(),
            ..draft()
        })
        .unwrap_err();
        assert_eq!(err.field(), ProductField::Name);
        assert_eq!(err.reason(), "invalid name");
        assert_eq!(err.code(), "INVALID_NAME");
        assert_eq!(err.message(), "Invalid or missing 'name'");
    }

    #[test]
    fn test_new_rejects_negative_and_non_finite_price() {
        for price in [-0.01, f64::NAN, f64::INFINITY] {
            let err = Product::new(ProductDraft { price, ..draft() }).unwrap_err();
            assert_eq!(err.field(), ProductField::Price);
        }
    }

    #[test]
    fn test_new_rejects_negative_quantities_in_order() {
        let err = Product::new(ProductDraft {
            reserved_quantity: -1,
            sold_quantity: -1,
            ..draft()
        })
        .unwrap_err();
        assert_eq!(err.field(), ProductField::ReservedQuantity);
        assert_eq!(err.message(), "Invalid 'reserved_quantity'");

        let err = Product::new(ProductDraft {
            sold_quantity: -5,
            ..draft()
        })
        .unwrap_err();
        assert_eq!(err.code(), "INVALID_SOLD_QUANTITY");
    }

    #[test]
    fn test_apply_merges_present_fields_only() {
        let product = Product::new(draft()).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();

        let updated = product
            .apply(
                ProductChanges {
                    price: Some(12.5),
                    is_published: Some(true),
                    ..ProductChanges::default()
                },
                later,
            )
            .unwrap();

        assert_eq!(updated.price(), 12.5);
        assert!(updated.is_published());
        assert_eq!(updated.name(), "Widget");
        assert_eq!(updated.stock_quantity(), 10);
        assert_eq!(updated.created_at(), product.created_at());
        assert_eq!(updated.updated_at(), later);
        assert_eq!(product.price(), 9.99);
    }

    #[test]
    fn test_apply_cannot_break_invariants() {
        let product = Product::new(draft()).unwrap();
        let err = product
            .apply(
                ProductChanges {
                    stock_quantity: Some(-3),
                    ..ProductChanges::default()
                },
                now(),
            )
            .unwrap_err();
        assert_eq!(err.field(), ProductField::StockQuantity);
    }

    #[test]
    fn test_next_update_at_is_strictly_later() {
        let future = now() + TimeDelta::seconds(60);
        assert_eq!(next_update_at(future), future + TimeDelta::milliseconds(1));

        let past = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert!(next_update_at(past) >= now() - TimeDelta::seconds(1));
    }

    #[test]
    fn test_serializes_id_as_underscore_id() {
        let value = serde_json::to_value(Product::new(draft()).unwrap()).unwrap();
        assert_eq!(value["_id"], "665f1c2ab4d1e8a9c0f3b2a1");
        assert!(value.get("id").is_none());
        assert_eq!(value["created_at"], "2024-01-01T00:00:00Z");
    }

    #[test]
    fn test_generated_ids_are_object_ids() {
        let id = ProductId::generate();
        assert_eq!(id.as_str().len(), 24);
        assert!(ObjectId::parse_str(id.as_str()).is_ok());
        assert_ne!(id, ProductId::generate());
    }

    #[test]
    fn test_field_keys_match_wire_names() {
        assert_eq!(ProductField::StockQuantity.key(), "stock_quantity");
        assert_eq!(ProductField::IsPublished.key(), "is_published");
        assert_eq!(ProductField::Id.key(), "_id");
    }
}
