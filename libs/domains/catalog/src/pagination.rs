//! Listing options, sort policy and page windows

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;
use strum::{Display, EnumString, IntoStaticStr, VariantNames};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::product::Product;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

/// Sortable product fields
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Display,
    EnumString,
    IntoStaticStr,
    VariantNames,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Name,
    #[default]
    Price,
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// Compare two products on this field alone.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::Name => a.name().cmp(b.name()),
            Self::Price => a.price().total_cmp(&b.price()),
            Self::CreatedAt => a.created_at().cmp(&b.created_at()),
            Self::UpdatedAt => a.updated_at().cmp(&b.updated_at()),
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Display,
    EnumString,
    IntoStaticStr,
    VariantNames,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// `1` or `-1`, as used in MongoDB sort documents.
    pub fn direction(&self) -> i32 {
        match self {
            Self::Asc => 1,
            Self::Desc => -1,
        }
    }
}

/// Listing options as received from a client; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListOptions {
    /// One of name, price, created_at, updated_at (default: price)
    pub sort_by: Option<String>,
    /// asc or desc (default: desc)
    pub order: Option<String>,
    /// 1-based page number (default: 1)
    #[validate(range(min = 1))]
    #[param(minimum = 1)]
    pub page: Option<u32>,
    /// Page size (default: 10)
    #[validate(range(min = 1))]
    #[param(minimum = 1)]
    pub limit: Option<u32>,
}

impl ListOptions {
    /// Apply defaults and validate every option.
    ///
    /// Unknown sort fields or orders fail with a configuration error naming
    /// the allowed values; `page` and `limit` must be at least 1, and the
    /// resulting offset must fit in an `i64`.
    pub fn resolve(&self) -> ProductResult<PageRequest> {
        let sort_by = parse_choice::<SortField>(self.sort_by.as_deref(), "sortBy")?;
        let order = parse_choice::<SortOrder>(self.order.as_deref(), "order")?;

        if let Err(errors) = self.validate() {
            let field_errors = errors.field_errors();
            let field = if field_errors.contains_key("page") {
                "page"
            } else {
                "limit"
            };
            return Err(ProductError::Configuration(format!(
                "Invalid {} value. Must be a positive integer",
                field
            )));
        }

        let request = PageRequest {
            sort_by,
            order,
            page: self.page.unwrap_or(DEFAULT_PAGE),
            limit: self.limit.unwrap_or(DEFAULT_LIMIT),
        };

        // Stores take signed 64-bit offsets.
        if i64::try_from(request.skip()).is_err() {
            return Err(ProductError::Configuration(
                "Invalid page value. Offset is out of range".to_string(),
            ));
        }

        Ok(request)
    }
}

fn parse_choice<T>(raw: Option<&str>, name: &str) -> ProductResult<T>
where
    T: Default + FromStr + VariantNames,
{
    match raw {
        None => Ok(T::default()),
        Some(value) => value.parse().map_err(|_| {
            ProductError::Configuration(format!(
                "Invalid {} value. Must be one of: {}",
                name,
                T::VARIANTS.join(", ")
            ))
        }),
    }
}

/// Resolved listing request handed to repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub sort_by: SortField,
    pub order: SortOrder,
    pub page: u32,
    pub limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            sort_by: SortField::default(),
            order: SortOrder::default(),
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Records before the window.
    pub fn skip(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }

    /// One more than `limit`, to learn whether a next page exists.
    pub fn fetch_limit(&self) -> u64 {
        u64::from(self.limit) + 1
    }

    /// Total order used by listings: the sort field, then the identifier,
    /// both in the requested direction.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        let ordering = self
            .sort_by
            .compare(a, b)
            .then_with(|| a.id().cmp(b.id()));
        match self.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

/// A page of products.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProductPagination {
    #[serde(rename = "Products")]
    pub products: Vec<Product>,
    pub page: u32,
    pub limit: u32,
    #[serde(rename = "hasNextPage")]
    pub has_next_page: bool,
}

impl ProductPagination {
    /// Build a page from up to `request.fetch_limit()` records.
    pub fn from_window(mut products: Vec<Product>, request: &PageRequest) -> Self {
        let limit = request.limit as usize;
        let has_next_page = products.len() > limit;
        products.truncate(limit);

        Self {
            products,
            page: request.page,
            limit: request.limit,
            has_next_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::{ProductDraft, ProductId};
    use chrono::{TimeZone, Utc};

    fn product(id: &str, name: &str, price: f64) -> Product {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Product::new(ProductDraft {
            id: ProductId::new(id),
            name: name.to_string(),
            price,
            description: String::new(),
            stock_quantity: 0,
            reserved_quantity: 0,
            sold_quantity: 0,
            is_published: false,
            created_at: at,
            updated_at: at,
        })
        .unwrap()
    }

    #[test]
    fn test_defaults_are_price_desc_first_page_of_ten() {
        let request = ListOptions::default().resolve().unwrap();
        assert_eq!(request.sort_by, SortField::Price);
        assert_eq!(request.order, SortOrder::Desc);
        assert_eq!(request.page, 1);
        assert_eq!(request.limit, 10);
        assert_eq!(request, PageRequest::default());
    }

    #[test]
    fn test_invalid_sort_by_lists_allowed_values() {
        let options = ListOptions {
            sort_by: Some("stock".to_string()),
            ..ListOptions::default()
        };
        let err = options.resolve().unwrap_err();
        assert!(matches!(err, ProductError::Configuration(_)));
        assert_eq!(
            err.to_string(),
            "Invalid sortBy value. Must be one of: name, price, created_at, updated_at"
        );
    }

    #[test]
    fn test_invalid_order_lists_allowed_values() {
        let options = ListOptions {
            order: Some("random".to_string()),
            ..ListOptions::default()
        };
        assert_eq!(
            options.resolve().unwrap_err().to_string(),
            "Invalid order value. Must be one of: asc, desc"
        );
    }

    #[test]
    fn test_zero_page_or_limit_is_rejected() {
        let options = ListOptions {
            page: Some(0),
            ..ListOptions::default()
        };
        assert_eq!(
            options.resolve().unwrap_err().to_string(),
            "Invalid page value. Must be a positive integer"
        );

        let options = ListOptions {
            limit: Some(0),
            ..ListOptions::default()
        };
        assert_eq!(
            options.resolve().unwrap_err().to_string(),
            "Invalid limit value. Must be a positive integer"
        );
    }

    #[test]
    fn test_offset_beyond_i64_is_rejected() {
        let options = ListOptions {
            page: Some(u32::MAX),
            limit: Some(u32::MAX),
            ..ListOptions::default()
        };
        let err = options.resolve().unwrap_err();
        assert!(matches!(err, ProductError::Configuration(_)));
        assert_eq!(err.to_string(), "Invalid page value. Offset is out of range");

        let largest_page = ListOptions {
            page: Some(u32::MAX),
            limit: Some(1),
            ..ListOptions::default()
        };
        assert!(largest_page.resolve().is_ok());
    }

    #[test]
    fn test_explicit_options_are_kept() {
        let options = ListOptions {
            sort_by: Some("created_at".to_string()),
            order: Some("asc".to_string()),
            page: Some(3),
            limit: Some(25),
        };
        let request = options.resolve().unwrap();
        assert_eq!(request.sort_by, SortField::CreatedAt);
        assert_eq!(request.sort_by.as_str(), "created_at");
        assert_eq!(request.order, SortOrder::Asc);
        assert_eq!(request.skip(), 50);
        assert_eq!(request.fetch_limit(), 26);
    }

    #[test]
    fn test_list_options_deserialize_camel_case() {
        let options: ListOptions =
            serde_json::from_value(serde_json::json!({"sortBy": "name", "page": 2})).unwrap();
        assert_eq!(options.sort_by.as_deref(), Some("name"));
        assert_eq!(options.page, Some(2));
    }

    #[test]
    fn test_from_window_detects_next_page() {
        let request = PageRequest {
            limit: 2,
            ..PageRequest::default()
        };
        let items = vec![
            product("a", "A", 3.0),
            product("b", "B", 2.0),
            product("c", "C", 1.0),
        ];

        let page = ProductPagination::from_window(items, &request);
        assert!(page.has_next_page);
        assert_eq!(page.products.len(), 2);

        let last = ProductPagination::from_window(vec![product("c", "C", 1.0)], &request);
        assert!(!last.has_next_page);
    }

    #[test]
    fn test_compare_breaks_ties_by_id() {
        let asc = PageRequest {
            order: SortOrder::Asc,
            ..PageRequest::default()
        };
        let a = product("a", "Same", 5.0);
        let b = product("b", "Same", 5.0);
        assert_eq!(asc.compare(&a, &b), Ordering::Less);
        assert_eq!(PageRequest::default().compare(&a, &b), Ordering::Greater);
    }

    #[test]
    fn test_pagination_serializes_wire_names() {
        let page = ProductPagination::from_window(vec![], &PageRequest::default());
        let value = serde_json::to_value(page).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"Products": [], "page": 1, "limit": 10, "hasNextPage": false})
        );
    }
}
