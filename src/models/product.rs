//! Product domain model and field validation
//!
//! Three shapes, one direction: `ProductDraft` is what clients send,
//! `NewProduct` is a draft that passed validation, `Product` is a stored
//! row with its generated id. Validation happens on construction of
//! `NewProduct`; nothing unvalidated reaches the repository.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::ValidationError;

/// Maximum length for product names
pub const MAX_NAME_LEN: usize = 60;

/// Maximum length for product descriptions
pub const MAX_DESCRIPTION_LEN: usize = 1000;

/// Maximum length for brand names
pub const MAX_BRAND_LEN: usize = 60;

/// Maximum length for the thumbnail path
pub const MAX_THUMBNAIL_LEN: usize = 255;

/// Persisted product row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub brand: String,
    pub price: f64,
    pub available: bool,
    pub thumbnail: String,
    pub category_id: i64,
}

/// Incoming product payload.
///
/// Every field is optional at the wire level so that a missing field
/// reports the domain message ("Product availability must be informed.")
/// rather than a deserializer error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductDraft {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub brand: Option<String>,
    pub price: Option<f64>,
    pub available: Option<bool>,
    pub thumbnail: Option<String>,
    pub category_id: Option<i64>,
}

/// Validated product fields, ready to persist.
///
/// Obtained via [`ProductDraft::validated`]; construction is the
/// validation step.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub brand: String,
    pub price: f64,
    pub available: bool,
    pub thumbnail: String,
    pub category_id: i64,
}

impl ProductDraft {
    /// Validate all fields and produce a [`NewProduct`].
    ///
    /// # Rules
    /// - name, description, brand: non-empty, within their length caps
    /// - price: present and strictly positive
    /// - available, categoryId: present
    /// - thumbnail: at most 255 characters (may be empty)
    ///
    /// Length limits are counted in characters, not bytes.
    pub fn validated(self) -> Result<NewProduct, ValidationError> {
        let name = self.name.unwrap_or_default();
        if name.is_empty() || name.chars().count() > MAX_NAME_LEN {
            return Err(ValidationError::Length {
                field: "name",
                max: MAX_NAME_LEN,
            });
        }

        let description = self.description.unwrap_or_default();
        if description.is_empty() || description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(ValidationError::Length {
                field: "description",
                max: MAX_DESCRIPTION_LEN,
            });
        }

        let brand = self.brand.unwrap_or_default();
        if brand.is_empty() || brand.chars().count() > MAX_BRAND_LEN {
            return Err(ValidationError::Length {
                field: "brand",
                max: MAX_BRAND_LEN,
            });
        }

        let price = match self.price {
            Some(price) if price > 0.0 => price,
            _ => return Err(ValidationError::NonPositive { field: "price" }),
        };

        let available = self.available.ok_or(ValidationError::Missing {
            field: "availability",
        })?;

        let thumbnail = self.thumbnail.unwrap_or_default();
        if thumbnail.chars().count() > MAX_THUMBNAIL_LEN {
            return Err(ValidationError::TooLong {
                field: "thumbnail",
                max: MAX_THUMBNAIL_LEN,
            });
        }

        let category_id = self
            .category_id
            .ok_or(ValidationError::Missing { field: "category" })?;

        Ok(NewProduct {
            name,
            description,
            brand,
            price,
            available,
            thumbnail,
            category_id,
        })
    }
}

impl NewProduct {
    /// Attach a storage-assigned id.
    pub fn into_product(self, id: i64) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            brand: self.brand,
            price: self.price,
            available: self.available,
            thumbnail: self.thumbnail,
            category_id: self.category_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ProductDraft {
        ProductDraft {
            id: None,
            name: Some("Stratocaster".to_string()),
            description: Some("Double-cutaway electric guitar".to_string()),
            brand: Some("Fender".to_string()),
            price: Some(1499.99),
            available: Some(true),
            thumbnail: Some("/uploads/1700000000000.jpg".to_string()),
            category_id: Some(1),
        }
    }

    #[test]
    fn valid_draft_passes() {
        let product = draft().validated().unwrap();
        assert_eq!(product.name, "Stratocaster");
        assert_eq!(product.category_id, 1);
    }

    #[test]
    fn name_over_60_chars_rejected() {
        let mut d = draft();
        d.name = Some("a".repeat(61));
        let err = d.validated().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Product name cannot be empty or exceed 60 characters."
        );
    }

    #[test]
    fn name_exactly_60_chars_accepted() {
        let mut d = draft();
        d.name = Some("a".repeat(60));
        assert!(d.validated().is_ok());
    }

    #[test]
    fn missing_name_rejected_like_empty() {
        let mut d = draft();
        d.name = None;
        let err = d.validated().unwrap_err();
        assert!(matches!(err, ValidationError::Length { field: "name", .. }));
    }

    #[test]
    fn zero_price_rejected() {
        let mut d = draft();
        d.price = Some(0.0);
        let err = d.validated().unwrap_err();
        assert_eq!(err.to_string(), "Product price must be greater than 0.");
    }

    #[test]
    fn missing_price_rejected() {
        let mut d = draft();
        d.price = None;
        assert!(matches!(
            d.validated().unwrap_err(),
            ValidationError::NonPositive { field: "price" }
        ));
    }

    #[test]
    fn missing_availability_rejected() {
        let mut d = draft();
        d.available = None;
        let err = d.validated().unwrap_err();
        assert_eq!(err.to_string(), "Product availability must be informed.");
    }

    #[test]
    fn empty_thumbnail_accepted() {
        let mut d = draft();
        d.thumbnail = None;
        let product = d.validated().unwrap();
        assert_eq!(product.thumbnail, "");
    }

    #[test]
    fn thumbnail_over_255_chars_rejected() {
        let mut d = draft();
        d.thumbnail = Some("a".repeat(256));
        let err = d.validated().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Product thumbnail cannot exceed 255 characters."
        );
    }

    #[test]
    fn missing_category_rejected() {
        let mut d = draft();
        d.category_id = None;
        let err = d.validated().unwrap_err();
        assert_eq!(err.to_string(), "Product category must be informed.");
    }

    #[test]
    fn camel_case_wire_names() {
        let json = serde_json::json!({
            "name": "Stratocaster",
            "description": "Double-cutaway electric guitar",
            "brand": "Fender",
            "price": 1499.99,
            "available": true,
            "thumbnail": "",
            "categoryId": 7
        });
        let d: ProductDraft = serde_json::from_value(json).unwrap();
        assert_eq!(d.category_id, Some(7));
    }
}
