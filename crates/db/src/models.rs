//! Row structs that map 1-to-1 onto database tables (or onto the joins the
//! repositories run against them).
//!
//! These are *persistence* models — they carry no domain behaviour.
//! The nested response shapes live in the `catalog` crate.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// category
// ---------------------------------------------------------------------------

/// A persisted category row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CategoryRow {
    pub id: i64,
    pub category_name: String,
}

// ---------------------------------------------------------------------------
// product
// ---------------------------------------------------------------------------

/// A persisted product row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ProductRow {
    pub id: i64,
    pub product_name: String,
    pub price: f64,
    pub stock: i64,
    pub category_id: Option<i64>,
}

/// A product row left-joined with its category.
///
/// `category_name` is `None` when the product has no category.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ProductListingRow {
    pub id: i64,
    pub product_name: String,
    pub price: f64,
    pub stock: i64,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
}

impl ProductListingRow {
    /// Split off the plain product columns.
    pub fn product(&self) -> ProductRow {
        ProductRow {
            id: self.id,
            product_name: self.product_name.clone(),
            price: self.price,
            stock: self.stock,
            category_id: self.category_id,
        }
    }

    /// The joined category, if the product references one.
    pub fn category(&self) -> Option<CategoryRow> {
        match (self.category_id, &self.category_name) {
            (Some(id), Some(name)) => Some(CategoryRow {
                id,
                category_name: name.clone(),
            }),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// tag
// ---------------------------------------------------------------------------

/// A persisted tag row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TagRow {
    pub id: i64,
    pub tag_name: Option<String>,
}

// ---------------------------------------------------------------------------
// product_tag
// ---------------------------------------------------------------------------

/// A persisted product/tag pairing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ProductTagRow {
    pub id: i64,
    pub product_id: i64,
    pub tag_id: i64,
}

/// A tag reached through `product_tag`, keyed by the owning product.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ProductTagLinkRow {
    pub product_id: i64,
    pub tag_id: i64,
    pub tag_name: Option<String>,
}

/// A product reached through `product_tag`, keyed by the tag.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct TaggedProductRow {
    pub tag_id: i64,
    pub id: i64,
    pub product_name: String,
    pub price: f64,
    pub stock: i64,
    pub category_id: Option<i64>,
}

impl TaggedProductRow {
    pub fn product(&self) -> ProductRow {
        ProductRow {
            id: self.id,
            product_name: self.product_name.clone(),
            price: self.price,
            stock: self.stock,
            category_id: self.category_id,
        }
    }
}
