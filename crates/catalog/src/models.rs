//! Core domain models for the catalog.
//!
//! Response types nest their associations the way clients read them:
//! a product carries its category and tags, a category and a tag carry
//! their products. Input types are what create/update requests deserialize
//! into, and know how to validate themselves.

use serde::{Deserialize, Serialize};

use db::models::{CategoryRow, ProductListingRow, ProductRow, ProductTagLinkRow, TagRow};

use crate::CatalogError;

/// Stock assigned to a new product when the request leaves it out.
pub const DEFAULT_STOCK: i64 = 10;

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub category_name: String,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            category_name: row.category_name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub tag_name: Option<String>,
}

impl From<TagRow> for Tag {
    fn from(row: TagRow) -> Self {
        Self {
            id: row.id,
            tag_name: row.tag_name,
        }
    }
}

impl From<ProductTagLinkRow> for Tag {
    fn from(row: ProductTagLinkRow) -> Self {
        Self {
            id: row.tag_id,
            tag_name: row.tag_name,
        }
    }
}

/// A product with its category and tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub product_name: String,
    pub price: f64,
    pub stock: i64,
    pub category_id: Option<i64>,
    pub category: Option<Category>,
    pub tags: Vec<Tag>,
}

impl Product {
    pub fn from_parts(row: ProductListingRow, tags: Vec<Tag>) -> Self {
        let category = row.category().map(Category::from);
        Self {
            id: row.id,
            product_name: row.product_name,
            price: row.price,
            stock: row.stock,
            category_id: row.category_id,
            category,
            tags,
        }
    }
}

/// A category with the products that reference it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryWithProducts {
    pub id: i64,
    pub category_name: String,
    pub products: Vec<ProductRow>,
}

impl CategoryWithProducts {
    pub fn from_parts(row: CategoryRow, products: Vec<ProductRow>) -> Self {
        Self {
            id: row.id,
            category_name: row.category_name,
            products,
        }
    }
}

/// A tag with the products it is attached to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagWithProducts {
    pub id: i64,
    pub tag_name: Option<String>,
    pub products: Vec<ProductRow>,
}

impl TagWithProducts {
    pub fn from_parts(row: TagRow, products: Vec<ProductRow>) -> Self {
        Self {
            id: row.id,
            tag_name: row.tag_name,
            products,
        }
    }
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Body of a product create request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewProduct {
    #[serde(alias = "name")]
    pub product_name: String,
    pub price: f64,
    #[serde(default = "default_stock")]
    pub stock: i64,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default, rename = "tagIds", alias = "tagIds[]")]
    pub tag_ids: Vec<i64>,
}

fn default_stock() -> i64 {
    DEFAULT_STOCK
}

impl NewProduct {
    pub fn validate(&self) -> Result<(), CatalogError> {
        validate_name("product_name", &self.product_name)?;
        validate_price(self.price)?;
        validate_stock(self.stock)
    }
}

/// Body of a product update request. Absent fields keep their stored value;
/// an absent `tagIds` leaves the product's tags alone.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProductChanges {
    #[serde(default, alias = "name")]
    pub product_name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub stock: Option<i64>,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default, rename = "tagIds", alias = "tagIds[]")]
    pub tag_ids: Option<Vec<i64>>,
}

impl ProductChanges {
    pub fn validate(&self) -> Result<(), CatalogError> {
        if let Some(name) = &self.product_name {
            validate_name("product_name", name)?;
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        if let Some(stock) = self.stock {
            validate_stock(stock)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewCategory {
    #[serde(alias = "name")]
    pub category_name: String,
}

impl NewCategory {
    pub fn validate(&self) -> Result<(), CatalogError> {
        validate_name("category_name", &self.category_name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CategoryChanges {
    #[serde(default, alias = "name")]
    pub category_name: Option<String>,
}

impl CategoryChanges {
    pub fn validate(&self) -> Result<(), CatalogError> {
        match &self.category_name {
            Some(name) => validate_name("category_name", name),
            None => Ok(()),
        }
    }
}

/// Tags may be nameless.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NewTag {
    #[serde(default, alias = "name")]
    pub tag_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TagChanges {
    #[serde(default, alias = "name")]
    pub tag_name: Option<String>,
}

fn validate_name(field: &str, value: &str) -> Result<(), CatalogError> {
    if value.trim().is_empty() {
        return Err(CatalogError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<(), CatalogError> {
    if !price.is_finite() || price < 0.0 {
        return Err(CatalogError::Validation(
            "price must be a non-negative decimal".into(),
        ));
    }
    Ok(())
}

fn validate_stock(stock: i64) -> Result<(), CatalogError> {
    if stock < 0 {
        return Err(CatalogError::Validation(
            "stock must be a non-negative integer".into(),
        ));
    }
    Ok(())
}
