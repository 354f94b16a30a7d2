//! Demo data for a fresh database.
//!
//! `seed_all` recreates the schema and loads a small storefront: five
//! categories, five products, eight tags and a dozen pairings. Rows are
//! inserted through the service functions so they pass the same validation
//! as API requests.

use tracing::info;

use db::{DbPool, pool::reset_schema};

use crate::{CatalogError, NewCategory, NewProduct, NewTag, categories, products, tags};

const CATEGORIES: [&str; 5] = ["Shirts", "Shorts", "Music", "Hats", "Shoes"];

const TAGS: [&str; 8] = [
    "rock music",
    "pop music",
    "blue",
    "red",
    "green",
    "white",
    "gold",
    "pop culture",
];

/// `(name, price, stock, category index, tag indexes)`; indexes are
/// zero-based into `CATEGORIES` and `TAGS`.
const PRODUCTS: [(&str, f64, i64, usize, &[usize]); 5] = [
    ("Plain T-Shirt", 14.99, 14, 0, &[5, 6, 7]),
    ("Running Sneakers", 90.0, 25, 4, &[5]),
    ("Branded Baseball Hat", 22.99, 12, 3, &[0, 2, 7]),
    ("Top 40 Music Compilation Vinyl Record", 12.99, 50, 2, &[0, 1, 7]),
    ("Cargo Shorts", 29.99, 22, 1, &[0, 3]),
];

/// Row counts written by [`seed_all`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub categories: usize,
    pub tags: usize,
    pub products: usize,
    pub pairings: usize,
}

/// Drop and recreate every table, then insert the demo catalog.
pub async fn seed_all(pool: &DbPool) -> Result<SeedSummary, CatalogError> {
    reset_schema(pool).await?;

    let mut category_ids = Vec::with_capacity(CATEGORIES.len());
    for name in CATEGORIES {
        let category = categories::create_category(
            pool,
            NewCategory {
                category_name: name.to_string(),
            },
        )
        .await?;
        category_ids.push(category.id);
    }

    let mut tag_ids = Vec::with_capacity(TAGS.len());
    for name in TAGS {
        let tag = tags::create_tag(
            pool,
            NewTag {
                tag_name: Some(name.to_string()),
            },
        )
        .await?;
        tag_ids.push(tag.id);
    }

    let mut pairings = 0;
    for (name, price, stock, category, tag_indexes) in PRODUCTS {
        products::create_product(
            pool,
            NewProduct {
                product_name: name.to_string(),
                price,
                stock,
                category_id: Some(category_ids[category]),
                tag_ids: tag_indexes.iter().map(|&i| tag_ids[i]).collect(),
            },
        )
        .await?;
        pairings += tag_indexes.len();
    }

    let summary = SeedSummary {
        categories: category_ids.len(),
        tags: tag_ids.len(),
        products: PRODUCTS.len(),
        pairings,
    };
    info!(?summary, "Seeded demo catalog");
    Ok(summary)
}
