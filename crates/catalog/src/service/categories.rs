//! Category services.

use std::collections::HashMap;

use tracing::{info, instrument};

use db::{
    DbPool,
    models::ProductRow,
    repository::{categories as category_repo, products as product_repo},
};

use crate::{Category, CategoryChanges, CategoryWithProducts, CatalogError, NewCategory};

/// Every category with its products, ordered by id.
#[instrument(skip(pool))]
pub async fn list_categories(pool: &DbPool) -> Result<Vec<CategoryWithProducts>, CatalogError> {
    let rows = category_repo::list_categories(pool).await?;

    let mut products_by_category: HashMap<i64, Vec<ProductRow>> = HashMap::new();
    for product in product_repo::list_categorised_products(pool).await? {
        if let Some(category_id) = product.category_id {
            products_by_category.entry(category_id).or_default().push(product);
        }
    }

    Ok(rows
        .into_iter()
        .map(|row| {
            let products = products_by_category.remove(&row.id).unwrap_or_default();
            CategoryWithProducts::from_parts(row, products)
        })
        .collect())
}

/// One category with its products.
#[instrument(skip(pool))]
pub async fn get_category(pool: &DbPool, id: i64) -> Result<CategoryWithProducts, CatalogError> {
    let row = category_repo::get_category(pool, id).await?;
    let products = product_repo::list_products_in_category(pool, id).await?;
    Ok(CategoryWithProducts::from_parts(row, products))
}

#[instrument(skip(pool, input))]
pub async fn create_category(pool: &DbPool, input: NewCategory) -> Result<Category, CatalogError> {
    input.validate()?;
    let row = category_repo::create_category(pool, &input.category_name).await?;
    info!(category_id = row.id, "Created category");
    Ok(row.into())
}

#[instrument(skip(pool, changes))]
pub async fn update_category(
    pool: &DbPool,
    id: i64,
    changes: CategoryChanges,
) -> Result<Category, CatalogError> {
    changes.validate()?;
    let row = category_repo::update_category(pool, id, changes.category_name.as_deref()).await?;
    info!(category_id = id, "Updated category");
    Ok(row.into())
}

/// Delete a category; its products stay, uncategorised.
#[instrument(skip(pool))]
pub async fn delete_category(pool: &DbPool, id: i64) -> Result<(), CatalogError> {
    category_repo::delete_category(pool, id).await?;
    info!(category_id = id, "Deleted category");
    Ok(())
}
