//! Tag services.

use std::collections::HashMap;

use tracing::{info, instrument};

use db::{
    DbPool,
    models::ProductRow,
    repository::{product_tags as link_repo, tags as tag_repo},
};

use crate::{CatalogError, NewTag, Tag, TagChanges, TagWithProducts};

/// Every tag with the products carrying it, ordered by id.
#[instrument(skip(pool))]
pub async fn list_tags(pool: &DbPool) -> Result<Vec<TagWithProducts>, CatalogError> {
    let rows = tag_repo::list_tags(pool).await?;

    let mut products_by_tag: HashMap<i64, Vec<ProductRow>> = HashMap::new();
    for link in link_repo::list_product_links(pool).await? {
        products_by_tag.entry(link.tag_id).or_default().push(link.product());
    }

    Ok(rows
        .into_iter()
        .map(|row| {
            let products = products_by_tag.remove(&row.id).unwrap_or_default();
            TagWithProducts::from_parts(row, products)
        })
        .collect())
}

/// One tag with the products carrying it.
#[instrument(skip(pool))]
pub async fn get_tag(pool: &DbPool, id: i64) -> Result<TagWithProducts, CatalogError> {
    let row = tag_repo::get_tag(pool, id).await?;
    let products = link_repo::list_product_links_for_tag(pool, id)
        .await?
        .iter()
        .map(|link| link.product())
        .collect();
    Ok(TagWithProducts::from_parts(row, products))
}

#[instrument(skip(pool, input))]
pub async fn create_tag(pool: &DbPool, input: NewTag) -> Result<Tag, CatalogError> {
    let row = tag_repo::create_tag(pool, input.tag_name.as_deref()).await?;
    info!(tag_id = row.id, "Created tag");
    Ok(row.into())
}

#[instrument(skip(pool, changes))]
pub async fn update_tag(pool: &DbPool, id: i64, changes: TagChanges) -> Result<Tag, CatalogError> {
    let row = tag_repo::update_tag(pool, id, changes.tag_name.as_deref()).await?;
    info!(tag_id = id, "Updated tag");
    Ok(row.into())
}

/// Delete a tag; it is detached from every product first by the cascade.
#[instrument(skip(pool))]
pub async fn delete_tag(pool: &DbPool, id: i64) -> Result<(), CatalogError> {
    tag_repo::delete_tag(pool, id).await?;
    info!(tag_id = id, "Deleted tag");
    Ok(())
}
