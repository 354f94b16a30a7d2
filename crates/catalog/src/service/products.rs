//! Product services, including tag reconciliation on update.

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, info, instrument};

use db::{
    DbError, DbPool,
    models::ProductRow,
    repository::{product_tags as link_repo, products as product_repo},
};

use crate::{CatalogError, NewProduct, Product, ProductChanges, Tag, TagSyncPlan};

/// Every product with its category and tags, ordered by id.
#[instrument(skip(pool))]
pub async fn list_products(pool: &DbPool) -> Result<Vec<Product>, CatalogError> {
    let rows = product_repo::list_products(pool).await?;

    let mut tags_by_product: HashMap<i64, Vec<Tag>> = HashMap::new();
    for link in link_repo::list_tag_links(pool).await? {
        tags_by_product
            .entry(link.product_id)
            .or_default()
            .push(Tag::from(link));
    }

    Ok(rows
        .into_iter()
        .map(|row| {
            let tags = tags_by_product.remove(&row.id).unwrap_or_default();
            Product::from_parts(row, tags)
        })
        .collect())
}

/// One product with its category and tags.
#[instrument(skip(pool))]
pub async fn get_product(pool: &DbPool, id: i64) -> Result<Product, CatalogError> {
    let row = product_repo::get_product(pool, id).await?;
    let tags = link_repo::list_tag_links_for_product(pool, id)
        .await?
        .into_iter()
        .map(Tag::from)
        .collect();

    Ok(Product::from_parts(row, tags))
}

/// Insert a product and pair it with every distinct id in `tagIds`.
///
/// Both writes share one transaction, so an unknown tag id leaves no
/// product behind.
#[instrument(skip(pool, input), fields(product_name = %input.product_name))]
pub async fn create_product(pool: &DbPool, input: NewProduct) -> Result<ProductRow, CatalogError> {
    input.validate()?;
    let tag_ids: Vec<i64> = input
        .tag_ids
        .iter()
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut tx = pool.begin().await.map_err(DbError::from)?;
    let product = product_repo::create_product(
        &mut *tx,
        &input.product_name,
        input.price,
        input.stock,
        input.category_id,
    )
    .await?;
    let paired = link_repo::bulk_create(&mut *tx, product.id, &tag_ids).await?;
    tx.commit().await.map_err(DbError::from)?;

    info!(product_id = product.id, tags = paired, "Created product");
    Ok(product)
}

/// Apply the given field changes, then reconcile tags when `tagIds` is present.
///
/// Returns the reconciliation that was applied, if any.
#[instrument(skip(pool, changes))]
pub async fn update_product(
    pool: &DbPool,
    id: i64,
    changes: ProductChanges,
) -> Result<Option<TagSyncPlan>, CatalogError> {
    changes.validate()?;
    product_repo::update_product(
        pool,
        id,
        changes.product_name.as_deref(),
        changes.price,
        changes.stock,
        changes.category_id,
    )
    .await?;

    let plan = match changes.tag_ids {
        Some(requested) => Some(sync_tags(pool, id, &requested).await?),
        None => None,
    };

    info!(product_id = id, "Updated product");
    Ok(plan)
}

/// Bring the stored tags of `product_id` in line with `requested`.
///
/// Stale join rows are deleted and new ones inserted concurrently; the two
/// statements touch disjoint rows.
pub async fn sync_tags(
    pool: &DbPool,
    product_id: i64,
    requested: &[i64],
) -> Result<TagSyncPlan, CatalogError> {
    let current = link_repo::list_for_product(pool, product_id).await?;
    let plan = TagSyncPlan::compute(&current, requested);
    debug!(
        product_id,
        added = ?plan.added_tag_ids,
        removed = ?plan.removed_tag_ids,
        "Reconciling product tags"
    );

    if !plan.is_noop() {
        tokio::try_join!(
            link_repo::delete_by_ids(pool, &plan.stale_row_ids),
            link_repo::bulk_create(pool, product_id, &plan.added_tag_ids),
        )?;
    }

    Ok(plan)
}

/// Delete a product; its tag pairings go with it.
#[instrument(skip(pool))]
pub async fn delete_product(pool: &DbPool, id: i64) -> Result<(), CatalogError> {
    product_repo::delete_product(pool, id).await?;
    info!(product_id = id, "Deleted product");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::fixtures::catalog_pool;

    fn new_product(name: &str, tag_ids: Vec<i64>) -> NewProduct {
        NewProduct {
            product_name: name.into(),
            price: 14.99,
            stock: 14,
            category_id: Some(1),
            tag_ids,
        }
    }

    async fn stored_tag_rows(pool: &DbPool, id: i64) -> Vec<(i64, i64)> {
        link_repo::list_for_product(pool, id)
            .await
            .unwrap()
            .into_iter()
            .map(|row| (row.id, row.tag_id))
            .collect()
    }

    #[tokio::test]
    async fn create_pairs_distinct_tags() {
        let pool = catalog_pool().await;
        let created = create_product(&pool, new_product("Plain T-Shirt", vec![2, 1, 2]))
            .await
            .unwrap();

        let product = get_product(&pool, created.id).await.unwrap();
        let tag_ids: Vec<i64> = product.tags.iter().map(|t| t.id).collect();
        assert_eq!(tag_ids, vec![1, 2]);
        assert_eq!(product.category.unwrap().category_name, "Shirts");
    }

    #[tokio::test]
    async fn create_with_unknown_tag_rolls_back() {
        let pool = catalog_pool().await;
        let err = create_product(&pool, new_product("Ghost", vec![1, 99]))
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::Database(_)));
        assert!(list_products(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_rejects_invalid_input_before_writing() {
        let pool = catalog_pool().await;
        let mut input = new_product("Bad", vec![]);
        input.price = -2.0;

        let err = create_product(&pool, input).await.unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
        assert!(list_products(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_nests_tags_per_product() {
        let pool = catalog_pool().await;
        create_product(&pool, new_product("A", vec![1])).await.unwrap();
        create_product(&pool, new_product("B", vec![])).await.unwrap();
        create_product(&pool, new_product("C", vec![3, 4])).await.unwrap();

        let products = list_products(&pool).await.unwrap();
        let tag_counts: Vec<usize> = products.iter().map(|p| p.tags.len()).collect();
        assert_eq!(tag_counts, vec![1, 0, 2]);
    }

    #[tokio::test]
    async fn update_touches_only_the_symmetric_difference() {
        let pool = catalog_pool().await;
        let created = create_product(&pool, new_product("Shirt", vec![1, 2, 3]))
            .await
            .unwrap();
        let before = stored_tag_rows(&pool, created.id).await;

        let changes = ProductChanges {
            tag_ids: Some(vec![2, 3, 4]),
            ..Default::default()
        };
        let plan = update_product(&pool, created.id, changes)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(plan.added_tag_ids, vec![4]);
        assert_eq!(plan.removed_tag_ids, vec![1]);

        let after = stored_tag_rows(&pool, created.id).await;
        // Rows for tags 2 and 3 keep their primary keys.
        assert_eq!(&after[..2], &before[1..]);
        assert_eq!(after.len(), 3);
        assert_eq!(after[2].1, 4);
    }

    #[tokio::test]
    async fn update_without_tag_ids_leaves_tags_alone() {
        let pool = catalog_pool().await;
        let created = create_product(&pool, new_product("Shirt", vec![1, 2]))
            .await
            .unwrap();
        let before = stored_tag_rows(&pool, created.id).await;

        let changes = ProductChanges {
            price: Some(9.5),
            ..Default::default()
        };
        assert!(update_product(&pool, created.id, changes).await.unwrap().is_none());

        assert_eq!(stored_tag_rows(&pool, created.id).await, before);
        assert_eq!(get_product(&pool, created.id).await.unwrap().price, 9.5);
    }

    #[tokio::test]
    async fn update_missing_product_is_not_found() {
        let pool = catalog_pool().await;
        let err = update_product(&pool, 404, ProductChanges::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { entity: "Product", id: 404 }));
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let pool = catalog_pool().await;
        let created = create_product(&pool, new_product("Shirt", vec![1]))
            .await
            .unwrap();

        delete_product(&pool, created.id).await.unwrap();

        assert!(matches!(
            get_product(&pool, created.id).await,
            Err(CatalogError::NotFound { .. })
        ));
        assert!(matches!(
            delete_product(&pool, created.id).await,
            Err(CatalogError::NotFound { .. })
        ));
    }
}
