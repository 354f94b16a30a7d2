//! `product_tag` join-table operations.
//!
//! Pairs are unique per `(product_id, tag_id)`; the schema rejects duplicates,
//! so callers are expected to pass de-duplicated tag ids.

use sqlx::{Executor, QueryBuilder, Sqlite, SqlitePool};

use crate::{
    DbError,
    models::{ProductTagLinkRow, ProductTagRow, TaggedProductRow},
};

/// Return the join rows of one product, ordered by id.
pub async fn list_for_product(
    pool: &SqlitePool,
    product_id: i64,
) -> Result<Vec<ProductTagRow>, DbError> {
    let rows = sqlx::query_as::<_, ProductTagRow>(
        "SELECT id, product_id, tag_id FROM product_tag WHERE product_id = ?1 ORDER BY id",
    )
    .bind(product_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Insert one join row per tag id for `product_id`.
///
/// Returns the number of rows inserted. An empty `tag_ids` is a no-op.
pub async fn bulk_create<'e, E>(
    executor: E,
    product_id: i64,
    tag_ids: &[i64],
) -> Result<u64, DbError>
where
    E: Executor<'e, Database = Sqlite>,
{
    if tag_ids.is_empty() {
        return Ok(0);
    }

    let mut builder: QueryBuilder<Sqlite> =
        QueryBuilder::new("INSERT INTO product_tag (product_id, tag_id) ");
    builder.push_values(tag_ids, |mut row, tag_id| {
        row.push_bind(product_id).push_bind(*tag_id);
    });

    let result = builder.build().execute(executor).await?;
    Ok(result.rows_affected())
}

/// Delete the join rows with the given primary keys.
///
/// Returns the number of rows deleted. An empty `ids` is a no-op.
pub async fn delete_by_ids(pool: &SqlitePool, ids: &[i64]) -> Result<u64, DbError> {
    if ids.is_empty() {
        return Ok(0);
    }

    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("DELETE FROM product_tag WHERE id IN (");
    let mut separated = builder.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(")");

    let result = builder.build().execute(pool).await?;
    Ok(result.rows_affected())
}

/// Every tag reached through `product_tag`, keyed by product.
pub async fn list_tag_links(pool: &SqlitePool) -> Result<Vec<ProductTagLinkRow>, DbError> {
    let rows = sqlx::query_as::<_, ProductTagLinkRow>(
        r#"
        SELECT pt.product_id, t.id AS tag_id, t.tag_name
        FROM product_tag pt
        JOIN tag t ON t.id = pt.tag_id
        ORDER BY pt.product_id, t.id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// The tags of a single product.
pub async fn list_tag_links_for_product(
    pool: &SqlitePool,
    product_id: i64,
) -> Result<Vec<ProductTagLinkRow>, DbError> {
    let rows = sqlx::query_as::<_, ProductTagLinkRow>(
        r#"
        SELECT pt.product_id, t.id AS tag_id, t.tag_name
        FROM product_tag pt
        JOIN tag t ON t.id = pt.tag_id
        WHERE pt.product_id = ?1
        ORDER BY t.id
        "#,
    )
    .bind(product_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Every product reached through `product_tag`, keyed by tag.
pub async fn list_product_links(pool: &SqlitePool) -> Result<Vec<TaggedProductRow>, DbError> {
    let rows = sqlx::query_as::<_, TaggedProductRow>(
        r#"
        SELECT pt.tag_id, p.id, p.product_name, p.price, p.stock, p.category_id
        FROM product_tag pt
        JOIN product p ON p.id = pt.product_id
        ORDER BY pt.tag_id, p.id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// The products carrying a single tag.
pub async fn list_product_links_for_tag(
    pool: &SqlitePool,
    tag_id: i64,
) -> Result<Vec<TaggedProductRow>, DbError> {
    let rows = sqlx::query_as::<_, TaggedProductRow>(
        r#"
        SELECT pt.tag_id, p.id, p.product_name, p.price, p.stock, p.category_id
        FROM product_tag pt
        JOIN product p ON p.id = pt.product_id
        WHERE pt.tag_id = ?1
        ORDER BY p.id
        "#,
    )
    .bind(tag_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
