//! Product CRUD operations.

use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{
    DbError,
    models::{ProductListingRow, ProductRow},
};

const TABLE: &str = "product";

const LISTING_SELECT: &str = r#"
    SELECT p.id, p.product_name, p.price, p.stock, p.category_id, c.category_name
    FROM product p
    LEFT JOIN category c ON c.id = p.category_id
"#;

/// Insert a new product.
///
/// Generic over the executor so callers can run it inside a transaction.
pub async fn create_product<'e, E>(
    executor: E,
    product_name: &str,
    price: f64,
    stock: i64,
    category_id: Option<i64>,
) -> Result<ProductRow, DbError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query_as::<_, ProductRow>(
        r#"
        INSERT INTO product (product_name, price, stock, category_id)
        VALUES (?1, ?2, ?3, ?4)
        RETURNING id, product_name, price, stock, category_id
        "#,
    )
    .bind(product_name)
    .bind(price)
    .bind(stock)
    .bind(category_id)
    .fetch_one(executor)
    .await?;

    Ok(row)
}

/// Fetch a single product, joined with its category, by primary key.
pub async fn get_product(pool: &SqlitePool, id: i64) -> Result<ProductListingRow, DbError> {
    let row = sqlx::query_as::<_, ProductListingRow>(&format!("{LISTING_SELECT} WHERE p.id = ?1"))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(DbError::not_found(TABLE, id))?;

    Ok(row)
}

/// Return every product, joined with its category, ordered by id.
pub async fn list_products(pool: &SqlitePool) -> Result<Vec<ProductListingRow>, DbError> {
    let rows = sqlx::query_as::<_, ProductListingRow>(&format!("{LISTING_SELECT} ORDER BY p.id"))
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

/// Return every product that references `category_id`, ordered by id.
pub async fn list_products_in_category(
    pool: &SqlitePool,
    category_id: i64,
) -> Result<Vec<ProductRow>, DbError> {
    let rows = sqlx::query_as::<_, ProductRow>(
        r#"
        SELECT id, product_name, price, stock, category_id
        FROM product
        WHERE category_id = ?1
        ORDER BY id
        "#,
    )
    .bind(category_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Return every product that has a category, ordered by id.
pub async fn list_categorised_products(pool: &SqlitePool) -> Result<Vec<ProductRow>, DbError> {
    let rows = sqlx::query_as::<_, ProductRow>(
        r#"
        SELECT id, product_name, price, stock, category_id
        FROM product
        WHERE category_id IS NOT NULL
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Overwrite the columns whose argument is `Some`, leaving the rest as stored.
///
/// Returns `DbError::NotFound` if no product has the given id.
pub async fn update_product(
    pool: &SqlitePool,
    id: i64,
    product_name: Option<&str>,
    price: Option<f64>,
    stock: Option<i64>,
    category_id: Option<i64>,
) -> Result<ProductRow, DbError> {
    let row = sqlx::query_as::<_, ProductRow>(
        r#"
        UPDATE product
        SET product_name = COALESCE(?1, product_name),
            price        = COALESCE(?2, price),
            stock        = COALESCE(?3, stock),
            category_id  = COALESCE(?4, category_id)
        WHERE id = ?5
        RETURNING id, product_name, price, stock, category_id
        "#,
    )
    .bind(product_name)
    .bind(price)
    .bind(stock)
    .bind(category_id)
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(DbError::not_found(TABLE, id))?;

    Ok(row)
}

/// Permanently delete a product by its primary key.
///
/// Its `product_tag` rows are removed by the foreign key cascade.
/// Returns `DbError::NotFound` if no row was deleted.
pub async fn delete_product(pool: &SqlitePool, id: i64) -> Result<(), DbError> {
    let result = sqlx::query("DELETE FROM product WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found(TABLE, id));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::fixtures::seeded_pool;

    #[tokio::test]
    async fn create_then_get_joins_category() {
        let pool = seeded_pool().await;
        let created = create_product(&pool, "Plain T-Shirt", 14.99, 14, Some(1))
            .await
            .unwrap();

        let listing = get_product(&pool, created.id).await.unwrap();
        assert_eq!(listing.product(), created);
        assert_eq!(listing.category().unwrap().category_name, "Shirts");
    }

    #[tokio::test]
    async fn product_without_category_lists_none() {
        let pool = seeded_pool().await;
        create_product(&pool, "Loose", 1.0, 1, None).await.unwrap();

        let rows = list_products(&pool).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].category().is_none());
    }

    #[tokio::test]
    async fn get_missing_product_is_not_found() {
        let pool = seeded_pool().await;
        assert!(matches!(
            get_product(&pool, 42).await,
            Err(DbError::NotFound { table: "product", id: 42 })
        ));
    }

    #[tokio::test]
    async fn unknown_category_violates_foreign_key() {
        let pool = seeded_pool().await;
        let err = create_product(&pool, "Orphan", 1.0, 1, Some(99)).await.unwrap_err();
        assert!(matches!(err, DbError::Sqlx(_)));
    }

    #[tokio::test]
    async fn update_keeps_columns_that_are_not_given() {
        let pool = seeded_pool().await;
        let created = create_product(&pool, "Cap", 22.0, 12, Some(1)).await.unwrap();

        let updated = update_product(&pool, created.id, None, Some(18.5), None, Some(2))
            .await
            .unwrap();

        assert_eq!(updated.product_name, "Cap");
        assert_eq!(updated.price, 18.5);
        assert_eq!(updated.stock, 12);
        assert_eq!(updated.category_id, Some(2));
    }

    #[tokio::test]
    async fn update_missing_product_is_not_found() {
        let pool = seeded_pool().await;
        let result = update_product(&pool, 7, Some("x"), None, None, None).await;
        assert!(matches!(
            result,
            Err(DbError::NotFound { table: "product", .. })
        ));
    }

    #[tokio::test]
    async fn delete_twice_reports_not_found() {
        let pool = seeded_pool().await;
        let created = create_product(&pool, "Gone", 1.0, 1, None).await.unwrap();

        delete_product(&pool, created.id).await.unwrap();
        assert!(matches!(
            delete_product(&pool, created.id).await,
            Err(DbError::NotFound { table: "product", .. })
        ));
    }

    #[tokio::test]
    async fn category_listing_filters_by_reference() {
        let pool = seeded_pool().await;
        create_product(&pool, "A", 1.0, 1, Some(1)).await.unwrap();
        create_product(&pool, "B", 1.0, 1, Some(2)).await.unwrap();
        create_product(&pool, "C", 1.0, 1, None).await.unwrap();

        let shirts = list_products_in_category(&pool, 1).await.unwrap();
        assert_eq!(shirts.len(), 1);
        assert_eq!(shirts[0].product_name, "A");
        assert_eq!(list_categorised_products(&pool).await.unwrap().len(), 2);
    }
}
