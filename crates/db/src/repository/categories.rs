//! Category CRUD operations.

use sqlx::SqlitePool;

use crate::{DbError, models::CategoryRow};

const TABLE: &str = "category";

/// Insert a new category.
pub async fn create_category(pool: &SqlitePool, category_name: &str) -> Result<CategoryRow, DbError> {
    let row = sqlx::query_as::<_, CategoryRow>(
        "INSERT INTO category (category_name) VALUES (?1) RETURNING id, category_name",
    )
    .bind(category_name)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Fetch a single category by its primary key.
pub async fn get_category(pool: &SqlitePool, id: i64) -> Result<CategoryRow, DbError> {
    let row = sqlx::query_as::<_, CategoryRow>("SELECT id, category_name FROM category WHERE id = ?1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(DbError::not_found(TABLE, id))?;

    Ok(row)
}

/// Return all categories ordered by id.
pub async fn list_categories(pool: &SqlitePool) -> Result<Vec<CategoryRow>, DbError> {
    let rows = sqlx::query_as::<_, CategoryRow>("SELECT id, category_name FROM category ORDER BY id")
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

/// Rename a category when `category_name` is `Some`.
///
/// Returns `DbError::NotFound` if no category has the given id.
pub async fn update_category(
    pool: &SqlitePool,
    id: i64,
    category_name: Option<&str>,
) -> Result<CategoryRow, DbError> {
    let row = sqlx::query_as::<_, CategoryRow>(
        r#"
        UPDATE category
        SET category_name = COALESCE(?1, category_name)
        WHERE id = ?2
        RETURNING id, category_name
        "#,
    )
    .bind(category_name)
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(DbError::not_found(TABLE, id))?;

    Ok(row)
}

/// Permanently delete a category by its primary key.
///
/// Products in the category keep existing with a null `category_id`.
/// Returns `DbError::NotFound` if no row was deleted.
pub async fn delete_category(pool: &SqlitePool, id: i64) -> Result<(), DbError> {
    let result = sqlx::query("DELETE FROM category WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found(TABLE, id));
    }

    Ok(())
}
