//! Tag CRUD operations.

use sqlx::SqlitePool;

use crate::{DbError, models::TagRow};

const TABLE: &str = "tag";

/// Insert a new tag.
pub async fn create_tag(pool: &SqlitePool, tag_name: Option<&str>) -> Result<TagRow, DbError> {
    let row = sqlx::query_as::<_, TagRow>("INSERT INTO tag (tag_name) VALUES (?1) RETURNING id, tag_name")
        .bind(tag_name)
        .fetch_one(pool)
        .await?;

    Ok(row)
}

/// Fetch a single tag by its primary key.
pub async fn get_tag(pool: &SqlitePool, id: i64) -> Result<TagRow, DbError> {
    let row = sqlx::query_as::<_, TagRow>("SELECT id, tag_name FROM tag WHERE id = ?1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(DbError::not_found(TABLE, id))?;

    Ok(row)
}

/// Return all tags ordered by id.
pub async fn list_tags(pool: &SqlitePool) -> Result<Vec<TagRow>, DbError> {
    let rows = sqlx::query_as::<_, TagRow>("SELECT id, tag_name FROM tag ORDER BY id")
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

/// Rename a tag when `tag_name` is `Some`.
///
/// Returns `DbError::NotFound` if no tag has the given id.
pub async fn update_tag(pool: &SqlitePool, id: i64, tag_name: Option<&str>) -> Result<TagRow, DbError> {
    let row = sqlx::query_as::<_, TagRow>(
        r#"
        UPDATE tag
        SET tag_name = COALESCE(?1, tag_name)
        WHERE id = ?2
        RETURNING id, tag_name
        "#,
    )
    .bind(tag_name)
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(DbError::not_found(TABLE, id))?;

    Ok(row)
}

/// Permanently delete a tag by its primary key.
///
/// Its `product_tag` rows are removed by the foreign key cascade.
/// Returns `DbError::NotFound` if no row was deleted.
pub async fn delete_tag(pool: &SqlitePool, id: i64) -> Result<(), DbError> {
    let result = sqlx::query("DELETE FROM tag WHERE id = ?1")
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
    async fn tag_name_may_be_null() {
        let pool = seeded_pool().await;
        let tag = create_tag(&pool, None).await.unwrap();
        assert_eq!(get_tag(&pool, tag.id).await.unwrap().tag_name, None);
    }

    #[tokio::test]
    async fn update_renames_and_reports_missing() {
        let pool = seeded_pool().await;
        let renamed = update_tag(&pool, 3, Some("olive")).await.unwrap();
        assert_eq!(renamed.tag_name.as_deref(), Some("olive"));
        assert_eq!(list_tags(&pool).await.unwrap().len(), 3);

        assert!(matches!(

            update_tag(&pool, 30, Some("x")).await,

            Err(DbError::NotFound { table: "tag", .. })

        ));
    }

    #[tokio::test]
    async fn delete_removes_row() {
        let pool = seeded_pool().await;
        delete_tag(&pool, 1).await.unwrap();
        assert!(matches!(
            get_tag(&pool, 1).await,
            Err(DbError::NotFound { table: "tag", .. })
        ));
    }
}
