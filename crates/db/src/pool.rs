//! SQLite connection pool and schema sync.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::DbError;

/// Type alias for the shared SQLite pool used across the whole application.
pub type DbPool = SqlitePool;

/// Tables owned by the storefront schema, children first.
const TABLES: [&str; 4] = ["product_tag", "product", "tag", "category"];

/// Create a new connection pool from the given `database_url`.
///
/// The database file is created when missing and foreign keys are enforced
/// on every connection. `max_connections` controls the pool ceiling.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, DbError> {
    info!("Connecting to database (max_connections={})", max_connections);
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;
    Ok(pool)
}

/// Create a single-connection pool over a private in-memory database with
/// the schema already applied.
///
/// The connection is never recycled, since dropping it would drop the data.
pub async fn create_memory_pool() -> Result<DbPool, DbError> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;
    run_migrations(&pool).await?;
    Ok(pool)
}

/// Run embedded SQLx migrations located in `./migrations` (relative to the
/// workspace root at build time).
///
/// Every statement is `CREATE ... IF NOT EXISTS`, so existing data is kept.
pub async fn run_migrations(pool: &DbPool) -> Result<(), DbError> {
    info!("Running database migrations");
    sqlx::migrate!("../../migrations").run(pool).await?;
    Ok(())
}

/// Drop every storefront table (and the migration bookkeeping) and then
/// recreate the schema from scratch.
pub async fn reset_schema(pool: &DbPool) -> Result<(), DbError> {
    warn!("Dropping all tables before recreating the schema");
    for table in TABLES.iter().chain(std::iter::once(&"_sqlx_migrations")) {
        sqlx::query(&format!("DROP TABLE IF EXISTS {table}"))
            .execute(pool)
            .await?;
    }
    run_migrations(pool).await
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn table_names(pool: &DbPool) -> Vec<String> {
        sqlx::query_scalar::<_, String>(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )
        .fetch_all(pool)
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn memory_pool_has_full_schema() {
        let pool = create_memory_pool().await.unwrap();
        let names = table_names(&pool).await;
        for table in TABLES {
            assert!(names.iter().any(|n| n == table), "missing table {table}");
        }
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let pool = create_memory_pool().await.unwrap();
        sqlx::query("INSERT INTO category (category_name) VALUES ('Shirts')")
            .execute(&pool)
            .await
            .unwrap();

        run_migrations(&pool).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM category")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn reset_schema_drops_existing_rows() {
        let pool = create_memory_pool().await.unwrap();
        sqlx::query("INSERT INTO tag (tag_name) VALUES ('blue')")
            .execute(&pool)
            .await
            .unwrap();

        reset_schema(&pool).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tag")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
