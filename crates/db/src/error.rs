//! Errors raised by the storefront persistence layer.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    /// Query, connection or constraint failure reported by SQLite.
    #[error("sqlite error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// No row in `table` has primary key `id`.
    #[error("no {table} row with id {id}")]
    NotFound {
        table: &'static str,
        id: i64,
    },

    /// The embedded schema could not be applied.
    #[error("schema sync failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl DbError {
    pub(crate) fn not_found(table: &'static str, id: i64) -> Self {
        Self::NotFound { table, id }
    }
}
