//! Catalog-level error types.

use thiserror::Error;

use db::DbError;

/// Errors produced by the catalog services (validation + persistence).
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The request payload breaks a field rule.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The addressed row does not exist.
    #[error("{entity} {id} not found")]
    NotFound {
        entity: &'static str,
        id: i64,
    },

    /// Persistence error from the db crate.
    #[error("database error: {0}")]
    Database(DbError),
}

/// A missing row surfaces under the name clients know the table by.
impl From<DbError> for CatalogError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { table, id } => Self::NotFound {
                entity: entity_name(table),
                id,
            },
            other => Self::Database(other),
        }
    }
}

fn entity_name(table: &'static str) -> &'static str {
    match table {
        "product" => "Product",
        "category" => "Category",
        "tag" => "Tag",
        "product_tag" => "ProductTag",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_row_names_the_entity() {
        let err = CatalogError::from(DbError::NotFound { table: "product", id: 9 });
        assert!(matches!(err, CatalogError::NotFound { entity: "Product", id: 9 }));
        assert_eq!(err.to_string(), "Product 9 not found");
    }

    #[test]
    fn unknown_tables_keep_their_name() {
        let err = CatalogError::from(DbError::NotFound { table: "widget", id: 1 });
        assert!(matches!(err, CatalogError::NotFound { entity: "widget", .. }));
    }
}
