//! Service functions — what each HTTP route does, one module per resource.
//!
//! Every function takes a `&DbPool`, composes repository calls from the `db`
//! crate, and returns a `Result<T, CatalogError>`.

pub mod categories;
pub mod products;
pub mod tags;

#[cfg(test)]
pub(crate) mod fixtures {
    use db::{DbPool, pool::create_memory_pool};

    use crate::{NewCategory, NewTag, categories, tags};

    /// Fresh in-memory database holding categories `Shirts` (1) and
    /// `Shorts` (2) and tags `blue` (1), `red` (2), `green` (3), `gold` (4).
    pub async fn catalog_pool() -> DbPool {
        let pool = create_memory_pool().await.unwrap();
        for name in ["Shirts", "Shorts"] {
            categories::create_category(&pool, NewCategory { category_name: name.into() })
                .await
                .unwrap();
        }
        for name in ["blue", "red", "green", "gold"] {
            tags::create_tag(&pool, NewTag { tag_name: Some(name.into()) })
                .await
                .unwrap();
        }
        pool
    }
}
