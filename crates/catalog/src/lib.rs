//! `catalog` crate — domain models, input validation, tag reconciliation and
//! the service functions the HTTP layer delegates to.

pub mod models;
pub mod error;
pub mod tag_sync;
pub mod service;
pub mod seed;

pub use models::{
    Category, CategoryChanges, CategoryWithProducts, NewCategory, NewProduct, NewTag, Product,
    ProductChanges, Tag, TagChanges, TagWithProducts,
};
pub use error::CatalogError;
pub use tag_sync::TagSyncPlan;
pub use service::{categories, products, tags};
