//! Repository functions — one function per database operation.
//!
//! Every function takes a `&DbPool` (or any SQLite executor, when it has to
//! run inside a caller's transaction) and returns a `Result<T, DbError>`.
//! No business logic, no domain types — pure SQL.

pub mod categories;
pub mod products;
pub mod product_tags;
pub mod tags;
