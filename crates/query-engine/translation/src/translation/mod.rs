//! Translate a query expression over an entity to a parameterized SQL statement.

pub mod error;
pub mod helpers;
pub mod query;
