//! Typed queries over the storefront entities.
//!
//! A [`QueryFactory`] binds a mapping resolver and a SQL dialect, and hands out
//! [`Query`] builders per entity type. Building a query never touches the
//! database: the result is a parameterized statement for the execution layer.

pub mod customer;
pub mod entity;
pub mod factory;
pub mod query;

pub use entity::Entity;
pub use factory::QueryFactory;
pub use query::{Query, QueryError};
