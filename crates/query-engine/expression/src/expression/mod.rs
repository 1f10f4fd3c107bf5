//! A schema agnostic description of which entities to fetch and in what order.
//!
//! Every value in this module is immutable once built. Combining two
//! expressions produces a new one which shares the predicate subtrees of both.

pub mod error;
pub mod predicate;
pub mod query;
pub mod values;

// re-export without modules
pub use error::*;
pub use predicate::*;
pub use query::*;
pub use values::*;
