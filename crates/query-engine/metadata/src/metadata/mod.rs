//! Metadata information regarding the database and the entities mapped onto it.

pub mod database;
pub mod entities;
pub mod resolver;

// re-export without modules
pub use database::*;
pub use entities::*;
pub use resolver::*;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Metadata information.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct Metadata {
    pub entities: EntitiesInfo,
}

impl Metadata {
    pub fn empty() -> Self {
        Metadata {
            entities: EntitiesInfo::empty(),
        }
    }
}
