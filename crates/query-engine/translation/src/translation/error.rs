//! Errors for query translation.

use query_engine_expression::expression;
use query_engine_expression::expression::InvalidPredicate;
use query_engine_metadata::metadata;
use thiserror::Error;

/// A type for translation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("entity '{0}' is not registered")]
    UnknownEntity(String),
    #[error("property '{property}' is not mapped for entity '{entity}'")]
    UnmappedProperty { entity: String, property: String },
    #[error("invalid predicate: {0}")]
    InvalidPredicate(#[from] InvalidPredicate),
}

impl From<metadata::Error> for Error {
    fn from(error: metadata::Error) -> Self {
        match error {
            metadata::Error::UnknownEntity(entity) => Error::UnknownEntity(entity),
            metadata::Error::UnmappedProperty { entity, property } => {
                Error::UnmappedProperty { entity, property }
            }
        }
    }
}

impl From<expression::Error> for Error {
    fn from(error: expression::Error) -> Self {
        match error {
            expression::Error::InvalidPredicate(invalid) => Error::InvalidPredicate(invalid),
        }
    }
}
