//! Errors raised while building or translating a query expression.

use thiserror::Error;

/// A query expression was built incorrectly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid predicate: {0}")]
    InvalidPredicate(#[from] InvalidPredicate),
}

/// The reasons a predicate, ordering or window can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidPredicate {
    #[error("the set of values compared to '{property}' with 'in' is empty")]
    EmptyInList { property: String },
    #[error("operator '{operator}' on '{property}' expects {expected}")]
    OperandMismatch {
        property: String,
        operator: String,
        expected: &'static str,
    },
    #[error("offset must not be negative, got {0}")]
    NegativeOffset(i64),
    #[error("limit must be positive, got {0}")]
    NonPositiveLimit(i64),
    #[error("{kind} value {value} of '{property}' cannot be stored in a {column_type} column using the {converter} converter")]
    Unconvertible {
        property: String,
        kind: &'static str,
        value: String,
        column_type: String,
        converter: String,
    },
    #[error("'{property}' is a {column_type} column and cannot be matched with 'like'")]
    PatternOnNonText {
        property: String,
        column_type: String,
    },
}
