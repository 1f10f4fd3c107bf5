//! The SQL AST, its dialect-aware conversion to a parameterized string, and the dialects.

pub mod ast;
pub mod convert;
pub mod dialect;
pub mod helpers;
pub mod string;
