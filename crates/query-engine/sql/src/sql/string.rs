//! Type definitions of a low-level SQL string representation.

use super::ast::ScalarType;
use super::dialect::SyntaxProvider;

/// A parameterized statement, ready to be handed to an execution layer.
///
/// `sql` contains exactly one placeholder marker per element of `params`, in
/// the same order.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<Param>,
}

/// A parameter for a parameterized query.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub value: Value,
    pub r#type: ScalarType,
}

/// The storage representation of a parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int8(i64),
    Float8(f64),
    /// A decimal number in its canonical text form.
    Numeric(String),
    String(String),
    Uuid(uuid::Uuid),
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int8(i) => write!(f, "{i}"),
            Value::Float8(x) => write!(f, "{x}"),
            Value::Numeric(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "{s}"),
            Value::Uuid(u) => write!(f, "{u}"),
        }
    }
}

/// Accumulates SQL text and parameters while an AST is converted.
///
/// Text only enters through `append_syntax` (static fragments) and
/// `append_identifier` (quoted metadata names); values only enter through
/// `append_param`.
pub struct SQL<'a> {
    pub sql: String,
    pub params: Vec<Param>,
    syntax: &'a dyn SyntaxProvider,
}

impl<'a> SQL<'a> {
    pub fn new(syntax: &'a dyn SyntaxProvider) -> SQL<'a> {
        SQL {
            sql: String::new(),
            params: vec![],
            syntax,
        }
    }
    pub fn syntax(&self) -> &'a dyn SyntaxProvider {
        self.syntax
    }
    pub fn append_syntax(&mut self, sql: &str) {
        self.sql.push_str(sql);
    }
    pub fn append_identifier(&mut self, name: &str) {
        let quoted = self.syntax.quote_identifier(name);
        self.sql.push_str(&quoted);
    }
    pub fn append_param(&mut self, param: Param) {
        let marker = self.syntax.parameter_marker(self.params.len());
        self.sql.push_str(&marker);
        self.params.push(param);
    }
    /// Finish the statement.
    pub fn into_statement(self) -> Statement {
        Statement {
            sql: self.sql,
            params: self.params,
        }
    }
}
