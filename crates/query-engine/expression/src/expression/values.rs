//! In-memory values compared against entity properties.

use std::fmt;

/// A value as the domain model holds it, before any storage conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Integer(i64),
    Float(f64),
    /// A decimal number in its canonical text form, such as `"12.50"`.
    Decimal(String),
    Text(String),
    Uuid(uuid::Uuid),
    Enum(EnumValue),
}

/// A variant of a domain enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    pub type_name: String,
    pub variant: String,
    pub discriminant: i64,
}

impl EnumValue {
    pub fn new(
        type_name: impl Into<String>,
        variant: impl Into<String>,
        discriminant: i64,
    ) -> EnumValue {
        EnumValue {
            type_name: type_name.into(),
            variant: variant.into(),
            discriminant,
        }
    }
}

impl Value {
    /// A short name of the value's kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Decimal(_) => "decimal",
            Value::Text(_) => "text",
            Value::Uuid(_) => "uuid",
            Value::Enum(_) => "enum",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Decimal(d) => write!(f, "{d}"),
            Value::Text(s) => write!(f, "{s:?}"),
            Value::Uuid(u) => write!(f, "{u}"),
            Value::Enum(e) => write!(f, "{}::{}", e.type_name, e.variant),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<uuid::Uuid> for Value {
    fn from(value: uuid::Uuid) -> Self {
        Value::Uuid(value)
    }
}

impl From<EnumValue> for Value {
    fn from(value: EnumValue) -> Self {
        Value::Enum(value)
    }
}
