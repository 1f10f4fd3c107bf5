//! Metadata information regarding the physical tables and columns.

use enum_iterator::Sequence;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The storage types a mapped column may have.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Sequence, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ScalarType {
    Boolean,
    Smallint,
    Integer,
    Bigint,
    Real,
    #[serde(rename = "double precision")]
    DoublePrecision,
    Numeric,
    Text,
    Uuid,
    Timestamp,
}

impl ScalarType {
    /// Integral column types, which accept integer values within their range.
    pub fn is_integral(self) -> bool {
        matches!(
            self,
            ScalarType::Smallint | ScalarType::Integer | ScalarType::Bigint
        )
    }

    /// Floating point column types.
    pub fn is_floating(self) -> bool {
        matches!(self, ScalarType::Real | ScalarType::DoublePrecision)
    }

    /// Column types that can be matched against a `LIKE` pattern.
    pub fn supports_pattern_matching(self) -> bool {
        matches!(self, ScalarType::Text)
    }
}

impl std::fmt::Display for ScalarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScalarType::DoublePrecision => write!(f, "double precision"),
            _ => write!(f, "{}", format!("{self:?}").to_lowercase()),
        }
    }
}

/// How an in-memory value becomes the storage representation of a column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Sequence, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "camelCase")]
pub enum ValueConverter {
    /// The value is stored as is; its kind must agree with the column type.
    #[default]
    Identity,
    /// An enumerated value stored as its discriminant.
    EnumAsInteger,
    /// An enumerated value stored as its variant name.
    EnumAsText,
    /// A uuid stored in a text column, hyphenated and lowercase.
    UuidAsText,
    /// A boolean stored in an integral column as 0 or 1.
    BooleanAsInteger,
}

impl std::fmt::Display for ValueConverter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ValueConverter::Identity => "identity",
            ValueConverter::EnumAsInteger => "enumAsInteger",
            ValueConverter::EnumAsText => "enumAsText",
            ValueConverter::UuidAsText => "uuidAsText",
            ValueConverter::BooleanAsInteger => "booleanAsInteger",
        };
        write!(f, "{name}")
    }
}

/// Can this column contain null values
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub enum Nullable {
    #[default]
    Nullable,
    NonNullable,
}

/// Information about a database column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ColumnInfo {
    pub name: String,
    pub r#type: ScalarType,
    #[serde(default)]
    pub nullable: Nullable,
}

/// Information about a database table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TableInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_name: Option<String>,
    pub table_name: String,
}
