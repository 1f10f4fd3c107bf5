//! Metadata information regarding the entities and how their properties are stored.
//!
//! These types describe the mapping as it is written in configuration. They are
//! validated and turned into descriptors by [`super::resolver::EntityRegistry`].

use super::database::*;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from an entity name to its storage information.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct EntitiesInfo(pub BTreeMap<String, EntityInfo>);

impl EntitiesInfo {
    pub fn empty() -> Self {
        EntitiesInfo(BTreeMap::new())
    }
}

/// How one entity is stored: a primary table, optional extension tables and
/// the columns backing each property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntityInfo {
    pub primary_table: TableInfo,
    /// The column of the primary table extension tables join against.
    pub primary_key: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension_tables: Vec<ExtensionTableInfo>,
    /// Properties in declaration order. The order is used for projections.
    pub properties: Vec<PropertyInfo>,
}

/// A secondary table holding more columns of an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionTableInfo {
    pub table: TableInfo,
    /// The column of this table holding the primary key of the entity.
    pub join_column: String,
}

/// The column a single property is stored in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertyInfo {
    pub name: String,
    /// The extension table holding the column, as `table` or `schema.table`.
    /// A bare name must identify one declared extension table. `None` for the
    /// primary table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension_table: Option<String>,
    pub column: ColumnInfo,
    #[serde(default)]
    pub converter: ValueConverter,
}
