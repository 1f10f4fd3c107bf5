//! Resolve entities and their properties to physical tables and columns.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use thiserror::Error;

use super::database::*;
use super::Metadata;

/// Lookup failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("entity '{0}' is not registered")]
    UnknownEntity(String),
    #[error("property '{property}' is not mapped for entity '{entity}'")]
    UnmappedProperty { entity: String, property: String },
}

/// Problems found while building a resolver from metadata.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("entity '{0}' is registered more than once")]
    DuplicateEntity(String),
    #[error("property '{property}' of entity '{entity}' is mapped more than once")]
    DuplicateProperty { entity: String, property: String },
    #[error("extension table '{table}' of entity '{entity}' is declared more than once")]
    DuplicateExtensionTable { entity: String, table: String },
    #[error("property '{property}' of entity '{entity}' refers to undeclared extension table '{table}'")]
    UndeclaredExtensionTable {
        entity: String,
        property: String,
        table: String,
    },
    #[error("property '{property}' of entity '{entity}' refers to extension table '{table}', which is declared in several schemas")]
    AmbiguousExtensionTable {
        entity: String,
        property: String,
        table: String,
    },
    #[error("extension table '{table}' of entity '{entity}' has an empty join column")]
    MissingJoinColumn { entity: String, table: String },
    #[error("primary key column '{column}' of entity '{entity}' is not mapped to a primary table property")]
    UnmappedPrimaryKey { entity: String, column: String },
}

/// A physical table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableDescriptor {
    pub schema: Option<String>,
    pub name: String,
}

impl fmt::Display for TableDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.schema {
            Some(schema) => write!(f, "{schema}.{}", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

impl From<&TableInfo> for TableDescriptor {
    fn from(info: &TableInfo) -> Self {
        TableDescriptor {
            schema: info.schema_name.clone(),
            name: info.table_name.clone(),
        }
    }
}

/// An extension table and the column joining it back to the primary table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionTable {
    pub table: TableDescriptor,
    pub join_column: String,
}

/// Where a property is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyBinding {
    pub property: String,
    pub table: TableDescriptor,
    pub column: ColumnInfo,
    pub converter: ValueConverter,
    /// Set when `table` is an extension table.
    pub join_column: Option<String>,
}

impl PropertyBinding {
    pub fn is_extension(&self) -> bool {
        self.join_column.is_some()
    }
}

/// Everything known about one registered entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityDescriptor {
    pub name: String,
    pub primary_table: TableDescriptor,
    pub primary_key: String,
    pub extension_tables: Vec<ExtensionTable>,
    pub bindings: IndexMap<String, PropertyBinding>,
}

impl EntityDescriptor {
    /// Lookup a property binding.
    pub fn binding(&self, property: &str) -> Result<&PropertyBinding, Error> {
        self.bindings
            .get(property)
            .ok_or_else(|| Error::UnmappedProperty {
                entity: self.name.clone(),
                property: property.to_string(),
            })
    }

    /// Bindings stored in the primary table, in declaration order.
    pub fn primary_bindings(&self) -> impl Iterator<Item = &PropertyBinding> {
        self.bindings.values().filter(|b| !b.is_extension())
    }
}

/// Resolves entity and property names to storage descriptors.
///
/// Implementations are built once and shared read-only, so resolution is a
/// pure lookup.
pub trait MappingResolver: fmt::Debug + Send + Sync {
    /// The names of all entities this resolver knows.
    fn entity_names(&self) -> Vec<&str>;

    /// Lookup the descriptor of an entity.
    fn descriptor(&self, entity: &str) -> Result<&EntityDescriptor, Error>;

    fn resolve(&self, entity: &str, property: &str) -> Result<&PropertyBinding, Error> {
        self.descriptor(entity)?.binding(property)
    }

    fn primary_table(&self, entity: &str) -> Result<&TableDescriptor, Error> {
        Ok(&self.descriptor(entity)?.primary_table)
    }

    fn extension_tables(&self, entity: &str) -> Result<&[ExtensionTable], Error> {
        Ok(&self.descriptor(entity)?.extension_tables)
    }
}

/// A resolver built from configured [`Metadata`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRegistry {
    entities: BTreeMap<String, EntityDescriptor>,
}

impl EntityRegistry {
    /// Validate the metadata and build the registry. The registry cannot be
    /// changed afterwards.
    pub fn new(metadata: &Metadata) -> Result<EntityRegistry, RegistrationError> {
        let entities = metadata
            .entities
            .0
            .iter()
            .map(|(name, info)| Ok((name.clone(), build_descriptor(name, info)?)))
            .collect::<Result<BTreeMap<_, _>, RegistrationError>>()?;

        tracing::info!(entities = entities.len(), "registered entity mappings");

        Ok(EntityRegistry { entities })
    }
}

impl MappingResolver for EntityRegistry {
    fn entity_names(&self) -> Vec<&str> {
        self.entities.keys().map(String::as_str).collect()
    }

    fn descriptor(&self, entity: &str) -> Result<&EntityDescriptor, Error> {
        self.entities
            .get(entity)
            .ok_or_else(|| Error::UnknownEntity(entity.to_string()))
    }
}

fn build_descriptor(
    entity: &str,
    info: &super::EntityInfo,
) -> Result<EntityDescriptor, RegistrationError> {
    let primary_table = TableDescriptor::from(&info.primary_table);

    let mut extension_tables: IndexMap<TableDescriptor, ExtensionTable> = IndexMap::new();
    for extension in &info.extension_tables {
        let table = TableDescriptor::from(&extension.table);
        if extension.join_column.trim().is_empty() {
            return Err(RegistrationError::MissingJoinColumn {
                entity: entity.to_string(),
                table: table.to_string(),
            });
        }
        if table == primary_table || extension_tables.contains_key(&table) {
            return Err(RegistrationError::DuplicateExtensionTable {
                entity: entity.to_string(),
                table: table.to_string(),
            });
        }
        extension_tables.insert(
            table.clone(),
            ExtensionTable {
                table,
                join_column: extension.join_column.clone(),
            },
        );
    }

    let mut bindings = IndexMap::new();
    for property in &info.properties {
        let (table, join_column) = match &property.extension_table {
            None => (primary_table.clone(), None),
            Some(reference) => {
                let extension =
                    find_extension_table(entity, &property.name, reference, &extension_tables)?;
                (extension.table.clone(), Some(extension.join_column.clone()))
            }
        };
        let binding = PropertyBinding {
            property: property.name.clone(),
            table,
            column: property.column.clone(),
            converter: property.converter,
            join_column,
        };
        if bindings.insert(property.name.clone(), binding).is_some() {
            return Err(RegistrationError::DuplicateProperty {
                entity: entity.to_string(),
                property: property.name.clone(),
            });
        }
    }

    let key_is_mapped = bindings
        .values()
        .any(|b: &PropertyBinding| !b.is_extension() && b.column.name == info.primary_key);
    if !key_is_mapped {
        return Err(RegistrationError::UnmappedPrimaryKey {
            entity: entity.to_string(),
            column: info.primary_key.clone(),
        });
    }

    Ok(EntityDescriptor {
        name: entity.to_string(),
        primary_table,
        primary_key: info.primary_key.clone(),
        extension_tables: extension_tables.into_values().collect(),
        bindings,
    })
}

/// The extension table a property refers to, either as `table` or as
/// `schema.table`. A bare name must match a single declared table.
fn find_extension_table<'a>(
    entity: &str,
    property: &str,
    reference: &str,
    extension_tables: &'a IndexMap<TableDescriptor, ExtensionTable>,
) -> Result<&'a ExtensionTable, RegistrationError> {
    let mut candidates = extension_tables.iter().filter(|(table, _)| {
        match reference.split_once('.') {
            Some((schema, name)) => table.schema.as_deref() == Some(schema) && table.name == name,
            None => table.name == reference,
        }
    });
    match (candidates.next(), candidates.next()) {
        (Some((_, extension)), None) => Ok(extension),
        (None, _) => Err(RegistrationError::UndeclaredExtensionTable {
            entity: entity.to_string(),
            property: property.to_string(),
            table: reference.to_string(),
        }),
        (Some(_), Some(_)) => Err(RegistrationError::AmbiguousExtensionTable {
            entity: entity.to_string(),
            property: property.to_string(),
            table: reference.to_string(),
        }),
    }
}

/// Routes each entity to the resolver of the family that registered it.
///
/// The routing table is computed once, on construction.
#[derive(Debug, Clone)]
pub struct CompositeResolver {
    routes: BTreeMap<String, Arc<dyn MappingResolver>>,
}

impl CompositeResolver {
    pub fn new(
        families: impl IntoIterator<Item = Arc<dyn MappingResolver>>,
    ) -> Result<CompositeResolver, RegistrationError> {
        let mut routes: BTreeMap<String, Arc<dyn MappingResolver>> = BTreeMap::new();
        for family in families {
            let names: BTreeSet<String> =
                family.entity_names().into_iter().map(String::from).collect();
            for name in names {
                if routes.contains_key(&name) {
                    return Err(RegistrationError::DuplicateEntity(name));
                }
                routes.insert(name, Arc::clone(&family));
            }
        }
        Ok(CompositeResolver { routes })
    }
}

impl MappingResolver for CompositeResolver {
    fn entity_names(&self) -> Vec<&str> {
        self.routes.keys().map(String::as_str).collect()
    }

    fn descriptor(&self, entity: &str) -> Result<&EntityDescriptor, Error> {
        self.routes
            .get(entity)
            .ok_or_else(|| Error::UnknownEntity(entity.to_string()))?
            .descriptor(entity)
    }
}
