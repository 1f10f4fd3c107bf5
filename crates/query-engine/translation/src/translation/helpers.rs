//! Helpers for processing a query expression and building SQL.

use indexmap::IndexMap;

use query_engine_metadata::metadata;
use query_engine_metadata::metadata::{EntityDescriptor, MappingResolver, PropertyBinding};
use query_engine_sql::sql;

use super::error::Error;

/// Static information from the query and metadata.
pub struct Env<'a> {
    pub entity: &'a EntityDescriptor,
}

impl<'a> Env<'a> {
    /// Lookup the entity being queried.
    pub fn new(resolver: &'a dyn MappingResolver, entity: &str) -> Result<Env<'a>, Error> {
        Ok(Env {
            entity: resolver.descriptor(entity)?,
        })
    }

    /// Lookup a property of the queried entity.
    pub fn lookup_property(&self, property: &str) -> Result<&'a PropertyBinding, Error> {
        Ok(self.entity.binding(property)?)
    }

    /// The table rows are selected from.
    pub fn primary_table(&self) -> sql::ast::TableReference {
        table_reference(&self.entity.primary_table)
    }
}

/// Mutable state accumulated while translating one expression.
#[derive(Debug, Default)]
pub struct State {
    /// Extension tables joined so far, in order of first reference.
    joins: IndexMap<metadata::TableDescriptor, sql::ast::Join>,
}

impl State {
    pub fn new() -> State {
        State::default()
    }

    /// Refer to the column of a property, joining its extension table the
    /// first time one of its columns is referenced.
    pub fn column_of(&mut self, env: &Env, binding: &PropertyBinding) -> sql::ast::Expression {
        let table = table_reference(&binding.table);
        if let Some(join_column) = &binding.join_column {
            if !self.joins.contains_key(&binding.table) {
                let on = sql::helpers::columns_equal(
                    sql::helpers::column_expression(
                        table.clone(),
                        sql::ast::ColumnName(join_column.clone()),
                    ),
                    sql::helpers::column_expression(
                        env.primary_table(),
                        sql::ast::ColumnName(env.entity.primary_key.clone()),
                    ),
                );
                self.joins.insert(
                    binding.table.clone(),
                    sql::ast::Join::LeftOuterJoin(sql::ast::LeftOuterJoin {
                        table: table.clone(),
                        on,
                    }),
                );
            }
        }
        sql::helpers::column_expression(table, sql::ast::ColumnName(binding.column.name.clone()))
    }

    /// The joins, in order of first reference.
    pub fn into_joins(self) -> Vec<sql::ast::Join> {
        self.joins.into_values().collect()
    }
}

pub fn table_reference(table: &metadata::TableDescriptor) -> sql::ast::TableReference {
    sql::helpers::table_reference(table.schema.clone(), table.name.clone())
}
