use query_engine_expression::expression::QueryExpression;
use query_engine_metadata::metadata::EntityRegistry;
use query_engine_sql::sql;
use query_engine_sql::sql::dialect::SyntaxProvider;
use query_engine_translation::translation;

pub fn registry() -> EntityRegistry {
    tests_common::init_logging();
    tests_common::fixtures::storefront_registry()
}

/// Translate an expression over an entity for PostgreSQL.
pub fn translate(
    entity: &str,
    expression: &QueryExpression,
) -> Result<sql::string::Statement, translation::error::Error> {
    translate_with(&sql::dialect::PostgreSql, entity, expression)
}

pub fn translate_with(
    syntax: &dyn SyntaxProvider,
    entity: &str,
    expression: &QueryExpression,
) -> Result<sql::string::Statement, translation::error::Error> {
    translation::query::translate(&registry(), syntax, entity, expression)
}

/// The parameter values of a statement, in binding order.
pub fn param_values(statement: &sql::string::Statement) -> Vec<String> {
    statement
        .params
        .iter()
        .map(|param| param.value.to_string())
        .collect()
}

/// Count the placeholder markers in a statement's text.
pub fn count_markers(syntax: &dyn SyntaxProvider, statement: &sql::string::Statement) -> usize {
    match syntax.name() {
        "postgresql" => statement.sql.matches('$').count(),
        "sqlserver" => statement.sql.matches("@p").count(),
        _ => statement.sql.matches('?').count(),
    }
}

pub fn count_joins(statement: &sql::string::Statement) -> usize {
    statement.sql.matches(" JOIN ").count()
}
