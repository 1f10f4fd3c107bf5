//! Translate a query expression over one entity.

pub mod filtering;
pub mod sorting;
pub mod values;

use query_engine_expression::expression::QueryExpression;
use query_engine_metadata::metadata::MappingResolver;
use query_engine_sql::sql;

use crate::translation::error::Error;
use crate::translation::helpers::{Env, State};

/// Translate an expression to a statement selecting the entity's primary
/// table columns, in the dialect of `syntax`.
pub fn translate(
    resolver: &dyn MappingResolver,
    syntax: &dyn sql::dialect::SyntaxProvider,
    entity: &str,
    expression: &QueryExpression,
) -> Result<sql::string::Statement, Error> {
    let select = translate_select(resolver, entity, expression)?;
    Ok(to_statement(entity, &select, syntax))
}

/// Translate an expression to a statement counting the matching rows.
/// Ordering and window do not affect the count and are left out.
pub fn translate_count(
    resolver: &dyn MappingResolver,
    syntax: &dyn sql::dialect::SyntaxProvider,
    entity: &str,
    expression: &QueryExpression,
) -> Result<sql::string::Statement, Error> {
    let select = translate_count_select(resolver, entity, expression)?;
    Ok(to_statement(entity, &select, syntax))
}

/// Translate an expression to a SQL AST selecting the entity's primary table columns.
pub fn translate_select(
    resolver: &dyn MappingResolver,
    entity: &str,
    expression: &QueryExpression,
) -> Result<sql::ast::Select, Error> {
    let env = Env::new(resolver, entity)?;
    let mut state = State::new();

    let table = env.primary_table();
    let select_list = env
        .entity
        .primary_bindings()
        .map(|binding| {
            sql::helpers::make_column(
                table.clone(),
                sql::ast::ColumnName(binding.column.name.clone()),
                sql::helpers::make_column_alias(binding.property.clone()),
            )
        })
        .collect();

    let mut select = sql::helpers::simple_select(select_list, table);

    // the predicate is walked before the sort keys, which fixes the join order
    select.where_ = translate_where(&env, &mut state, expression)?;
    select.order_by = sorting::translate_order_by(&env, &mut state, expression.sort_keys())?;
    select.limit = expression.window().map(|window| sql::ast::Limit {
        offset: window.offset,
        limit: window.limit.get(),
    });
    select.joins = state.into_joins();

    Ok(select)
}

/// Translate an expression to a SQL AST counting the matching rows.
pub fn translate_count_select(
    resolver: &dyn MappingResolver,
    entity: &str,
    expression: &QueryExpression,
) -> Result<sql::ast::Select, Error> {
    let env = Env::new(resolver, entity)?;
    let mut state = State::new();

    // sort keys must still be mapped, but they do not join anything
    for property in expression.referenced_properties() {
        env.lookup_property(property)?;
    }

    let mut select = sql::helpers::count_select(env.primary_table());
    select.where_ = translate_where(&env, &mut state, expression)?;
    select.joins = state.into_joins();

    Ok(select)
}

fn translate_where(
    env: &Env,
    state: &mut State,
    expression: &QueryExpression,
) -> Result<sql::ast::Where, Error> {
    Ok(sql::ast::Where(
        expression
            .predicate()
            .map(|predicate| filtering::translate_expression(env, state, predicate))
            .transpose()?,
    ))
}

fn to_statement(
    entity: &str,
    select: &sql::ast::Select,
    syntax: &dyn sql::dialect::SyntaxProvider,
) -> sql::string::Statement {
    tracing::trace!(entity, "SQL AST: {:?}", select);

    let statement = sql::convert::select_to_sql(select, syntax);

    if tracing::enabled!(tracing::Level::DEBUG) {
        let pretty = sqlformat::format(
            &statement.sql,
            &sqlformat::QueryParams::None,
            sqlformat::FormatOptions::default(),
        );
        tracing::debug!(
            entity,
            dialect = syntax.name(),
            params = statement.params.len(),
            "translated query:\n{}",
            pretty
        );
    }

    statement
}
