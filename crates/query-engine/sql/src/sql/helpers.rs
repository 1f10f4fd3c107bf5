//! Helpers for building sql::ast types in certain shapes and patterns.

use super::ast::*;

// Empty clauses //

/// An empty `WHERE` clause.
pub fn empty_where() -> Where {
    Where(None)
}

/// An empty `ORDER BY` clause.
pub fn empty_order_by() -> OrderBy {
    OrderBy { elements: vec![] }
}

// Aliasing //

/// Generate a column expression refering to a specific table.
pub fn make_column(
    table: TableReference,
    name: ColumnName,
    alias: ColumnAlias,
) -> (ColumnAlias, Expression) {
    (
        alias,
        Expression::ColumnReference(ColumnReference::TableColumn { table, name }),
    )
}

/// Create column aliases using this function so we build everything in one place.
pub fn make_column_alias(name: String) -> ColumnAlias {
    ColumnAlias { name }
}

/// The alias of the single column of a count statement.
pub fn count_column_alias() -> ColumnAlias {
    make_column_alias("count".to_string())
}

// Expressions //

/// Refer to a column of a table.
pub fn column_expression(table: TableReference, name: ColumnName) -> Expression {
    Expression::ColumnReference(ColumnReference::TableColumn { table, name })
}

/// `left AND right`.
pub fn and(left: Expression, right: Expression) -> Expression {
    Expression::And {
        left: Box::new(left),
        right: Box::new(right),
    }
}

/// `left OR right`.
pub fn or(left: Expression, right: Expression) -> Expression {
    Expression::Or {
        left: Box::new(left),
        right: Box::new(right),
    }
}

/// `left = right` between two columns, used in join conditions.
pub fn columns_equal(left: Expression, right: Expression) -> Expression {
    Expression::BinaryOperation {
        left: Box::new(left),
        operator: BinaryOperator::Equals,
        right: Box::new(right),
    }
}

// SELECTs //

/// Build a simple select with a select list and a source table, the rest are empty.
pub fn simple_select(select_list: Vec<(ColumnAlias, Expression)>, table: TableReference) -> Select {
    Select {
        select_list: SelectList::SelectList(select_list),
        from: From::Table { reference: table },
        joins: vec![],
        where_: empty_where(),
        order_by: empty_order_by(),
        limit: None,
    }
}

/// `SELECT COUNT(*) AS "count" FROM table`.
pub fn count_select(table: TableReference) -> Select {
    simple_select(
        vec![(count_column_alias(), Expression::Count(CountType::Star))],
        table,
    )
}

/// A reference to a table, optionally qualified by a schema.
pub fn table_reference(schema: Option<String>, table: String) -> TableReference {
    TableReference::DBTable {
        schema: schema.map(SchemaName),
        table: TableName(table),
    }
}
