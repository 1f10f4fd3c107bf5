use std::sync::Arc;

use query_engine_sql::sql;
use query_engine_sql::sql::dialect::SyntaxProvider;
use storefront_persistence::{Entity, QueryFactory};

/// An entity only the tests query.
pub struct Invoice;

impl Entity for Invoice {
    const NAME: &'static str = tests_common::fixtures::INVOICE;
}

/// A factory over every storefront entity.
pub fn factory_with(syntax: Arc<dyn SyntaxProvider>) -> QueryFactory {
    tests_common::init_logging();
    QueryFactory::new(Arc::new(tests_common::fixtures::storefront_registry()), syntax)
}

pub fn factory() -> QueryFactory {
    factory_with(Arc::new(sql::dialect::PostgreSql))
}

/// The parameter values of a statement, in binding order.
pub fn param_values(statement: &sql::string::Statement) -> Vec<sql::string::Value> {
    statement
        .params
        .iter()
        .map(|param| param.value.clone())
        .collect()
}
