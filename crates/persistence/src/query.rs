//! Typed query builders.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use query_engine_expression::expression::{Operand, Operator, OrderDirection, QueryExpression};
use query_engine_metadata::metadata::MappingResolver;
use query_engine_sql::sql::dialect::SyntaxProvider;
use query_engine_sql::sql::string::Statement;
use query_engine_translation::translation;

use crate::entity::Entity;

pub use query_engine_translation::translation::error::Error as QueryError;

/// A query over entities of type `T`.
///
/// Every method returns a new query; the receiver is left untouched, so a
/// query can be shared and refined from several places.
pub struct Query<T> {
    resolver: Arc<dyn MappingResolver>,
    syntax: Arc<dyn SyntaxProvider>,
    expression: QueryExpression,
    entity: PhantomData<fn() -> T>,
}

impl<T> Clone for Query<T> {
    fn clone(&self) -> Self {
        Query {
            resolver: Arc::clone(&self.resolver),
            syntax: Arc::clone(&self.syntax),
            expression: self.expression.clone(),
            entity: PhantomData,
        }
    }
}

impl<T: Entity> fmt::Debug for Query<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("entity", &T::NAME)
            .field("dialect", &self.syntax.name())
            .field("expression", &self.expression)
            .finish()
    }
}

impl<T: Entity> Query<T> {
    pub(crate) fn new(resolver: Arc<dyn MappingResolver>, syntax: Arc<dyn SyntaxProvider>) -> Self {
        Query {
            resolver,
            syntax,
            expression: QueryExpression::new(),
            entity: PhantomData,
        }
    }

    fn with_expression(&self, expression: QueryExpression) -> Self {
        Query {
            resolver: Arc::clone(&self.resolver),
            syntax: Arc::clone(&self.syntax),
            expression,
            entity: PhantomData,
        }
    }

    /// The expression built so far.
    pub fn expression(&self) -> &QueryExpression {
        &self.expression
    }

    /// Add a comparison, ANDed with the current predicate.
    pub fn where_(
        &self,
        property: impl Into<String>,
        operator: Operator,
        operand: impl Into<Operand>,
    ) -> Result<Self, QueryError> {
        let expression = self.expression.where_(property, operator, operand)?;
        Ok(self.with_expression(expression))
    }

    pub fn and(&self, other: &Query<T>) -> Self {
        self.with_expression(self.expression.and(&other.expression))
    }

    pub fn or(&self, other: &Query<T>) -> Self {
        self.with_expression(self.expression.or(&other.expression))
    }

    pub fn order_by(&self, property: impl Into<String>, direction: OrderDirection) -> Self {
        self.with_expression(self.expression.order_by(property, direction))
    }

    pub fn page(&self, offset: i64, limit: i64) -> Result<Self, QueryError> {
        let expression = self.expression.page(offset, limit)?;
        Ok(self.with_expression(expression))
    }

    /// The statement selecting the matching entities.
    pub fn translate(&self) -> Result<Statement, QueryError> {
        translation::query::translate(
            self.resolver.as_ref(),
            self.syntax.as_ref(),
            T::NAME,
            &self.expression,
        )
    }

    /// The statement counting the matching entities.
    pub fn translate_count(&self) -> Result<Statement, QueryError> {
        translation::query::translate_count(
            self.resolver.as_ref(),
            self.syntax.as_ref(),
            T::NAME,
            &self.expression,
        )
    }
}
