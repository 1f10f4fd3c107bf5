//! The entry point for building queries.

use std::sync::Arc;

use query_engine_metadata::metadata::MappingResolver;
use query_engine_sql::sql::dialect::SyntaxProvider;
use storefront_configuration::Configuration;

use crate::entity::Entity;
use crate::query::Query;

/// Manufactures typed queries bound to one resolver and one dialect.
///
/// The factory holds no per-query state; clones share the same resolver and
/// dialect and can be used from any thread.
#[derive(Debug, Clone)]
pub struct QueryFactory {
    resolver: Arc<dyn MappingResolver>,
    syntax: Arc<dyn SyntaxProvider>,
}

impl QueryFactory {
    pub fn new(resolver: Arc<dyn MappingResolver>, syntax: Arc<dyn SyntaxProvider>) -> Self {
        QueryFactory { resolver, syntax }
    }

    /// Use the resolver and dialect of a runtime configuration.
    pub fn from_configuration(configuration: &Configuration) -> Self {
        QueryFactory::new(
            configuration.resolver.clone(),
            configuration.syntax.clone(),
        )
    }

    /// A query matching every `T`.
    pub fn create<T: Entity>(&self) -> Query<T> {
        tracing::trace!(entity = T::NAME, dialect = self.syntax.name(), "creating query");
        Query::new(Arc::clone(&self.resolver), Arc::clone(&self.syntax))
    }

    pub fn resolver(&self) -> &dyn MappingResolver {
        self.resolver.as_ref()
    }

    pub fn syntax(&self) -> &dyn SyntaxProvider {
        self.syntax.as_ref()
    }

    /// Quote an identifier for a raw SQL fragment.
    pub fn quote_identifier(&self, name: &str) -> String {
        self.syntax.quote_identifier(name)
    }

    /// Quote a name for a raw SQL fragment only if the dialect reserves it.
    pub fn escape_reserved(&self, name: &str) -> String {
        self.syntax.escape_reserved(name)
    }
}
