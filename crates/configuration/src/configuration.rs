//! The configuration used at runtime.

use std::sync::Arc;

use query_engine_metadata::metadata::EntityRegistry;
use query_engine_sql::sql::dialect::SyntaxProvider;

use crate::error::MakeRuntimeConfigurationError;
use crate::version1::{Dialect, ParsedConfiguration};

/// The 'Configuration' type collects all the information necessary to build queries at runtime.
///
/// Values of this type are produced from a 'ParsedConfiguration' using
/// 'make_runtime_configuration', which rejects inconsistent entity mappings.
#[derive(Debug, Clone)]
pub struct Configuration {
    pub dialect: Dialect,
    pub resolver: Arc<EntityRegistry>,
    pub syntax: Arc<dyn SyntaxProvider>,
}

/// Register the entity mappings and select the dialect.
pub fn make_runtime_configuration(
    parsed_config: ParsedConfiguration,
) -> Result<Configuration, MakeRuntimeConfigurationError> {
    let resolver = EntityRegistry::new(&parsed_config.metadata)?;
    Ok(Configuration {
        dialect: parsed_config.dialect,
        resolver: Arc::new(resolver),
        syntax: parsed_config.dialect.syntax_provider(),
    })
}
