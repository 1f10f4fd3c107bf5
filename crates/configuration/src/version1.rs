//! Version 1 of the configuration format.

use std::path::Path;
use std::sync::Arc;

use query_engine_metadata::metadata;
use query_engine_sql::sql::dialect::{MySql, PostgreSql, Sqlite, SqlServer, SyntaxProvider};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::error::{ParseConfigurationError, WriteParsedConfigurationError};

pub const CONFIGURATION_FILENAME: &str = "configuration.json";
pub const CONFIGURATION_JSONSCHEMA_FILENAME: &str = "schema.json";

const CURRENT_VERSION: &str = "1";

/// The configuration as it is stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParsedConfiguration {
    /// Which version of the configuration format are we using.
    pub version: Version,
    /// The database engine queries are written for.
    pub dialect: Dialect,
    #[serde(default)]
    pub metadata: metadata::Metadata,
}

impl ParsedConfiguration {
    pub fn empty() -> Self {
        ParsedConfiguration {
            version: Version::This,
            dialect: Dialect::default(),
            metadata: metadata::Metadata::empty(),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Deserialize, Serialize, JsonSchema)]
pub enum Version {
    #[serde(rename = "1")]
    This,
}

/// The supported database engines.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    PostgreSql,
    SqlServer,
    MySql,
    Sqlite,
}

impl Dialect {
    pub fn syntax_provider(self) -> Arc<dyn SyntaxProvider> {
        match self {
            Dialect::PostgreSql => Arc::new(PostgreSql),
            Dialect::SqlServer => Arc::new(SqlServer),
            Dialect::MySql => Arc::new(MySql),
            Dialect::Sqlite => Arc::new(Sqlite),
        }
    }
}

/// Read the configuration file of a directory.
pub async fn parse_configuration(
    configuration_dir: impl AsRef<Path>,
) -> Result<ParsedConfiguration, ParseConfigurationError> {
    let configuration_file = configuration_dir.as_ref().join(CONFIGURATION_FILENAME);

    tracing::info!(path = %configuration_file.display(), "reading configuration");

    let configuration_file_contents =
        fs::read_to_string(&configuration_file)
            .await
            .map_err(|source| ParseConfigurationError::IoError {
                file_path: configuration_file.clone(),
                source,
            })?;

    let parse_error = |error: serde_json::Error| ParseConfigurationError::ParseError {
        file_path: configuration_file.clone(),
        line: error.line(),
        column: error.column(),
        message: error.to_string(),
    };

    // the version tag is checked before the body
    let configuration: serde_json::Value =
        serde_json::from_str(&configuration_file_contents).map_err(parse_error)?;
    match configuration.get("version") {
        Some(serde_json::Value::String(version)) if version == CURRENT_VERSION => {}
        Some(serde_json::Value::String(version)) => {
            return Err(ParseConfigurationError::UnsupportedVersion {
                file_path: configuration_file.clone(),
                version: version.clone(),
            })
        }
        Some(other) => {
            return Err(ParseConfigurationError::UnsupportedVersion {
                file_path: configuration_file.clone(),
                version: other.to_string(),
            })
        }
        None => {
            return Err(ParseConfigurationError::DidNotFindExpectedVersionTag(
                configuration_file.clone(),
            ))
        }
    }

    serde_json::from_str(&configuration_file_contents).map_err(parse_error)
}

/// Write the parsed configuration, and its JSON Schema, into a directory on disk.
pub async fn write_parsed_configuration(
    parsed_config: &ParsedConfiguration,
    out_dir: impl AsRef<Path>,
) -> Result<(), WriteParsedConfigurationError> {
    let configuration_file = out_dir.as_ref().join(CONFIGURATION_FILENAME);
    fs::create_dir_all(out_dir.as_ref()).await?;

    fs::write(
        &configuration_file,
        serde_json::to_string_pretty(parsed_config)? + "\n",
    )
    .await?;

    let configuration_jsonschema_file_path =
        out_dir.as_ref().join(CONFIGURATION_JSONSCHEMA_FILENAME);
    let output = schemars::schema_for!(ParsedConfiguration);
    fs::write(
        &configuration_jsonschema_file_path,
        serde_json::to_string_pretty(&output)? + "\n",
    )
    .await?;

    tracing::info!(path = %configuration_file.display(), "wrote configuration");

    Ok(())
}
