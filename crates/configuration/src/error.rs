//! Errors that can be thrown when processing configuration.

use std::path::PathBuf;

use query_engine_metadata::metadata::RegistrationError;

/// The errors that can be thrown when reading a configuration directory.
#[derive(Debug, thiserror::Error)]
pub enum ParseConfigurationError {
    #[error("parse error on {file_path}:{line}:{column}: {message}")]
    ParseError {
        file_path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },
    #[error("could not read {file_path}: {source}")]
    IoError {
        file_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("did not find expected version tag in {0}")]
    DidNotFindExpectedVersionTag(PathBuf),
    #[error("unsupported configuration version \"{version}\" in {file_path}")]
    UnsupportedVersion { file_path: PathBuf, version: String },
}

/// The errors that can be thrown when writing a configuration directory.
#[derive(Debug, thiserror::Error)]
pub enum WriteParsedConfigurationError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("could not serialize configuration: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// The errors that can be thrown when turning a parsed configuration into a runtime one.
#[derive(Debug, thiserror::Error)]
pub enum MakeRuntimeConfigurationError {
    #[error("invalid entity mappings: {0}")]
    InvalidMappings(#[from] RegistrationError),
}

/// The errors that can be thrown when loading or saving provider settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("settings '{key}' are not valid JSON: {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("settings '{key}' have version \"{found}\", expected \"{expected}\"")]
    VersionMismatch {
        key: String,
        expected: String,
        found: String,
    },
    #[error("settings '{key}' do not match their schema: {}", messages.join("; "))]
    Invalid { key: String, messages: Vec<String> },
    #[error("the schema of settings '{key}' does not compile: {message}")]
    Schema { key: String, message: String },
}
