//! Storefront configuration: which dialect to speak and how entities map onto tables.
//!
//! A configuration directory holds `configuration.json`, read into a
//! [`ParsedConfiguration`] and then turned into the runtime [`Configuration`]
//! that query factories are built from.

pub mod configuration;
pub mod error;
pub mod settings;
pub mod version1;

pub use configuration::{make_runtime_configuration, Configuration};
pub use version1::{
    parse_configuration, write_parsed_configuration, Dialect, ParsedConfiguration, Version,
    CONFIGURATION_FILENAME, CONFIGURATION_JSONSCHEMA_FILENAME,
};
