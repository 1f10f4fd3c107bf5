//! Provider settings kept as versioned JSON in a string key-value store.
//!
//! Every settings type is stored under its own key as
//! `{"version": "<VERSION>", "settings": {...}}`. Settings are checked against
//! the JSON Schema of their type both when they are saved and when they are
//! loaded.

use std::collections::BTreeMap;

use jsonschema::JSONSchema;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Free-form string data attached to a store, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ExtendedData(pub BTreeMap<String, String>);

impl ExtendedData {
    pub fn new() -> Self {
        ExtendedData(BTreeMap::new())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }
}

/// A settings type stored in [`ExtendedData`].
pub trait ProviderSettings: Serialize + DeserializeOwned + JsonSchema + Default {
    /// The key the settings are stored under.
    const KEY: &'static str;
    /// The version written into, and expected in, the stored envelope.
    const VERSION: &'static str;
}

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    version: String,
    settings: serde_json::Value,
}

/// Read the settings of type `S`, or their default if none are stored.
pub fn load_settings<S: ProviderSettings>(data: &ExtendedData) -> Result<S, SettingsError> {
    let Some(stored) = data.get(S::KEY) else {
        tracing::debug!(key = S::KEY, "no settings stored, using defaults");
        return Ok(S::default());
    };

    let malformed = |source: serde_json::Error| SettingsError::Malformed {
        key: S::KEY.to_string(),
        source,
    };

    let envelope: Envelope = serde_json::from_str(stored).map_err(malformed)?;
    if envelope.version != S::VERSION {
        return Err(SettingsError::VersionMismatch {
            key: S::KEY.to_string(),
            expected: S::VERSION.to_string(),
            found: envelope.version,
        });
    }

    validate::<S>(&envelope.settings)?;
    serde_json::from_value(envelope.settings).map_err(malformed)
}

/// Store the settings of type `S`. Nothing is written if they are not valid.
pub fn save_settings<S: ProviderSettings>(
    data: &mut ExtendedData,
    settings: &S,
) -> Result<(), SettingsError> {
    let malformed = |source: serde_json::Error| SettingsError::Malformed {
        key: S::KEY.to_string(),
        source,
    };

    let value = serde_json::to_value(settings).map_err(malformed)?;
    validate::<S>(&value)?;

    let envelope = Envelope {
        version: S::VERSION.to_string(),
        settings: value,
    };
    data.set(S::KEY, serde_json::to_string(&envelope).map_err(malformed)?);
    Ok(())
}

fn validate<S: ProviderSettings>(value: &serde_json::Value) -> Result<(), SettingsError> {
    let schema_error = |message: String| SettingsError::Schema {
        key: S::KEY.to_string(),
        message,
    };

    let schema = serde_json::to_value(schemars::schema_for!(S))
        .map_err(|err| schema_error(err.to_string()))?;
    let compiled = JSONSchema::compile(&schema).map_err(|err| schema_error(err.to_string()))?;

    let messages: Vec<String> = match compiled.validate(value) {
        Ok(()) => return Ok(()),
        Err(errors) => errors
            .map(|error| format!("{}: {}", error.instance_path, error))
            .collect(),
    };

    tracing::warn!(key = S::KEY, errors = messages.len(), "settings rejected by their schema");
    Err(SettingsError::Invalid {
        key: S::KEY.to_string(),
        messages,
    })
}

/// Orders above `amount` ship for free.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FreeShippingOverAmount {
    #[schemars(range(min = 0))]
    pub amount: f64,
    /// ISO 4217 code of the currency `amount` is given in.
    #[schemars(length(equal = 3))]
    pub currency_code: String,
}

impl Default for FreeShippingOverAmount {
    fn default() -> Self {
        FreeShippingOverAmount {
            amount: 0.0,
            currency_code: "USD".to_string(),
        }
    }
}

impl ProviderSettings for FreeShippingOverAmount {
    const KEY: &'static str = "freeShippingOverAmount";
    const VERSION: &'static str = "1";
}
