use std::{collections::HashMap, io::Read};

use derive_getters::Getters;
use serde::{Deserialize as _, Deserializer};
use serde_derive::{Deserialize, Serialize};

use crate::backend::BackendUrl;
use crate::error::ConfigError;

/// Fields of the yaml config file. Missing keys keep their zero value.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "PascalCase", default)]
pub struct YamlConfig {
    /// Listen interface and port e.g. "0:8000", "localhost:9090", ":80"
    #[serde(skip_serializing_if = "String::is_empty")]
    listen: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(deserialize_with = "null_as_default")]
    backends: Vec<BackendUrl>,
    /// Limit of outgoing connections
    #[serde(skip_serializing_if = "is_zero")]
    conn_limit: i64,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    #[serde(deserialize_with = "null_as_default")]
    additional_request_headers: HashMap<String, String>,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    #[serde(deserialize_with = "null_as_default")]
    additional_response_headers: HashMap<String, String>,
    /// Read timeout on outgoing connections, kept as written
    #[serde(skip_serializing_if = "String::is_empty")]
    connection_timeout: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    connection_dial_timeout: String,
    /// Backend in maintenance mode, no traffic is sent there
    #[serde(skip_serializing_if = "String::is_empty")]
    maintained_backend: String,
    /// Request methods logged to the sync log on backend failure
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(deserialize_with = "null_as_default")]
    sync_log_methods: Vec<String>,
    keep_alive: bool,
}

/// An explicit `~` leaves the field at its zero value, like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: serde::Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}

impl YamlConfig {
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

impl TryFrom<String> for YamlConfig {
    type Error = serde_yaml::Error;

    fn try_from(value: String) -> Result<Self, serde_yaml::Error> {
        let config: YamlConfig = serde_yaml::from_str(&value)?;

        Ok(config)
    }
}

/// Reads `source` to the end and deserializes it.
pub fn parse_conf<R: Read>(mut source: R) -> Result<YamlConfig, ConfigError> {
    let mut contents = Vec::new();
    source.read_to_end(&mut contents)?;

    Ok(serde_yaml::from_slice(&contents)?)
}
