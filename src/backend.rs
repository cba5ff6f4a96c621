use std::{fmt::Display, ops::Deref, str::FromStr};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use url::Url;

use crate::error::MalformedUrl;

/// A backend address from the `Backends` list.
///
/// Only urls with a non-empty host are accepted, e.g. `http://s3.example.org:8080/bucket`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BackendUrl(Url);

impl BackendUrl {
    pub fn url(&self) -> &Url {
        &self.0
    }

    pub fn scheme(&self) -> &str {
        self.0.scheme()
    }

    pub fn host(&self) -> &str {
        self.0.host_str().unwrap_or_default()
    }

    /// Explicit port, falling back to the scheme's well known port.
    pub fn port(&self) -> Option<u16> {
        self.0.port_or_known_default()
    }

    pub fn path(&self) -> &str {
        self.0.path()
    }
}

impl FromStr for BackendUrl {
    type Err = MalformedUrl;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        // The url crate fills in a host for `http:///path` and `http:/host`,
        // so the authority has to be present in the input itself.
        let has_authority = value
            .split_once("://")
            .is_some_and(|(_, rest)| !rest.is_empty() && !rest.starts_with('/'));
        if !has_authority {
            return Err(MalformedUrl(value.to_string()));
        }

        let url = Url::parse(value).map_err(|_| MalformedUrl(value.to_string()))?;

        match url.host_str() {
            Some(host) if !host.is_empty() => Ok(Self(url)),
            _ => Err(MalformedUrl(value.to_string())),
        }
    }
}

impl Deref for BackendUrl {
    type Target = Url;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for BackendUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for BackendUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(de::Error::custom)
    }
}

impl Serialize for BackendUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}
