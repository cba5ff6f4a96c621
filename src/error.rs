use std::{io, path::PathBuf};

use thiserror::Error;

use crate::logger::Channel;

/// A backend entry that does not carry a host component.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("url should match proto://host[:port]/path scheme, got {0:?}")]
pub struct MalformedUrl(pub String);

/// The logging channel whose open attempt failed last.
#[derive(Debug, Error)]
#[error("could not open {channel} log channel: {source}")]
pub struct LoggerInitError {
    pub channel: Channel,
    #[source]
    pub source: io::Error,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not open config file {path:?}: {source}")]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not read config: {0}")]
    Io(#[from] io::Error),

    #[error("could not deserialize config: {0}")]
    Deserialization(#[from] serde_yaml::Error),

    #[error(transparent)]
    LoggerInit(#[from] LoggerInitError),
}
