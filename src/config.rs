use std::{collections::HashSet, fs::File, path::Path};

use derive_getters::Getters;
use log::{debug, info};

use crate::error::{ConfigError, LoggerInitError};
use crate::logger::{setup_loggers, ChannelLogger, SinkOpener, SyslogOpener};
use crate::parser::{parse_conf, YamlConfig};

/// Methods logged to the sync log when the config does not list any.
pub const DEFAULT_SYNC_LOG_METHODS: [&str; 5] = ["PUT", "GET", "HEAD", "DELETE", "OPTIONS"];

/// Processed config, built once at startup and read only afterwards.
#[derive(Debug, Getters)]
pub struct Config {
    yaml: YamlConfig,
    sync_log_methods_set: HashSet<String>,
    sync_log: Option<ChannelLogger>,
    access_log: Option<ChannelLogger>,
    main_log: Option<ChannelLogger>,
}

impl Config {
    pub fn is_loggable_method(&self, method: &str) -> bool {
        self.sync_log_methods_set.contains(method)
    }
}

/// Outcome of [`configure`]. A logger failure does not discard the config.
#[derive(Debug)]
pub struct Loaded {
    pub config: Config,
    pub logger_error: Option<LoggerInitError>,
}

impl Loaded {
    /// Treats a degraded logger setup as an error.
    pub fn into_result(self) -> Result<Config, ConfigError> {
        match self.logger_error {
            Some(err) => Err(err.into()),
            None => Ok(self.config),
        }
    }
}

pub fn sync_log_methods_set(methods: &[String]) -> HashSet<String> {
    if methods.is_empty() {
        DEFAULT_SYNC_LOG_METHODS
            .iter()
            .map(|method| method.to_string())
            .collect()
    } else {
        methods.iter().cloned().collect()
    }
}

/// Loads the config file at `path` and opens the service loggers on the local syslog.
pub fn configure(path: impl AsRef<Path>) -> Result<Loaded, ConfigError> {
    configure_with(path, &SyslogOpener::default())
}

pub fn configure_with<O: SinkOpener + ?Sized>(
    path: impl AsRef<Path>,
    opener: &O,
) -> Result<Loaded, ConfigError> {
    let path = path.as_ref();

    let file = File::open(path).map_err(|source| ConfigError::ConfigFile {
        path: path.to_path_buf(),
        source,
    })?;

    let yaml = parse_conf(file)?;
    debug!("parsed config file {:?}", path);

    let sync_log_methods_set = sync_log_methods_set(yaml.sync_log_methods());

    let (loggers, logger_error) = setup_loggers(opener);

    info!(
        "config loaded from {:?}, backends: {}",
        path,
        yaml.backends().len()
    );

    Ok(Loaded {
        config: Config {
            yaml,
            sync_log_methods_set,
            sync_log: loggers.sync,
            access_log: loggers.access,
            main_log: loggers.main,
        },
        logger_error,
    })
}
