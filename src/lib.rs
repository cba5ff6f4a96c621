pub mod backend;
pub mod config;
pub mod error;
pub mod logger;
pub mod parser;

pub use crate::config::{configure, configure_with, Config, Loaded};
pub use crate::error::ConfigError;
