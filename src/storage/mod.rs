//! Storage module for configuration.

pub mod config;

pub use config::{load_config, AppConfig, ConfigError, ConversionSettings, OutputSettings};
