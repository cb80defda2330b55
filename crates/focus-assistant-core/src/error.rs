//! Error types for focus-assistant-core.
//!
//! The attention engine itself cannot fail. These errors cover the ambient
//! surfaces around it: configuration files, telemetry I/O and simulation
//! scenario parsing.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for focus-assistant-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Simulation scenario errors
    #[error("Scenario error: {0}")]
    Scenario(#[from] ScenarioError),

    /// IO errors, including telemetry sink failures
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Scenario parsing errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ScenarioError {
    #[error("Scenario has no segments")]
    Empty,

    #[error("Invalid segment '{0}': expected present:<duration> or away:<duration>")]
    InvalidSegment(String),

    #[error("Invalid duration '{0}': expected a number with an optional ms, s or m suffix")]
    InvalidDuration(String),

    #[error("Tick interval must be greater than zero")]
    ZeroTick,
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
