mod config;

pub use config::{
    AlertsConfig, BuzzerConfig, Config, LedConfig, PresenceConfig, RelayConfig, ThresholdsConfig,
};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/focus-assistant[-dev]/` based on FOCUS_ASSISTANT_ENV.
///
/// Set FOCUS_ASSISTANT_ENV=dev to use the development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("FOCUS_ASSISTANT_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("focus-assistant-dev")
    } else {
        base_dir.join("focus-assistant")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::SaveFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}
