//! TOML-based monitor configuration.
//!
//! Holds the tunables of the monitor:
//! - Presence threshold and absence thresholds
//! - Beep and flash pacing
//! - Buzzer pulse shapes and LED wiring
//! - Host relay gap and loop cadence
//!
//! Configuration is stored at `~/.config/focus-assistant/config.toml` and is
//! read once at startup. Nothing changes it while the loop runs.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::actuator::{LedPolarity, PulseTiming};
use crate::error::ConfigError;
use crate::monitor::{
    AlertScheduler, AttentionStateMachine, DISTRACTED_BEEP_PERIOD_MS, RED_FLASH_INTERVAL_MS,
    SHORT_BREAK_S, WARNING_BEEP_PERIOD_MS, WARNING_S,
};
use crate::sensor::{NO_ECHO_CM, PRESENT_THRESHOLD_CM};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresenceConfig {
    #[serde(default = "default_present_threshold_cm")]
    pub present_threshold_cm: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdsConfig {
    #[serde(default = "default_short_break_s")]
    pub short_break_s: u32,
    #[serde(default = "default_warning_s")]
    pub warning_s: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertsConfig {
    #[serde(default = "default_warning_beep_period_ms")]
    pub warning_beep_period_ms: u32,
    #[serde(default = "default_distracted_beep_period_ms")]
    pub distracted_beep_period_ms: u32,
    #[serde(default = "default_red_flash_interval_ms")]
    pub red_flash_interval_ms: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuzzerConfig {
    #[serde(default = "default_short_pulse_ms")]
    pub short_pulse_ms: u32,
    #[serde(default = "default_triple_pulse_ms")]
    pub triple_pulse_ms: u32,
    #[serde(default = "default_triple_gap_ms")]
    pub triple_gap_ms: u32,
    #[serde(default = "default_triple_count")]
    pub triple_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedConfig {
    /// Use `active-low` for common-anode LEDs.
    #[serde(default)]
    pub polarity: LedPolarity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelayConfig {
    #[serde(default = "default_relay_min_gap_s")]
    pub min_gap_s: u32,
    /// Desktop notification program; the alert message is appended.
    /// Empty disables it.
    #[serde(default = "default_notify_command")]
    pub notify_command: Vec<String>,
    /// Player for `sound_file`; the file path is appended.
    #[serde(default = "default_sound_command")]
    pub sound_command: Vec<String>,
    /// Played on each alert when the file exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound_file: Option<PathBuf>,
}

/// Monitor configuration.
///
/// Serialized to/from TOML at `~/.config/focus-assistant/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub presence: PresenceConfig,
    #[serde(default)]
    pub thresholds: ThresholdsConfig,
    #[serde(default)]
    pub alerts: AlertsConfig,
    #[serde(default)]
    pub buzzer: BuzzerConfig,
    #[serde(default)]
    pub led: LedConfig,
    #[serde(default)]
    pub relay: RelayConfig,
    /// Delay between ticks, not counting buzzer pulses.
    #[serde(default = "default_tick_delay_ms")]
    pub tick_delay_ms: u32,
}

// Default functions
fn default_present_threshold_cm() -> u32 {
    PRESENT_THRESHOLD_CM
}
fn default_short_break_s() -> u32 {
    SHORT_BREAK_S
}
fn default_warning_s() -> u32 {
    WARNING_S
}
fn default_warning_beep_period_ms() -> u32 {
    WARNING_BEEP_PERIOD_MS
}
fn default_distracted_beep_period_ms() -> u32 {
    DISTRACTED_BEEP_PERIOD_MS
}
fn default_red_flash_interval_ms() -> u32 {
    RED_FLASH_INTERVAL_MS
}
fn default_short_pulse_ms() -> u32 {
    90
}
fn default_triple_pulse_ms() -> u32 {
    70
}
fn default_triple_gap_ms() -> u32 {
    90
}
fn default_triple_count() -> u32 {
    3
}
fn default_relay_min_gap_s() -> u32 {
    30
}
fn default_notify_command() -> Vec<String> {
    vec!["notify-send".to_string(), "Focus Assistant".to_string()]
}
fn default_sound_command() -> Vec<String> {
    vec!["aplay".to_string()]
}
fn default_tick_delay_ms() -> u32 {
    200
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            present_threshold_cm: default_present_threshold_cm(),
        }
    }
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        Self {
            short_break_s: default_short_break_s(),
            warning_s: default_warning_s(),
        }
    }
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            warning_beep_period_ms: default_warning_beep_period_ms(),
            distracted_beep_period_ms: default_distracted_beep_period_ms(),
            red_flash_interval_ms: default_red_flash_interval_ms(),
        }
    }
}

impl Default for BuzzerConfig {
    fn default() -> Self {
        Self {
            short_pulse_ms: default_short_pulse_ms(),
            triple_pulse_ms: default_triple_pulse_ms(),
            triple_gap_ms: default_triple_gap_ms(),
            triple_count: default_triple_count(),
        }
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            min_gap_s: default_relay_min_gap_s(),
            notify_command: default_notify_command(),
            sound_command: default_sound_command(),
            sound_file: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            presence: PresenceConfig::default(),
            thresholds: ThresholdsConfig::default(),
            alerts: AlertsConfig::default(),
            buzzer: BuzzerConfig::default(),
            led: LedConfig::default(),
            relay: RelayConfig::default(),
            tick_delay_ms: default_tick_delay_ms(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the data directory, writing defaults if no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed or fails
    /// validation, or if the default config cannot be written.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        if !path.exists() {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            return Ok(cfg);
        }
        Self::load_from(&path)
    }

    /// Load from an explicit path. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
            }
        };
        let cfg: Config = toml::from_str(&content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Persist to an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Reject combinations the monitor cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |key: &str, message: &str| {
            Err(ConfigError::InvalidValue {
                key: key.to_string(),
                message: message.to_string(),
            })
        };
        if self.presence.present_threshold_cm == 0 {
            return invalid("presence.present_threshold_cm", "must be greater than zero");
        }
        if self.presence.present_threshold_cm > NO_ECHO_CM {
            return invalid(
                "presence.present_threshold_cm",
                "must not exceed the no-echo distance (9999)",
            );
        }
        if self.thresholds.short_break_s >= self.thresholds.warning_s {
            return invalid(
                "thresholds.short_break_s",
                "must be less than thresholds.warning_s",
            );
        }
        for (key, value) in [
            ("alerts.warning_beep_period_ms", self.alerts.warning_beep_period_ms),
            ("alerts.distracted_beep_period_ms", self.alerts.distracted_beep_period_ms),
            ("alerts.red_flash_interval_ms", self.alerts.red_flash_interval_ms),
            ("buzzer.triple_count", self.buzzer.triple_count),
        ] {
            if value == 0 {
                return invalid(key, "must be greater than zero");
            }
        }
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    pub fn state_machine(&self) -> AttentionStateMachine {
        AttentionStateMachine::with_thresholds(
            self.thresholds.short_break_s,
            self.thresholds.warning_s,
        )
    }

    pub fn alert_scheduler(&self) -> AlertScheduler {
        AlertScheduler::with_periods(
            self.alerts.warning_beep_period_ms,
            self.alerts.distracted_beep_period_ms,
            self.alerts.red_flash_interval_ms,
        )
    }

    pub fn pulse_timing(&self) -> PulseTiming {
        PulseTiming {
            short_pulse_ms: self.buzzer.short_pulse_ms,
            triple_pulse_ms: self.buzzer.triple_pulse_ms,
            triple_gap_ms: self.buzzer.triple_gap_ms,
            triple_count: self.buzzer.triple_count,
        }
    }
}
