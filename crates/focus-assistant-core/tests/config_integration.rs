//! Integration tests for loading configuration from disk and running the
//! monitor with it.

use std::io::Write;

use focus_assistant_core::actuator::LedPolarity;
use focus_assistant_core::{
    AttentionState, Config, ConfigError, Monitor, RecordingActuator, ScriptedSensor,
    SessionStats, Timestamp,
};

#[test]
fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = Config::load_from(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(cfg, Config::default());
}

#[test]
fn save_then_load_preserves_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let mut cfg = Config::default();
    cfg.led.polarity = LedPolarity::ActiveLow;
    cfg.thresholds.short_break_s = 60;
    cfg.tick_delay_ms = 100;
    cfg.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, cfg);
}

#[test]
fn malformed_file_is_a_parse_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[thresholds\nshort_break_s = ").unwrap();
    let err = Config::load_from(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::ParseFailed(_)));
}

#[test]
fn invalid_values_are_rejected_on_load() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[thresholds]\nshort_break_s = 400\nwarning_s = 300").unwrap();
    let err = Config::load_from(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { .. }));
}

#[test]
fn presence_threshold_from_config_drives_the_monitor() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[presence]\npresent_threshold_cm = 100").unwrap();
    let cfg = Config::load_from(file.path()).unwrap();

    let mut monitor = Monitor::new(
        &cfg,
        ScriptedSensor::new([80, 120]),
        RecordingActuator::new(),
        SessionStats::new(),
        Timestamp::ZERO,
    );
    assert_eq!(monitor.tick(Timestamp(0)).unwrap().state, AttentionState::Focused);
    assert_eq!(monitor.tick(Timestamp(200)).unwrap().state, AttentionState::ShortBreak);
}
