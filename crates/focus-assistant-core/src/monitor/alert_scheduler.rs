//! Alert pacing.
//!
//! Maps the classified state onto an LED colour, a buzzer pattern and a
//! status label. Warning beeps, distraction beeps and the red flash each
//! keep their own clock on the [`CoreRecord`], keyed off the last time that
//! effect actually fired, so calling `schedule` faster than a window never
//! fires twice inside it.

use serde::{Deserialize, Serialize};

use super::record::CoreRecord;
use super::state::{AttentionState, StatusLabel};
use crate::clock::Timestamp;

/// Minimum gap between single beeps while in `Warning`.
pub const WARNING_BEEP_PERIOD_MS: u32 = 30_000;
/// Minimum gap between triple beeps while in `Distracted`.
pub const DISTRACTED_BEEP_PERIOD_MS: u32 = 30_000;
/// Red LED toggles at most this often while in `Distracted`.
pub const RED_FLASH_INTERVAL_MS: u32 = 250;

/// Tri-colour LED command. Polarity is applied by the actuator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LedColor {
    pub r: bool,
    pub g: bool,
    pub b: bool,
}

impl LedColor {
    pub const OFF: LedColor = LedColor::rgb(false, false, false);
    pub const RED: LedColor = LedColor::rgb(true, false, false);
    pub const GREEN: LedColor = LedColor::rgb(false, true, false);
    pub const BLUE: LedColor = LedColor::rgb(false, false, true);

    pub const fn rgb(r: bool, g: bool, b: bool) -> Self {
        Self { r, g, b }
    }

    pub fn as_tuple(self) -> (bool, bool, bool) {
        (self.r, self.g, self.b)
    }

    pub fn name(self) -> &'static str {
        match self.as_tuple() {
            (false, false, false) => "off",
            (true, false, false) => "red",
            (false, true, false) => "green",
            (false, false, true) => "blue",
            _ => "mixed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuzzerPattern {
    #[default]
    None,
    /// One short pulse: confirmation or warning.
    Short,
    /// Three pulses: distraction.
    Triple,
}

impl BuzzerPattern {
    pub fn is_silent(self) -> bool {
        self == BuzzerPattern::None
    }
}

/// Everything the actuator and telemetry sink need for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertCommand {
    pub led: LedColor,
    pub buzzer: BuzzerPattern,
    pub status: StatusLabel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertScheduler {
    warning_beep_period_ms: u32,
    distracted_beep_period_ms: u32,
    red_flash_interval_ms: u32,
}

impl Default for AlertScheduler {
    fn default() -> Self {
        Self {
            warning_beep_period_ms: WARNING_BEEP_PERIOD_MS,
            distracted_beep_period_ms: DISTRACTED_BEEP_PERIOD_MS,
            red_flash_interval_ms: RED_FLASH_INTERVAL_MS,
        }
    }
}

impl AlertScheduler {
    pub fn with_periods(
        warning_beep_period_ms: u32,
        distracted_beep_period_ms: u32,
        red_flash_interval_ms: u32,
    ) -> Self {
        Self {
            warning_beep_period_ms,
            distracted_beep_period_ms,
            red_flash_interval_ms,
        }
    }

    pub fn red_flash_interval_ms(&self) -> u32 {
        self.red_flash_interval_ms
    }

    /// Decide this tick's outputs. Mutates only the rate-limit and flash
    /// fields of `record`.
    pub fn schedule(
        &self,
        state: AttentionState,
        transitioned_to_focus: bool,
        now: Timestamp,
        record: &mut CoreRecord,
    ) -> AlertCommand {
        let status = StatusLabel::for_state(state);
        match state {
            AttentionState::Focused => AlertCommand {
                led: LedColor::GREEN,
                buzzer: if transitioned_to_focus {
                    BuzzerPattern::Short
                } else {
                    BuzzerPattern::None
                },
                status,
            },
            AttentionState::ShortBreak => AlertCommand {
                led: LedColor::GREEN,
                buzzer: BuzzerPattern::None,
                status,
            },
            AttentionState::Warning => {
                let buzzer = if window_open(
                    record.last_warning_beep_at,
                    now,
                    self.warning_beep_period_ms,
                ) {
                    record.last_warning_beep_at = Some(now);
                    BuzzerPattern::Short
                } else {
                    BuzzerPattern::None
                };
                AlertCommand {
                    led: LedColor::BLUE,
                    buzzer,
                    status,
                }
            }
            AttentionState::Distracted => {
                let buzzer = if window_open(
                    record.last_distracted_beep_at,
                    now,
                    self.distracted_beep_period_ms,
                ) {
                    record.last_distracted_beep_at = Some(now);
                    BuzzerPattern::Triple
                } else {
                    BuzzerPattern::None
                };

                if now.elapsed_since(record.last_flash_toggle_at) >= self.red_flash_interval_ms {
                    record.flash_is_on = !record.flash_is_on;
                    record.last_flash_toggle_at = now;
                }
                AlertCommand {
                    led: if record.flash_is_on {
                        LedColor::RED
                    } else {
                        LedColor::OFF
                    },
                    buzzer,
                    status,
                }
            }
        }
    }
}

fn window_open(last_fired: Option<Timestamp>, now: Timestamp, period_ms: u32) -> bool {
    match last_fired {
        None => true,
        Some(at) => now.elapsed_since(at) >= period_ms,
    }
}
