//! Actuator interface: LED pins and an active buzzer.
//!
//! The engine only produces [`AlertCommand`]s. Pin polarity and buzzer pulse
//! shapes are decided here, on the sink side.

use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::monitor::{AlertCommand, BuzzerPattern, LedColor};

/// Consumes one command per tick.
pub trait Actuator {
    fn apply(&mut self, command: &AlertCommand);
}

/// How the LED is wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LedPolarity {
    /// Common cathode: HIGH lights the channel.
    #[default]
    ActiveHigh,
    /// Common anode: LOW lights the channel.
    ActiveLow,
}

impl LedPolarity {
    /// Pin levels for `[r, g, b]`, `true` meaning HIGH.
    pub fn pin_levels(self, color: LedColor) -> [bool; 3] {
        let (r, g, b) = color.as_tuple();
        match self {
            LedPolarity::ActiveHigh => [r, g, b],
            LedPolarity::ActiveLow => [!r, !g, !b],
        }
    }
}

/// One buzzer level held for `ms` milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pulse {
    pub high: bool,
    pub ms: u32,
}

/// Pulse shapes for an active buzzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PulseTiming {
    pub short_pulse_ms: u32,
    pub triple_pulse_ms: u32,
    pub triple_gap_ms: u32,
    pub triple_count: u32,
}

impl Default for PulseTiming {
    fn default() -> Self {
        Self {
            short_pulse_ms: 90,
            triple_pulse_ms: 70,
            triple_gap_ms: 90,
            triple_count: 3,
        }
    }
}

impl PulseTiming {
    pub fn pulses(&self, pattern: BuzzerPattern) -> Vec<Pulse> {
        match pattern {
            BuzzerPattern::None => Vec::new(),
            BuzzerPattern::Short => vec![Pulse {
                high: true,
                ms: self.short_pulse_ms,
            }],
            BuzzerPattern::Triple => (0..self.triple_count)
                .flat_map(|_| {
                    [
                        Pulse {
                            high: true,
                            ms: self.triple_pulse_ms,
                        },
                        Pulse {
                            high: false,
                            ms: self.triple_gap_ms,
                        },
                    ]
                })
                .collect(),
        }
    }

    /// Time the loop is blocked while `pattern` plays.
    pub fn duration_ms(&self, pattern: BuzzerPattern) -> u32 {
        self.pulses(pattern).iter().map(|p| p.ms).sum()
    }
}

/// Logs LED and buzzer activity through `tracing`.
///
/// With `realtime` set, blocks for each pulse like the hardware loop does.
#[derive(Debug, Clone)]
pub struct ConsoleActuator {
    polarity: LedPolarity,
    timing: PulseTiming,
    realtime: bool,
    last_led: Option<LedColor>,
}

impl ConsoleActuator {
    pub fn new(polarity: LedPolarity, timing: PulseTiming) -> Self {
        Self {
            polarity,
            timing,
            realtime: false,
            last_led: None,
        }
    }

    pub fn realtime(mut self, realtime: bool) -> Self {
        self.realtime = realtime;
        self
    }
}

impl Actuator for ConsoleActuator {
    fn apply(&mut self, command: &AlertCommand) {
        if self.last_led != Some(command.led) {
            let [r, g, b] = self.polarity.pin_levels(command.led);
            debug!(color = command.led.name(), r, g, b, "led");
            self.last_led = Some(command.led);
        }
        if command.buzzer.is_silent() {
            return;
        }
        let pulses = self.timing.pulses(command.buzzer);
        info!(
            pattern = ?command.buzzer,
            duration_ms = self.timing.duration_ms(command.buzzer),
            "buzzer"
        );
        if self.realtime {
            for pulse in pulses {
                thread::sleep(Duration::from_millis(u64::from(pulse.ms)));
            }
        }
    }
}

/// Keeps every command it receives.
#[derive(Debug, Clone, Default)]
pub struct RecordingActuator {
    commands: Vec<AlertCommand>,
}

impl RecordingActuator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[AlertCommand] {
        &self.commands
    }

    pub fn beeps(&self) -> impl Iterator<Item = BuzzerPattern> + '_ {
        self.commands
            .iter()
            .map(|c| c.buzzer)
            .filter(|b| !b.is_silent())
    }
}

impl Actuator for RecordingActuator {
    fn apply(&mut self, command: &AlertCommand) {
        self.commands.push(*command);
    }
}
