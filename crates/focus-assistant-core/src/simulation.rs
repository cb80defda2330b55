//! Deterministic simulation harness for the monitor.
//!
//! Drives the real [`Monitor`] with a [`ManualClock`] and a scripted sensor
//! so presence scenarios replay identically every run. Scenarios are
//! written as comma-separated segments:
//!
//! ```text
//! present:5s,away:130s,present:2s
//! ```
//!
//! Durations take an `ms`, `s` or `m` suffix; bare numbers are milliseconds.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::actuator::{PulseTiming, RecordingActuator};
use crate::clock::{Clock, ManualClock, Timestamp};
use crate::driver::Monitor;
use crate::error::{Result, ScenarioError};
use crate::events::MonitorEvent;
use crate::monitor::{AttentionState, BuzzerPattern, LedColor};
use crate::sensor::{ScriptedSensor, NO_ECHO_CM};
use crate::stats::{SessionStats, StatsSummary};
use crate::storage::Config;

/// Tick cadence of the hardware loop.
pub const DEFAULT_TICK_MS: u32 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub presence: bool,
    pub duration_ms: u32,
}

impl Segment {
    pub fn present(duration_ms: u32) -> Self {
        Self {
            presence: true,
            duration_ms,
        }
    }

    pub fn away(duration_ms: u32) -> Self {
        Self {
            presence: false,
            duration_ms,
        }
    }
}

/// A timeline of presence and absence, sampled every `tick_ms`.
///
/// Always holds a non-zero tick and at least one segment; deserialization
/// goes through [`Scenario::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawScenario")]
pub struct Scenario {
    tick_ms: u32,
    segments: Vec<Segment>,
}

#[derive(Deserialize)]
struct RawScenario {
    tick_ms: u32,
    segments: Vec<Segment>,
}

impl TryFrom<RawScenario> for Scenario {
    type Error = ScenarioError;

    fn try_from(raw: RawScenario) -> Result<Self, Self::Error> {
        Scenario::new(raw.tick_ms, raw.segments)
    }
}

impl Scenario {
    pub fn new(tick_ms: u32, segments: Vec<Segment>) -> Result<Self, ScenarioError> {
        if tick_ms == 0 {
            return Err(ScenarioError::ZeroTick);
        }
        if segments.is_empty() {
            return Err(ScenarioError::Empty);
        }
        Ok(Self { tick_ms, segments })
    }

    pub fn with_tick_ms(mut self, tick_ms: u32) -> Result<Self, ScenarioError> {
        if tick_ms == 0 {
            return Err(ScenarioError::ZeroTick);
        }
        self.tick_ms = tick_ms;
        Ok(self)
    }

    pub fn tick_ms(&self) -> u32 {
        self.tick_ms
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn total_ms(&self) -> u64 {
        self.segments.iter().map(|s| u64::from(s.duration_ms)).sum()
    }

    /// Presence at `elapsed_ms` into the scenario, `None` past the end.
    pub fn presence_at(&self, elapsed_ms: u64) -> Option<bool> {
        let mut end = 0u64;
        for segment in &self.segments {
            end += u64::from(segment.duration_ms);
            if elapsed_ms < end {
                return Some(segment.presence);
            }
        }
        None
    }
}

impl FromStr for Scenario {
    type Err = ScenarioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments = s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(parse_segment)
            .collect::<Result<Vec<_>, _>>()?;
        Scenario::new(DEFAULT_TICK_MS, segments)
    }
}

fn parse_segment(part: &str) -> Result<Segment, ScenarioError> {
    let (kind, duration) = part
        .split_once(':')
        .ok_or_else(|| ScenarioError::InvalidSegment(part.to_string()))?;
    let duration_ms = parse_duration_ms(duration.trim())?;
    match kind.trim() {
        "present" | "p" => Ok(Segment::present(duration_ms)),
        "away" | "a" => Ok(Segment::away(duration_ms)),
        _ => Err(ScenarioError::InvalidSegment(part.to_string())),
    }
}

fn parse_duration_ms(raw: &str) -> Result<u32, ScenarioError> {
    let invalid = || ScenarioError::InvalidDuration(raw.to_string());
    let (digits, scale) = if let Some(v) = raw.strip_suffix("ms") {
        (v, 1)
    } else if let Some(v) = raw.strip_suffix('s') {
        (v, 1_000)
    } else if let Some(v) = raw.strip_suffix('m') {
        (v, 60_000)
    } else {
        (raw, 1)
    };
    digits
        .trim()
        .parse::<u32>()
        .ok()
        .and_then(|n| n.checked_mul(scale))
        .ok_or_else(invalid)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SimulationOptions {
    /// Clock value at the first tick.
    pub start: Timestamp,
    /// Advance the clock by the buzzer pulse time after a beep, as the
    /// blocking hardware loop does.
    pub include_pulse_latency: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickRecord {
    /// Milliseconds since the start of the scenario.
    pub elapsed_ms: u64,
    pub at_ms: Timestamp,
    pub presence: bool,
    pub state: AttentionState,
    pub led: LedColor,
    pub buzzer: BuzzerPattern,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationTrace {
    pub ticks: Vec<TickRecord>,
    pub events: Vec<MonitorEvent>,
    pub stats: StatsSummary,
}

impl SimulationTrace {
    pub fn final_state(&self) -> Option<AttentionState> {
        self.ticks.last().map(|t| t.state)
    }

    pub fn beep_count(&self, pattern: BuzzerPattern) -> usize {
        self.ticks.iter().filter(|t| t.buzzer == pattern).count()
    }

    pub fn states(&self) -> impl Iterator<Item = AttentionState> + '_ {
        self.ticks.iter().map(|t| t.state)
    }
}

pub struct Simulator {
    config: Config,
    options: SimulationOptions,
}

impl Simulator {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            options: SimulationOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SimulationOptions) -> Self {
        self.options = options;
        self
    }

    /// Replay `scenario` tick by tick.
    ///
    /// # Errors
    /// Only fails if the telemetry sink does, which the in-memory stats
    /// sink never does.
    pub fn run(&self, scenario: &Scenario) -> Result<SimulationTrace> {
        let clock = ManualClock::starting_at(self.options.start);
        let timing: PulseTiming = self.config.pulse_timing();
        // Half the threshold, kept below the no-echo sentinel.
        let present_cm = (self.config.presence.present_threshold_cm / 2).min(NO_ECHO_CM - 1);

        let mut monitor = Monitor::new(
            &self.config,
            ScriptedSensor::default(),
            RecordingActuator::new(),
            SessionStats::new(),
            clock.now(),
        );

        let mut ticks = Vec::new();
        let mut events = Vec::new();
        let mut elapsed_ms = 0u64;
        while let Some(presence) = scenario.presence_at(elapsed_ms) {
            monitor
                .sensor_mut()
                .push(if presence { present_cm } else { NO_ECHO_CM });
            let report = monitor.tick(clock.now())?;

            let mut step = scenario.tick_ms();
            if self.options.include_pulse_latency {
                step = step.saturating_add(timing.duration_ms(report.command.buzzer));
            }
            ticks.push(TickRecord {
                elapsed_ms,
                at_ms: report.at_ms,
                presence,
                state: report.state,
                led: report.command.led,
                buzzer: report.command.buzzer,
            });
            events.extend(report.events);
            clock.advance(step);
            elapsed_ms += u64::from(step);
        }

        let stats = monitor
            .telemetry()
            .summary(f64::from(scenario.tick_ms()) / 1000.0);
        Ok(SimulationTrace {
            ticks,
            events,
            stats,
        })
    }
}
