//! Control loop driver.
//!
//! Owns the [`CoreRecord`] and the collaborators, and runs
//! `sample -> classify -> schedule -> actuate -> telemetry` once per tick.
//! The engine never sleeps; [`Monitor::run`] is the only place that waits.
//!
//! ## Usage
//!
//! ```ignore
//! let mut monitor = Monitor::new(&config, sensor, actuator, sink, clock.now());
//! loop {
//!     let report = monitor.tick(clock.now())?;
//! }
//! ```

use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::actuator::Actuator;
use crate::clock::{Clock, Timestamp};
use crate::error::Result;
use crate::events::MonitorEvent;
use crate::monitor::{
    AlertCommand, AlertScheduler, AttentionState, AttentionStateMachine, CoreRecord,
};
use crate::sensor::{is_present, RangeSensor};
use crate::storage::Config;
use crate::telemetry::TelemetrySink;

/// What happened on one tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    pub at_ms: Timestamp,
    pub distance_cm: u32,
    pub state: AttentionState,
    pub command: AlertCommand,
    pub events: Vec<MonitorEvent>,
}

pub struct Monitor<S, A, T> {
    state_machine: AttentionStateMachine,
    scheduler: AlertScheduler,
    present_threshold_cm: u32,
    record: CoreRecord,
    last_state: Option<AttentionState>,
    sensor: S,
    actuator: A,
    telemetry: T,
}

impl<S, A, T> Monitor<S, A, T>
where
    S: RangeSensor,
    A: Actuator,
    T: TelemetrySink,
{
    /// Build a monitor whose record starts at `startup`.
    pub fn new(config: &Config, sensor: S, actuator: A, telemetry: T, startup: Timestamp) -> Self {
        Self {
            state_machine: config.state_machine(),
            scheduler: config.alert_scheduler(),
            present_threshold_cm: config.presence.present_threshold_cm,
            record: CoreRecord::new(startup),
            last_state: None,
            sensor,
            actuator,
            telemetry,
        }
    }

    pub fn record(&self) -> &CoreRecord {
        &self.record
    }

    pub fn last_state(&self) -> Option<AttentionState> {
        self.last_state
    }

    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }

    pub fn telemetry(&self) -> &T {
        &self.telemetry
    }

    pub fn into_parts(self) -> (S, A, T) {
        (self.sensor, self.actuator, self.telemetry)
    }

    /// Run one full tick at `now`.
    ///
    /// # Errors
    /// Returns an error if the telemetry sink fails to write.
    pub fn tick(&mut self, now: Timestamp) -> Result<TickReport> {
        let distance_cm = self.sensor.sample_distance_cm();
        self.process(distance_cm, now)
    }

    /// Everything after sampling: classify, schedule, actuate, report.
    fn process(&mut self, distance_cm: u32, now: Timestamp) -> Result<TickReport> {
        let presence = is_present(distance_cm, self.present_threshold_cm);
        let away_ms = self.record.away_ms(now);

        let (state, transitioned_to_focus) =
            self.state_machine.classify(presence, now, &mut self.record);
        let command = self
            .scheduler
            .schedule(state, transitioned_to_focus, now, &mut self.record);

        let mut events = Vec::new();
        if self.last_state != Some(state) {
            info!(from = ?self.last_state, to = %state, away_ms, "attention state changed");
            events.push(MonitorEvent::StateChanged {
                from: self.last_state,
                to: state,
                away_ms,
                at_ms: now,
            });
            self.last_state = Some(state);
        }
        if transitioned_to_focus {
            info!(at = %now, "back after distraction");
            events.push(MonitorEvent::ReturnedToFocus { at_ms: now });
        }
        if !command.buzzer.is_silent() {
            events.push(MonitorEvent::BeepFired {
                pattern: command.buzzer,
                state,
                at_ms: now,
            });
        }
        debug!(at = %now, distance_cm, status = %command.status, led = command.led.name(), "tick");

        self.actuator.apply(&command);
        self.telemetry.emit(command.status)?;

        Ok(TickReport {
            at_ms: now,
            distance_cm,
            state,
            command,
            events,
        })
    }

    /// Host loop: tick, then sleep `tick_delay_ms`, until the sensor runs
    /// dry. Hardware sensors never do, so this runs forever.
    ///
    /// # Errors
    /// Stops at the first telemetry failure.
    pub fn run<C: Clock>(&mut self, clock: &C, tick_delay_ms: u32) -> Result<u64> {
        let mut ticks = 0u64;
        loop {
            let distance_cm = self.sensor.sample_distance_cm();
            if self.sensor.is_exhausted() {
                break;
            }
            self.process(distance_cm, clock.now())?;
            ticks += 1;
            thread::sleep(Duration::from_millis(u64::from(tick_delay_ms)));
        }
        info!(ticks, "distance source exhausted, stopping");
        Ok(ticks)
    }
}
