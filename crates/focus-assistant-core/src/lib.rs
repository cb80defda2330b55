//! # Focus Assistant Core Library
//!
//! Presence-driven attention monitor. An ultrasonic rangefinder reports how
//! far away the user is; the monitor classifies how long they have been gone
//! and paces LED and buzzer alerts so the user is reminded without being
//! flooded.
//!
//! ## Architecture
//!
//! - **Monitor engine**: [`AttentionStateMachine`] and [`AlertScheduler`],
//!   two total functions over a caller-owned [`CoreRecord`]. They never sleep
//!   and never fail.
//! - **Collaborators**: [`RangeSensor`], [`Actuator`] and [`TelemetrySink`]
//!   traits with host-side implementations.
//! - **Driver**: [`Monitor`] wires one tick together; the caller supplies the
//!   time.
//! - **Simulation**: deterministic replay of presence scenarios.
//! - **Storage**: TOML configuration.
//!
//! ## Key Components
//!
//! - [`Monitor`]: per-tick control loop
//! - [`Simulator`]: scenario replay
//! - [`SessionStats`]: minutes per state from the telemetry stream
//! - [`Config`]: monitor configuration management

pub mod actuator;
pub mod clock;
pub mod driver;
pub mod error;
pub mod events;
pub mod monitor;
pub mod sensor;
pub mod simulation;
pub mod stats;
pub mod storage;
pub mod telemetry;

pub use actuator::{Actuator, ConsoleActuator, LedPolarity, PulseTiming, RecordingActuator};
pub use clock::{Clock, ManualClock, MonotonicClock, Timestamp};
pub use driver::{Monitor, TickReport};
pub use error::{ConfigError, CoreError, ScenarioError};
pub use events::MonitorEvent;
pub use monitor::{
    AlertCommand, AlertScheduler, AttentionState, AttentionStateMachine, BuzzerPattern,
    CoreRecord, LedColor, StatusLabel,
};
pub use sensor::{LineSensor, RangeSensor, ScriptedSensor, NO_ECHO_CM, PRESENT_THRESHOLD_CM};
pub use simulation::{Scenario, Segment, SimulationOptions, SimulationTrace, Simulator};
pub use stats::{SessionStats, StatsSummary};
pub use storage::Config;
pub use telemetry::{AlertHooks, DistractionRelay, LineSink, RelayAlert, TelemetrySink};
