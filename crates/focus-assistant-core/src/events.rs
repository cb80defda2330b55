use serde::{Deserialize, Serialize};

use crate::clock::Timestamp;
use crate::monitor::{AttentionState, BuzzerPattern};

/// Notable things the driver observed during a tick.
/// Logged as they happen and returned with each tick report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MonitorEvent {
    StateChanged {
        from: Option<AttentionState>,
        to: AttentionState,
        away_ms: u32,
        at_ms: Timestamp,
    },
    BeepFired {
        pattern: BuzzerPattern,
        state: AttentionState,
        at_ms: Timestamp,
    },
    /// Presence came back after an absence that reached `Distracted`.
    ReturnedToFocus {
        at_ms: Timestamp,
    },
}

impl MonitorEvent {
    pub fn at(&self) -> Timestamp {
        match self {
            MonitorEvent::StateChanged { at_ms, .. }
            | MonitorEvent::BeepFired { at_ms, .. }
            | MonitorEvent::ReturnedToFocus { at_ms } => *at_ms,
        }
    }
}
