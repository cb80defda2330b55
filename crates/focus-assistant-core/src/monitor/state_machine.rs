//! Presence classification.
//!
//! Turns a presence flag and the current time into an [`AttentionState`].
//! The only memory involved is `away_since` and `was_distracted` on the
//! [`CoreRecord`]; everything else is recomputed each tick.
//!
//! ```text
//! away <  short_break_s              -> ShortBreak
//! short_break_s <= away < warning_s  -> Warning
//! away >= warning_s                  -> Distracted
//! ```

use serde::{Deserialize, Serialize};

use super::record::CoreRecord;
use super::state::AttentionState;
use crate::clock::Timestamp;

/// Absences shorter than this many seconds are a short break.
pub const SHORT_BREAK_S: u32 = 120;
/// Absences of at least this many seconds are a distraction.
pub const WARNING_S: u32 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttentionStateMachine {
    short_break_s: u32,
    warning_s: u32,
}

impl Default for AttentionStateMachine {
    fn default() -> Self {
        Self {
            short_break_s: SHORT_BREAK_S,
            warning_s: WARNING_S,
        }
    }
}

impl AttentionStateMachine {
    /// Custom thresholds. Callers validate `short_break_s < warning_s`.
    pub fn with_thresholds(short_break_s: u32, warning_s: u32) -> Self {
        Self {
            short_break_s,
            warning_s,
        }
    }

    pub fn short_break_s(&self) -> u32 {
        self.short_break_s
    }

    pub fn warning_s(&self) -> u32 {
        self.warning_s
    }

    /// Classify one tick.
    ///
    /// Returns the state and whether this tick is the return from an absence
    /// that reached `Distracted`. That flag is true at most once per absence.
    pub fn classify(
        &self,
        presence: bool,
        now: Timestamp,
        record: &mut CoreRecord,
    ) -> (AttentionState, bool) {
        if presence {
            record.away_since = now;
            let transitioned_to_focus = std::mem::take(&mut record.was_distracted);
            return (AttentionState::Focused, transitioned_to_focus);
        }

        let away_seconds = record.away_ms(now) / 1000;
        let state = if away_seconds < self.short_break_s {
            AttentionState::ShortBreak
        } else if away_seconds < self.warning_s {
            AttentionState::Warning
        } else {
            record.was_distracted = true;
            AttentionState::Distracted
        };
        (state, false)
    }
}
