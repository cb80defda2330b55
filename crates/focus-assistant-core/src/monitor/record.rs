use serde::{Deserialize, Serialize};

use crate::clock::Timestamp;

/// Mutable state shared by the state machine and the alert scheduler.
///
/// Owned by the control loop and lent to each component once per tick.
/// `away_since` is the time presence was last confirmed, not the start of
/// the absence edge: it is rewritten on every present tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreRecord {
    pub away_since: Timestamp,
    /// Only written while in `Warning`.
    pub last_warning_beep_at: Option<Timestamp>,
    /// Only written while in `Distracted`.
    pub last_distracted_beep_at: Option<Timestamp>,
    pub last_flash_toggle_at: Timestamp,
    pub flash_is_on: bool,
    /// Set on reaching `Distracted`; cleared by the confirmation beep.
    pub was_distracted: bool,
}

impl CoreRecord {
    /// Fresh record for a loop started at `startup`.
    pub fn new(startup: Timestamp) -> Self {
        Self {
            away_since: startup,
            last_warning_beep_at: None,
            last_distracted_beep_at: None,
            last_flash_toggle_at: startup,
            flash_is_on: false,
            was_distracted: false,
        }
    }

    /// Milliseconds since presence was last confirmed.
    pub fn away_ms(&self, now: Timestamp) -> u32 {
        now.elapsed_since(self.away_since)
    }
}
