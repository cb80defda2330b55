//! Session statistics over the telemetry stream.
//!
//! Every tick contributes one row, so time per state is
//! `rows x tick length`. Input lines may be bare labels (`WARNING`) or
//! timestamped CSV rows (`2025-03-01 09:12:44,WARNING`); anything else is
//! skipped.

use std::io::{self, BufRead};

use serde::{Deserialize, Serialize};

use crate::monitor::{AttentionState, StatusLabel};
use crate::telemetry::TelemetrySink;

/// Seconds represented by one telemetry row at the default tick cadence.
pub const DEFAULT_TICK_SECS: f64 = 0.2;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    focus_rows: u64,
    short_break_rows: u64,
    warning_rows: u64,
    distracted_rows: u64,
    distracted_episodes: u64,
    skipped_lines: u64,
    last: Option<AttentionState>,
}

/// Minutes per state, rounded to one decimal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    pub focus_min: f64,
    pub short_break_min: f64,
    pub warning_min: f64,
    pub distracted_min: f64,
    pub away_min: f64,
    /// Rows labelled `DISTRACTED`. Serialized under the key existing
    /// dashboards read.
    #[serde(rename = "distracted_events", alias = "distracted_rows")]
    pub distracted_rows: u64,
    pub distracted_episodes: u64,
    pub rows: u64,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, state: AttentionState) {
        match state {
            AttentionState::Focused => self.focus_rows += 1,
            AttentionState::ShortBreak => self.short_break_rows += 1,
            AttentionState::Warning => self.warning_rows += 1,
            AttentionState::Distracted => {
                self.distracted_rows += 1;
                if self.last != Some(AttentionState::Distracted) {
                    self.distracted_episodes += 1;
                }
            }
        }
        self.last = Some(state);
    }

    /// Feed one log line. Returns whether it carried a label.
    pub fn ingest_line(&mut self, line: &str) -> bool {
        let field = line.rsplit(',').next().unwrap_or(line);
        match field.parse::<AttentionState>() {
            Ok(state) => {
                self.record(state);
                true
            }
            Err(_) => {
                if !line.trim().is_empty() {
                    self.skipped_lines += 1;
                }
                false
            }
        }
    }

    pub fn from_reader<R: BufRead>(reader: R) -> io::Result<Self> {
        let mut stats = Self::new();
        for line in reader.lines() {
            stats.ingest_line(&line?);
        }
        Ok(stats)
    }

    pub fn rows(&self) -> u64 {
        self.focus_rows + self.short_break_rows + self.warning_rows + self.distracted_rows
    }

    pub fn skipped_lines(&self) -> u64 {
        self.skipped_lines
    }

    pub fn summary(&self, tick_secs: f64) -> StatsSummary {
        let minutes = |rows: u64| round1(rows as f64 * tick_secs / 60.0);
        let away_rows = self.short_break_rows + self.warning_rows + self.distracted_rows;
        StatsSummary {
            focus_min: minutes(self.focus_rows),
            short_break_min: minutes(self.short_break_rows),
            warning_min: minutes(self.warning_rows),
            distracted_min: minutes(self.distracted_rows),
            away_min: minutes(away_rows),
            distracted_rows: self.distracted_rows,
            distracted_episodes: self.distracted_episodes,
            rows: self.rows(),
        }
    }
}

impl TelemetrySink for SessionStats {
    fn emit(&mut self, status: StatusLabel) -> io::Result<()> {
        self.record(status.state());
        Ok(())
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
