use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Attention state derived from presence and away-duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttentionState {
    Focused,
    ShortBreak,
    Warning,
    Distracted,
}

impl AttentionState {
    pub const ALL: [AttentionState; 4] = [
        AttentionState::Focused,
        AttentionState::ShortBreak,
        AttentionState::Warning,
        AttentionState::Distracted,
    ];

    /// Literal status line written to telemetry.
    pub fn label(self) -> &'static str {
        match self {
            AttentionState::Focused => "FOCUS",
            AttentionState::ShortBreak => "SHORT BREAK",
            AttentionState::Warning => "WARNING",
            AttentionState::Distracted => "DISTRACTED",
        }
    }
}

impl fmt::Display for AttentionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returned when a telemetry line is not one of the four labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLabel(pub String);

impl fmt::Display for UnknownLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown status label: {:?}", self.0)
    }
}

impl std::error::Error for UnknownLabel {}

impl FromStr for AttentionState {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        AttentionState::ALL
            .into_iter()
            .find(|state| state.label() == trimmed)
            .ok_or_else(|| UnknownLabel(trimmed.to_string()))
    }
}

/// Status label carried by an [`AlertCommand`](super::AlertCommand).
///
/// Serializes as the literal label string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusLabel(AttentionState);

impl StatusLabel {
    pub fn for_state(state: AttentionState) -> Self {
        Self(state)
    }

    pub fn as_str(self) -> &'static str {
        self.0.label()
    }

    pub fn state(self) -> AttentionState {
        self.0
    }
}

impl fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for StatusLabel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for StatusLabel {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse::<AttentionState>()
            .map(StatusLabel)
            .map_err(serde::de::Error::custom)
    }
}
