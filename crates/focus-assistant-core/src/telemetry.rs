//! Status-line telemetry and the host-side distraction relay with its alert hooks.

use std::ffi::OsStr;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::monitor::{AttentionState, StatusLabel};
use crate::storage::RelayConfig;

/// Append-only sink that receives exactly one label per tick.
pub trait TelemetrySink {
    fn emit(&mut self, status: StatusLabel) -> io::Result<()>;
}

/// Writes each label on its own line and flushes immediately.
#[derive(Debug)]
pub struct LineSink<W> {
    writer: W,
}

impl<W: Write> LineSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> TelemetrySink for LineSink<W> {
    fn emit(&mut self, status: StatusLabel) -> io::Result<()> {
        writeln!(self.writer, "{status}")?;
        self.writer.flush()
    }
}

pub const RELAY_MESSAGE: &str = "Away > 5 minutes — time to return!";

/// Host alert raised by [`DistractionRelay`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayAlert {
    pub at: DateTime<Utc>,
    pub message: String,
}

/// Turns a stream of `DISTRACTED` labels into rate-limited host alerts.
#[derive(Debug, Clone)]
pub struct DistractionRelay {
    min_gap: Duration,
    last_alert: Option<DateTime<Utc>>,
}

impl DistractionRelay {
    pub fn new(min_gap_s: u32) -> Self {
        Self {
            min_gap: Duration::seconds(i64::from(min_gap_s)),
            last_alert: None,
        }
    }

    pub fn observe(&mut self, state: AttentionState, at: DateTime<Utc>) -> Option<RelayAlert> {
        if state != AttentionState::Distracted {
            return None;
        }
        if let Some(last) = self.last_alert {
            if at - last < self.min_gap {
                return None;
            }
        }
        self.last_alert = Some(at);
        info!(%at, "relaying distraction alert");
        Some(RelayAlert {
            at,
            message: RELAY_MESSAGE.to_string(),
        })
    }
}

/// Desktop side effects of a relay alert: an alert sound, then a
/// notification. Hook failures are logged and otherwise ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertHooks {
    notify_command: Vec<String>,
    sound_command: Vec<String>,
    sound_file: Option<PathBuf>,
}

impl AlertHooks {
    pub fn from_config(config: &RelayConfig) -> Self {
        Self {
            notify_command: config.notify_command.clone(),
            sound_command: config.sound_command.clone(),
            sound_file: config.sound_file.clone(),
        }
    }

    /// Run the hooks for `alert`. Returns how many exited successfully.
    pub fn fire(&self, alert: &RelayAlert) -> usize {
        let mut succeeded = 0;
        match &self.sound_file {
            Some(file) if file.exists() => {
                succeeded += usize::from(run_hook(&self.sound_command, file.as_os_str()));
            }
            Some(file) => debug!(path = %file.display(), "alert sound not found, skipping"),
            None => {}
        }
        succeeded += usize::from(run_hook(&self.notify_command, OsStr::new(&alert.message)));
        succeeded
    }
}

fn run_hook(argv: &[String], last_arg: &OsStr) -> bool {
    let Some((program, args)) = argv.split_first() else {
        return false;
    };
    // Hook output must not mix with the telemetry stream on stdout.
    let status = Command::new(program)
        .args(args)
        .arg(last_arg)
        .stdout(Stdio::null())
        .status();
    match status {
        Ok(status) if status.success() => true,
        Ok(status) => {
            warn!(%program, %status, "alert hook exited with failure");
            false
        }
        Err(e) => {
            warn!(%program, error = %e, "alert hook could not be started");
            false
        }
    }
}
