use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use chrono::{Local, Utc};
use clap::Args;
use focus_assistant_core::{AlertHooks, AttentionState, Config, DistractionRelay};

#[derive(Args)]
pub struct RelayArgs {
    /// Telemetry stream to relay (stdin when omitted)
    file: Option<PathBuf>,
}

pub fn run(args: RelayArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let input = super::open_input(args.file.as_deref())?;
    let mut relay = DistractionRelay::new(config.relay.min_gap_s);
    let hooks = AlertHooks::from_config(&config.relay);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for line in input.lines() {
        let line = line?;
        let label = line.trim();
        if label.is_empty() {
            continue;
        }
        let stamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        writeln!(out, "{stamp},{label}")?;
        out.flush()?;

        match label.parse::<AttentionState>() {
            Ok(state) => {
                if let Some(alert) = relay.observe(state, Utc::now()) {
                    eprintln!("[{stamp}] {}", alert.message);
                    hooks.fire(&alert);
                }
            }
            Err(e) => tracing::debug!(error = %e, "not a status label"),
        }
    }
    Ok(())
}
