use std::path::PathBuf;

use clap::Args;
use focus_assistant_core::{Config, SessionStats};

#[derive(Args)]
pub struct StatsArgs {
    /// Telemetry log to summarize (stdin when omitted)
    file: Option<PathBuf>,
    /// Seconds each telemetry row stands for [default: the configured tick delay]
    #[arg(long)]
    tick_secs: Option<f64>,
}

pub fn run(args: StatsArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let tick_secs = args
        .tick_secs
        .unwrap_or_else(|| f64::from(config.tick_delay_ms) / 1000.0);
    if !(tick_secs.is_finite() && tick_secs > 0.0) {
        return Err(format!("--tick-secs must be positive, got {tick_secs}").into());
    }
    let input = super::open_input(args.file.as_deref())?;
    let stats = SessionStats::from_reader(input)?;
    if stats.skipped_lines() > 0 {
        tracing::warn!(skipped = stats.skipped_lines(), "ignored lines without a status label");
    }
    println!("{}", serde_json::to_string_pretty(&stats.summary(tick_secs))?);
    Ok(())
}
