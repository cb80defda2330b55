use std::path::PathBuf;

use clap::{Parser, Subcommand};
use focus_assistant_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "focus-assistant", version, about = "Focus Assistant CLI")]
struct Cli {
    /// Read configuration from this file instead of the data directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the monitor against a stream of distance samples
    Run(commands::run::RunArgs),
    /// Replay a presence scenario deterministically
    Simulate(commands::simulate::SimulateArgs),
    /// Summarize a telemetry log
    Stats(commands::stats::StatsArgs),
    /// Timestamp telemetry lines and relay distraction alerts
    Relay(commands::relay::RelayArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<Config, Box<dyn std::error::Error>> {
    let config = match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    Ok(config)
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let config_path = cli.config.as_ref();

    let result = match cli.command {
        Commands::Run(args) => {
            load_config(config_path).and_then(|config| commands::run::run(args, &config))
        }
        Commands::Simulate(args) => {
            load_config(config_path).and_then(|config| commands::simulate::run(args, &config))
        }
        Commands::Stats(args) => {
            load_config(config_path).and_then(|config| commands::stats::run(args, &config))
        }
        Commands::Relay(args) => {
            load_config(config_path).and_then(|config| commands::relay::run(args, &config))
        }
        Commands::Config { action } => commands::config::run(action, config_path),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
