use std::path::PathBuf;

use clap::Subcommand;
use focus_assistant_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show {
        /// Print JSON instead
        #[arg(long)]
        json: bool,
    },
    /// Get a config value
    Get {
        /// Dot-separated key (e.g. "thresholds.warning_s")
        key: String,
    },
    /// Write the default configuration
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the config file location
    Path,
}

fn resolve_path(explicit: Option<&PathBuf>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    match explicit {
        Some(path) => Ok(path.clone()),
        None => Ok(Config::path()?),
    }
}

fn load(explicit: Option<&PathBuf>) -> Result<Config, Box<dyn std::error::Error>> {
    match explicit {
        Some(path) => Ok(Config::load_from(path)?),
        None => Ok(Config::load()?),
    }
}

pub fn run(
    action: ConfigAction,
    config_path: Option<&PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show { json } => {
            let config = load(config_path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                print!("{}", toml::to_string_pretty(&config)?);
            }
        }
        ConfigAction::Get { key } => {
            let config = load(config_path)?;
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => return Err(format!("unknown key: {key}").into()),
            }
        }
        ConfigAction::Init { force } => {
            let path = resolve_path(config_path)?;
            if path.exists() && !force {
                return Err(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                )
                .into());
            }
            Config::default().save_to(&path)?;
            println!("wrote {}", path.display());
        }
        ConfigAction::Path => {
            println!("{}", resolve_path(config_path)?.display());
        }
    }
    Ok(())
}
