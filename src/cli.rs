//! Command line interface for Desk Lamp

use clap::Parser;
use std::fmt;
use std::path::Path;

use crate::config::LampConfig;
use crate::lighting::OperatingMode;

/// CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// Configuration file could not be loaded
    ConfigLoad(String),
    /// Mode label names neither operating mode
    InvalidMode(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::ConfigLoad(msg) => write!(f, "Failed to load configuration: {msg}"),
            CliError::InvalidMode(msg) => write!(f, "Invalid mode: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Desk Lamp - interactive lamp with RGB and incandescent bulb modes
#[derive(Parser, Debug, Default)]
#[command(
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")"),
    about,
    long_about = None
)]
pub struct Args {
    /// Path to configuration file (TOML format)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<String>,

    /// Initial operating mode (rgb or incandescent)
    #[arg(short, long, value_name = "MODE")]
    pub mode: Option<String>,

    /// Asset path of the lamp model (overrides config file)
    #[arg(long, value_name = "PATH")]
    pub model: Option<String>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,
}

/// Loads configuration from file or defaults, then applies command-line overrides
///
/// An explicitly named config file must load; the user config file falls back
/// to defaults.
pub fn load_and_apply_config(args: &Args) -> Result<LampConfig, CliError> {
    let mut config = if let Some(config_path) = &args.config {
        println!("Loading configuration from: {config_path}");
        let path = Path::new(config_path);
        if !path.is_file() {
            return Err(CliError::ConfigLoad(format!("{config_path} does not exist")));
        }
        LampConfig::load(Some(path)).map_err(|err| CliError::ConfigLoad(err.to_string()))?
    } else {
        LampConfig::load_from_user_config()
    };

    if let Some(mode) = &args.mode {
        let mode = mode
            .parse::<OperatingMode>()
            .map_err(|err| CliError::InvalidMode(err.to_string()))?;
        println!("Starting in mode: {mode}");
        config.lighting.initial_mode = mode;
    }

    if let Some(model) = &args.model {
        println!("Overriding lamp model to: {model}");
        config.model.asset_path = model.clone();
    }

    Ok(config)
}
