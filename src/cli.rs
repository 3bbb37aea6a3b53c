//! Command-line arguments.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// Smart home energy-management simulator.
///
/// If no --scenario or --preset is given, the baseline preset is used.
#[derive(Debug, Parser)]
#[command(name = "home-ems", version)]
pub struct Cli {
    /// Load scenario from TOML config file
    #[arg(long, value_name = "PATH", conflicts_with = "preset")]
    pub scenario: Option<PathBuf>,

    /// Use a built-in preset (baseline, price_spike, tight_budget)
    #[arg(long, value_name = "NAME")]
    pub preset: Option<String>,

    /// Override random seed
    #[arg(long, value_name = "U64")]
    pub seed: Option<u64>,

    /// Export step results to CSV
    #[arg(long, value_name = "PATH")]
    pub telemetry_out: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Start REST API server after the run
    #[cfg(feature = "api")]
    #[arg(long)]
    pub serve: bool,

    /// API server port
    #[cfg(feature = "api")]
    #[arg(long, default_value_t = 3000)]
    pub port: u16,
}

impl Cli {
    /// Preset to load when no scenario file is given.
    pub fn preset_or_default(&self) -> &str {
        self.preset.as_deref().unwrap_or("baseline")
    }

    /// Default log filter for the chosen verbosity; `RUST_LOG` wins if set.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}
