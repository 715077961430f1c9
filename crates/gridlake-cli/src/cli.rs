//! CLI argument definitions for gridlake.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `run` | Extract a window into bronze, then rebuild the silver tables |
//! | `extract` | Extract a window into bronze only |
//! | `plan` | Print every request URL of a window without network access |
//! | `transform` | Rebuild silver tables from existing bronze files |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--config` | `config.yaml` | YAML configuration file |
//! | `--log-level` | config `logging.level` | Log filter when `RUST_LOG` is unset |
//! | `--pretty` | `false` | Pretty-print the JSON summary |
//!
//! # Examples
//!
//! ```bash
//! gridlake run --source elexon --start 2024-01-15 --end 2024-01-16
//! gridlake plan --source entsoe --start 2024-01-15 --end 2024-01-15 --query day_ahead_prices
//! gridlake transform --source elexon --query bid_offer_level_data --pretty
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Energy-market data extraction into bronze and silver layers.
#[derive(Debug, Parser)]
#[command(
    name = "gridlake",
    author,
    version,
    about = "Energy-market data extraction CLI",
    long_about = "gridlake extracts generation, price, load, outage and balancing-mechanism \
datasets from ENTSO-E and Elexon BMRS, stores the raw responses (bronze) and \
normalizes them into CSV tables with absolute UTC timestamps (silver).\n\
\n\
Use 'gridlake <command> --help' for command-specific help."
)]
pub struct Cli {
    /// YAML configuration file.
    #[arg(long, global = true, default_value = "config.yaml")]
    pub config: PathBuf,

    /// Log filter (e.g. `debug`, `gridlake_core=trace`); `RUST_LOG` wins when set.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract a date window and rebuild the affected silver tables.
    ///
    /// # Examples
    ///
    ///   gridlake run --source elexon --start 2024-01-15 --end 2024-01-16
    Run(WindowArgs),

    /// Extract a date window into the bronze layer only.
    Extract(WindowArgs),

    /// Print the requests a window would issue; credentials are redacted.
    Plan(WindowArgs),

    /// Rebuild silver tables from the bronze files already on disk.
    Transform(TransformArgs),
}

/// Source, inclusive date window and optional single-report filter.
#[derive(Debug, Args)]
pub struct WindowArgs {
    /// Configured source name (entsoe, elexon).
    #[arg(long)]
    pub source: String,

    /// First day of the window, YYYY-MM-DD.
    #[arg(long)]
    pub start: String,

    /// Last day of the window (inclusive), YYYY-MM-DD.
    #[arg(long)]
    pub end: String,

    /// Restrict the run to one configured report or query name.
    #[arg(long)]
    pub query: Option<String>,
}

#[derive(Debug, Args)]
pub struct TransformArgs {
    /// Configured source name (entsoe, elexon).
    #[arg(long)]
    pub source: String,

    /// Restrict the transform to one report or query name.
    #[arg(long)]
    pub query: Option<String>,
}
