//! CLI interface for crypto-movers
//!
//! Provides subcommands for:
//! - `serve`: Run the dashboard HTTP server
//! - `snapshot`: Render the dashboard once to a file or stdout
//! - `config`: Show the effective configuration

mod serve;
mod snapshot;

pub use serve::ServeArgs;
pub use snapshot::SnapshotArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "crypto-movers")]
#[command(about = "Dashboard of the top hourly, daily and weekly crypto gainers and losers")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the dashboard HTTP server
    Serve(ServeArgs),
    /// Fetch once and write the rendered dashboard
    Snapshot(SnapshotArgs),
    /// Show the effective configuration
    Config,
}
