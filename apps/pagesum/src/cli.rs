//! Command line interface definition

use clap::{Parser, Subcommand};
use pagesum_types::ColorChoice;
use std::path::PathBuf;

/// pagesum - fetch a set of documentation pages concurrently and sum their sizes
#[derive(Parser)]
#[command(name = "pagesum")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Concurrently fetch a set of pages and report their sizes")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Global arguments available for all commands
#[derive(Parser)]
pub struct GlobalArgs {
    /// Output events as JSON lines
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging to the log directory
    #[arg(long, global = true)]
    pub debug: bool,

    /// Color output control
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorChoice>,

    /// Use alternate config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Fetch every URL once (or several times in a row) and print the report
    Run {
        /// Number of sequential batches to run
        #[arg(long, default_value_t = 1)]
        repeat: u32,
    },

    /// Interactive mode: press Enter to start a batch, q to quit
    Watch,

    /// List the URLs a batch fetches
    #[command(alias = "ls")]
    Urls,
}
