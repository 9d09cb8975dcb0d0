use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "tune-duper")]
#[command(about = "Find probably-duplicate audio files by name", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Serve the HTTP API and operator page
    Serve,
    /// Scan a directory for similar audio filenames
    Scan {
        /// Directory to scan
        directory: PathBuf,
        /// Ignore the cached result and rescan
        #[arg(long)]
        no_cache: bool,
        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete files by path
    Delete {
        #[arg(required = true)]
        files: Vec<String>,
    },
    /// Print configuration values
    PrintConfig,
    /// Remove the cached scan result
    ClearCache,
}
