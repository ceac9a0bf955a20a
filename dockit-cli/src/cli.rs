//! CLI argument parsing types using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// `DockIt` command-line interface for inspecting saved layout files
#[derive(Parser)]
#[command(name = "dockit-cli")]
#[command(author, version, about = "DockIt layout file inspector")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Print a layout file as a tree
    #[command(about = "Print the layout tree stored in a file")]
    Show {
        /// Path to the layout JSON file
        file: PathBuf,
    },

    /// Check a layout file for structural problems
    #[command(about = "Validate a layout file and list any problems found")]
    Validate {
        /// Path to the layout JSON file
        file: PathBuf,

        /// Known widget kinds (comma-separated); any other kind is
        /// flagged as unknown
        #[arg(short, long, value_delimiter = ',')]
        kinds: Option<Vec<String>>,
    },

    /// Show summary statistics for a layout file
    #[command(about = "Show widget, area, depth and kind statistics")]
    Stats {
        /// Path to the layout JSON file
        file: PathBuf,
    },
}
