//! `DockIt` CLI - inspection tool for saved dock layout files
//!
//! Provides commands for pretty-printing a layout tree, validating a
//! layout file for structural problems, and summarizing its contents.

mod cli;
mod commands;
mod error;
mod util;

use clap::Parser;
use cli::Cli;
use dockit_core::trace::{TraceLevel, init_tracing};

fn main() {
    let cli = Cli::parse();

    if cli.verbose > 0 && !cli.quiet {
        let level = match cli.verbose {
            1 => TraceLevel::Info,
            2 => TraceLevel::Debug,
            _ => TraceLevel::Trace,
        };
        if let Err(e) = init_tracing(level) {
            eprintln!("Warning: failed to initialize tracing: {e}");
        }
    }

    let result = commands::dispatch(cli.command);

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(e.exit_code());
    }
}
