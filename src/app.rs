// Declare modules
pub mod cli;
pub mod config;
pub mod error;
pub mod flattener;
pub mod formatter;
pub mod models;
pub mod relocator;
pub mod scanner;

use anyhow::{Context, Result};
use clap::Parser;
use std::env;
use std::io;

use self::cli::Cli;
use self::config::resolve_config;
use self::error::ConfigurationError;
use self::flattener::Flattener;

/// Initializes components and orchestrates data flow.
pub fn run() -> Result<()> {
    // 1. Parse Args
    let args = Cli::parse();

    // 2. Capture the working directory once; everything else is relative to it
    let current_dir = env::current_dir().map_err(ConfigurationError::WorkingDirectory)?;

    // 3. Resolve Configuration
    let config = resolve_config(args, &current_dir)?;

    // 4. Validate source, prepare destination
    let flattener = Flattener::new(config)?;

    // 5. Plan
    let plan = flattener.discover_files();
    if plan.is_empty() {
        log::warn!("No files matched the pattern.");
    }

    // 6. Execute
    let stdout = io::stdout();
    let summary = flattener
        .relocate(&plan, &mut stdout.lock())
        .context("Relocation aborted")?;

    log::info!(
        "Done: {} relocated, {} skipped, {} previewed",
        summary.relocated,
        summary.skipped,
        summary.previewed
    );

    Ok(())
}
