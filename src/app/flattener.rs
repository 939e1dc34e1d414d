use crate::app::error::{ConfigurationError, RelocationError};
use crate::app::models::{FlattenConfig, RelocationPlan, RelocationSummary};
use crate::app::relocator::Relocator;
use crate::app::scanner::Scanner;
use std::fs;
use std::io::Write;

/// Owns a validated configuration. Construction checks the source and
/// prepares the destination; nothing else mutates state.
#[derive(Debug)]
pub struct Flattener {
    config: FlattenConfig,
}

impl Flattener {
    pub fn new(config: FlattenConfig) -> Result<Self, ConfigurationError> {
        if !config.source.is_dir() {
            return Err(ConfigurationError::MissingSource(config.source));
        }

        if !config.dry_run {
            prepare_destination(&config)?;
        }

        Ok(Self { config })
    }

    pub fn discover_files(&self) -> RelocationPlan {
        Scanner::new(&self.config).scan()
    }

    pub fn relocate<W: Write>(
        &self,
        plan: &RelocationPlan,
        out: &mut W,
    ) -> Result<RelocationSummary, RelocationError> {
        Relocator::new(&self.config).relocate(plan, out)
    }
}

fn prepare_destination(config: &FlattenConfig) -> Result<(), ConfigurationError> {
    let destination = &config.destination;

    if destination.is_dir() {
        let mut entries = fs::read_dir(destination)
            .map_err(|e| ConfigurationError::InspectDestination(destination.clone(), e))?;
        if entries.next().is_some() && !config.allows_populated_destination() {
            return Err(ConfigurationError::DestinationNotEmpty(destination.clone()));
        }
        return Ok(());
    }

    log::info!("Creating destination directory {}", destination.display());
    fs::create_dir_all(destination)
        .map_err(|e| ConfigurationError::CreateDestination(destination.clone(), e))
}
