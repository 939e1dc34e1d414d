use regex::Regex;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Represents the final configuration after merging presets and CLI args.
#[derive(Debug, Clone)]
pub struct FlattenConfig {
    pub pattern: Regex,
    /// Absolute path of the tree to scan.
    pub source: PathBuf,
    /// Absolute path of the flat output directory.
    pub destination: PathBuf,
    pub mode: TransferMode,
    pub simple_names: bool,
    pub force: bool,
    pub dry_run: bool,
    pub continue_existing: bool,
}

impl FlattenConfig {
    /// `--continue` is treated as an implicit `--force`.
    pub fn allows_populated_destination(&self) -> bool {
        self.force || self.continue_existing
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferMode {
    Copy,
    Move,
}

impl TransferMode {
    pub fn from_flag(move_files: bool) -> Self {
        if move_files {
            TransferMode::Move
        } else {
            TransferMode::Copy
        }
    }

    pub fn verb(self) -> &'static str {
        match self {
            TransferMode::Copy => "Copying",
            TransferMode::Move => "Moving",
        }
    }
}

/// Source file to destination file, ordered by source path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelocationPlan {
    entries: BTreeMap<PathBuf, PathBuf>,
}

impl RelocationPlan {
    pub fn insert(&mut self, source: PathBuf, destination: PathBuf) {
        self.entries.insert(source, destination);
    }

    #[cfg(test)]
    pub fn get(&self, source: &Path) -> Option<&Path> {
        self.entries.get(source).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Path, &Path)> {
        self.entries
            .iter()
            .map(|(source, destination)| (source.as_path(), destination.as_path()))
    }
}

/// What happened to a single plan entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    DryRun,
    Ok,
    Skipped,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RelocationSummary {
    pub relocated: usize,
    pub skipped: usize,
    pub previewed: usize,
}

impl RelocationSummary {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::DryRun => self.previewed += 1,
            Outcome::Ok => self.relocated += 1,
            Outcome::Skipped => self.skipped += 1,
        }
    }
}
