use crate::app::models::{FlattenConfig, RelocationPlan};
use ignore::WalkBuilder;
use pathdiff::diff_paths;
use regex::Regex;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub struct Scanner<'a> {
    source: &'a Path,
    destination: &'a Path,
    pattern: &'a Regex,
    simple_names: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(config: &'a FlattenConfig) -> Self {
        Self {
            source: &config.source,
            destination: &config.destination,
            pattern: &config.pattern,
            simple_names: config.simple_names,
        }
    }

    /// Walks the source tree and maps every matching file to its flattened
    /// destination. Read-only.
    pub fn scan(&self) -> RelocationPlan {
        let mut plan = RelocationPlan::default();

        // Every file counts: hidden ones included, ignore files not honoured
        let destination = self.destination.to_path_buf();
        let walker = WalkBuilder::new(self.source)
            .standard_filters(false)
            .filter_entry(move |entry| entry.path() != destination)
            .build();

        for result in walker {
            match result {
                Ok(entry) => {
                    if !entry.path().is_file() {
                        continue;
                    }
                    if let Some(target) = self.process_entry(entry.path()) {
                        plan.insert(entry.path().to_path_buf(), target);
                    }
                }
                Err(err) => log::warn!("Error walking entry: {}", err),
            }
        }

        log::info!("Planned {} file(s) from {}", plan.len(), self.source.display());
        plan
    }

    fn process_entry(&self, path: &Path) -> Option<PathBuf> {
        let file_name = path.file_name()?;

        // Unanchored: a match anywhere in the name is enough
        if !self.pattern.is_match(&file_name.to_string_lossy()) {
            return None;
        }

        let flattened = if self.simple_names {
            file_name.to_os_string()
        } else {
            let parent = path.parent()?;
            let relative = diff_paths(parent, self.source)?;
            flattened_name(&relative, file_name)
        };

        let target = self.destination.join(flattened);
        log::debug!("{} -> {}", path.display(), target.display());
        Some(target)
    }
}

/// `a/b` + `x.mp4` gives `a_b_x.mp4`; an empty directory gives `x.mp4`.
fn flattened_name(relative_dir: &Path, file_name: &std::ffi::OsStr) -> OsString {
    let mut name = OsString::new();
    for component in relative_dir.components() {
        name.push(component.as_os_str());
        name.push("_");
    }
    name.push(file_name);
    name
}
