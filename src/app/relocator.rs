use crate::app::error::RelocationError;
use crate::app::formatter::OutputGenerator;
use crate::app::models::{FlattenConfig, Outcome, RelocationPlan, RelocationSummary, TransferMode};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

pub struct Relocator {
    mode: TransferMode,
    dry_run: bool,
    continue_existing: bool,
}

impl Relocator {
    pub fn new(config: &FlattenConfig) -> Self {
        Self {
            mode: config.mode,
            dry_run: config.dry_run,
            continue_existing: config.continue_existing,
        }
    }

    /// Executes the plan in order, writing one status line per entry.
    /// Stops at the first failed transfer; earlier entries stay relocated.
    pub fn relocate<W: Write>(
        &self,
        plan: &RelocationPlan,
        out: &mut W,
    ) -> Result<RelocationSummary, RelocationError> {
        let mut summary = RelocationSummary::default();
        report(out, &OutputGenerator::banner(self.mode, self.dry_run, plan.len()))?;

        for (source, destination) in plan.iter() {
            let outcome = self.relocate_one(source, destination)?;
            let line = match outcome {
                Outcome::Skipped => OutputGenerator::skipped_line(source),
                _ => OutputGenerator::transfer_line(source, destination, outcome),
            };
            report(out, &line)?;
            summary.record(outcome);
        }

        Ok(summary)
    }

    fn relocate_one(&self, source: &Path, destination: &Path) -> Result<Outcome, RelocationError> {
        if self.continue_existing && destination.exists() {
            log::debug!("Skipping {}, destination exists", source.display());
            return Ok(Outcome::Skipped);
        }
        if self.dry_run {
            return Ok(Outcome::DryRun);
        }

        let result = ensure_distinct(source, destination).and_then(|()| match self.mode {
            TransferMode::Copy => fs::copy(source, destination).map(|_| ()),
            TransferMode::Move => move_file(source, destination),
        });
        result.map_err(|cause| RelocationError::Transfer {
            source_path: source.to_path_buf(),
            destination: destination.to_path_buf(),
            cause,
        })?;

        Ok(Outcome::Ok)
    }
}

/// Copying a file onto itself truncates it, so refuse up front.
fn ensure_distinct(source: &Path, destination: &Path) -> io::Result<()> {
    if !destination.exists() {
        return Ok(());
    }
    if fs::canonicalize(source)? == fs::canonicalize(destination)? {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "source and destination are the same file",
        ));
    }
    Ok(())
}

/// Rename when possible, otherwise copy then remove (e.g. across filesystems).
fn move_file(source: &Path, destination: &Path) -> io::Result<()> {
    match fs::rename(source, destination) {
        Ok(()) => Ok(()),
        Err(err) => {
            log::debug!("rename of {} failed ({}), copying instead", source.display(), err);
            fs::copy(source, destination)?;
            fs::remove_file(source)
        }
    }
}

fn report<W: Write>(out: &mut W, line: &str) -> Result<(), RelocationError> {
    writeln!(out, "{}", line)
        .and_then(|_| out.flush())
        .map_err(RelocationError::Report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;
    use std::path::PathBuf;
    use tempfile::TempDir;

    struct Fixture {
        dir: TempDir,
        plan: RelocationPlan,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let root = dir.path();
            fs::create_dir_all(root.join("src/a")).unwrap();
            fs::create_dir_all(root.join("src/b")).unwrap();
            fs::create_dir_all(root.join("dest")).unwrap();
            fs::write(root.join("src/a/x.mp4"), "from a").unwrap();
            fs::write(root.join("src/b/x.mp4"), "from b").unwrap();

            let mut plan = RelocationPlan::default();
            plan.insert(root.join("src/a/x.mp4"), root.join("dest/a_x.mp4"));
            plan.insert(root.join("src/b/x.mp4"), root.join("dest/b_x.mp4"));
            Self { dir, plan }
        }

        fn path(&self, relative: &str) -> PathBuf {
            self.dir.path().join(relative)
        }

        fn relocator(&self, mode: TransferMode, dry_run: bool, continue_existing: bool) -> Relocator {
            Relocator::new(&FlattenConfig {
                pattern: Regex::new("mp4").unwrap(),
                source: self.path("src"),
                destination: self.path("dest"),
                mode,
                simple_names: false,
                force: false,
                dry_run,
                continue_existing,
            })
        }
    }

    #[test]
    fn copies_every_entry() {
        let fixture = Fixture::new();
        let mut out = Vec::new();

        let summary = fixture
            .relocator(TransferMode::Copy, false, false)
            .relocate(&fixture.plan, &mut out)
            .unwrap();

        assert_eq!(summary.relocated, 2);
        assert_eq!(fs::read_to_string(fixture.path("dest/a_x.mp4")).unwrap(), "from a");
        assert_eq!(fs::read_to_string(fixture.path("dest/b_x.mp4")).unwrap(), "from b");
        assert!(fixture.path("src/a/x.mp4").exists());

        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("Copying 2 files"));
        assert_eq!(out.lines().filter(|l| l.contains("OK")).count(), 2);
    }

    #[test]
    fn move_removes_sources() {
        let fixture = Fixture::new();
        let mut out = Vec::new();

        fixture
            .relocator(TransferMode::Move, false, false)
            .relocate(&fixture.plan, &mut out)
            .unwrap();

        assert!(!fixture.path("src/a/x.mp4").exists());
        assert!(!fixture.path("src/b/x.mp4").exists());
        assert_eq!(fs::read_to_string(fixture.path("dest/b_x.mp4")).unwrap(), "from b");
    }

    #[test]
    fn dry_run_touches_nothing() {
        let fixture = Fixture::new();
        let mut out = Vec::new();

        let summary = fixture
            .relocator(TransferMode::Move, true, false)
            .relocate(&fixture.plan, &mut out)
            .unwrap();

        assert_eq!(summary.previewed, 2);
        assert_eq!(summary.relocated, 0);
        assert!(fixture.path("src/a/x.mp4").exists());
        assert_eq!(fs::read_dir(fixture.path("dest")).unwrap().count(), 0);

        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("Starting dry run..."));
        assert_eq!(out.lines().filter(|l| l.contains("DRY_RUN")).count(), 2);
    }

    #[test]
    fn continue_skips_existing_destinations() {
        let fixture = Fixture::new();
        fs::write(fixture.path("dest/a_x.mp4"), "already here").unwrap();
        let mut out = Vec::new();

        let summary = fixture
            .relocator(TransferMode::Copy, false, true)
            .relocate(&fixture.plan, &mut out)
            .unwrap();

        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.relocated, 1);
        assert_eq!(fs::read_to_string(fixture.path("dest/a_x.mp4")).unwrap(), "already here");
        assert_eq!(fs::read_to_string(fixture.path("dest/b_x.mp4")).unwrap(), "from b");
        assert!(String::from_utf8(out).unwrap().contains("SKIPPED"));
    }

    #[test]
    fn simple_name_collision_overwrites() {
        let fixture = Fixture::new();
        let mut plan = RelocationPlan::default();
        plan.insert(fixture.path("src/a/x.mp4"), fixture.path("dest/x.mp4"));
        plan.insert(fixture.path("src/b/x.mp4"), fixture.path("dest/x.mp4"));

        fixture
            .relocator(TransferMode::Copy, false, false)
            .relocate(&plan, &mut Vec::new())
            .unwrap();

        let survivor = fs::read_to_string(fixture.path("dest/x.mp4")).unwrap();
        assert!(survivor == "from a" || survivor == "from b");
        assert_eq!(fs::read_dir(fixture.path("dest")).unwrap().count(), 1);
    }

    #[test]
    fn relocating_a_file_onto_itself_fails_without_truncating() {
        let fixture = Fixture::new();
        let mut plan = RelocationPlan::default();
        plan.insert(fixture.path("src/a/x.mp4"), fixture.path("src/a/x.mp4"));

        for mode in [TransferMode::Copy, TransferMode::Move] {
            let err = fixture
                .relocator(mode, false, false)
                .relocate(&plan, &mut Vec::new())
                .unwrap_err();

            assert!(matches!(err, RelocationError::Transfer { .. }));
            assert_eq!(fs::read_to_string(fixture.path("src/a/x.mp4")).unwrap(), "from a");
        }
    }

    #[test]
    fn failed_transfer_stops_the_run() {
        let fixture = Fixture::new();
        let mut plan = RelocationPlan::default();
        plan.insert(fixture.path("src/a/missing.mp4"), fixture.path("dest/a_missing.mp4"));
        plan.insert(fixture.path("src/b/x.mp4"), fixture.path("dest/b_x.mp4"));

        let err = fixture
            .relocator(TransferMode::Copy, false, false)
            .relocate(&plan, &mut Vec::new())
            .unwrap_err();

        match err {
            RelocationError::Transfer { source_path, .. } => {
                assert_eq!(source_path, fixture.path("src/a/missing.mp4"))
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!fixture.path("dest/b_x.mp4").exists());
    }
}
