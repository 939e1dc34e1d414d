use crate::app::models::{Outcome, TransferMode};
use colored::Colorize;
use std::path::Path;

pub struct OutputGenerator;

impl OutputGenerator {
    pub fn banner(mode: TransferMode, dry_run: bool, count: usize) -> String {
        if dry_run {
            "Starting dry run...".to_string()
        } else {
            format!("{} {} files", mode.verb(), count)
        }
    }

    pub fn transfer_line(source: &Path, destination: &Path, outcome: Outcome) -> String {
        format!(
            "{} -> {} {}",
            source.display(),
            destination.display(),
            Self::status_tag(outcome)
        )
    }

    pub fn skipped_line(source: &Path) -> String {
        format!(
            "{} already exists in the destination directory {}",
            source.display(),
            Self::status_tag(Outcome::Skipped)
        )
    }

    pub fn status_tag(outcome: Outcome) -> String {
        let label = match outcome {
            Outcome::DryRun => "DRY_RUN".yellow(),
            Outcome::Ok => "OK".green(),
            Outcome::Skipped => "SKIPPED".yellow(),
        };
        format!("[{}]", label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_carry_paths_and_tags() {
        colored::control::set_override(false);

        assert_eq!(
            OutputGenerator::transfer_line(Path::new("/s/a/x.mp4"), Path::new("/d/a_x.mp4"), Outcome::Ok),
            "/s/a/x.mp4 -> /d/a_x.mp4 [OK]"
        );
        assert_eq!(
            OutputGenerator::skipped_line(Path::new("/s/b/x.mp4")),
            "/s/b/x.mp4 already exists in the destination directory [SKIPPED]"
        );
        assert_eq!(OutputGenerator::status_tag(Outcome::DryRun), "[DRY_RUN]");
    }

    #[test]
    fn banner_names_the_operation() {
        assert_eq!(OutputGenerator::banner(TransferMode::Move, false, 3), "Moving 3 files");
        assert_eq!(OutputGenerator::banner(TransferMode::Copy, false, 1), "Copying 1 files");
        assert_eq!(OutputGenerator::banner(TransferMode::Move, true, 3), "Starting dry run...");
    }
}
