use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Copy or move every file matching a pattern out of a directory tree into one flat directory"
)]
pub struct Cli {
    /// Regex searched for in each filename (e.g. '\.(avi|mp4)$')
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// The directory to scan through
    #[arg(short, long)]
    pub source: PathBuf,

    /// Destination directory, created if it doesn't exist [default: <SOURCE>-flattened]
    #[arg(short, long)]
    pub destination: Option<PathBuf>,

    /// Move instead of copy
    #[arg(short, long = "move")]
    pub move_files: bool,

    /// Keep bare filenames instead of prefixing them with their subdirectories
    #[arg(long)]
    pub simple_names: bool,

    /// Skip files already present in the destination directory, implies --force
    #[arg(long = "continue")]
    pub continue_existing: bool,

    /// Use the destination directory even if it exists and is non-empty
    #[arg(short, long)]
    pub force: bool,

    /// Don't touch the filesystem, just show what would be relocated
    #[arg(long)]
    pub dry_run: bool,

    /// Use a predefined set of options from presets.toml
    #[arg(long)]
    pub preset: Option<String>,
}
