//! Breaks down the files under a directory by extension.

use anyhow::{bail, Result};
use clap::Parser;
use ignore::WalkBuilder;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about = "Give a breakdown of files by extension")]
struct Cli {
    /// The directory to scan through
    #[arg(short, long)]
    root: PathBuf,

    /// List every file under its extension before the summary
    #[arg(short, long)]
    verbose: bool,
}

/// Extension (with its leading dot, possibly empty) to filenames.
type Census = BTreeMap<String, Vec<String>>;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    if !cli.root.is_dir() {
        bail!("Root directory {} doesn't exist", cli.root.display());
    }

    let census = collect(&cli.root);
    if census.is_empty() {
        log::warn!("No files found under {}", cli.root.display());
        return Ok(());
    }

    if cli.verbose {
        println!("{}", render_listing(&census));
    }
    println!("{}", render_summary(&census));

    Ok(())
}

fn collect(root: &Path) -> Census {
    let mut census = Census::new();

    for result in WalkBuilder::new(root).standard_filters(false).build() {
        match result {
            Ok(entry) => {
                if !entry.path().is_file() {
                    continue;
                }
                let name = entry.file_name().to_string_lossy().into_owned();
                census.entry(extension_of(&name)).or_default().push(name);
            }
            Err(err) => log::warn!("Error walking entry: {}", err),
        }
    }

    for files in census.values_mut() {
        files.sort();
    }
    census
}

/// `a.tar.gz` -> `.gz`, `.bashrc` -> ``, `..foo` -> ``, `notes.` -> `.`
///
/// Leading dots never start an extension.
fn extension_of(name: &str) -> String {
    let stem_start = name.len() - name.trim_start_matches('.').len();
    match name[stem_start..].rfind('.') {
        Some(dot) => name[stem_start + dot..].to_string(),
        None => String::new(),
    }
}

fn render_listing(census: &Census) -> String {
    let mut out = Vec::new();
    for (extension, files) in census {
        out.push(format!("{} files:", extension));
        out.extend(files.iter().map(|f| format!("  {}", f)));
    }
    out.join("\n")
}

fn render_summary(census: &Census) -> String {
    let count_width = census
        .values()
        .map(Vec::len)
        .max()
        .unwrap_or_default()
        .to_string()
        .len();
    let extension_width = census.keys().map(|e| e.chars().count()).max().unwrap_or_default();

    let mut rows: Vec<(&String, usize)> = census.iter().map(|(e, f)| (e, f.len())).collect();
    // Stable sort keeps extensions in ascending order within a count
    rows.sort_by(|a, b| b.1.cmp(&a.1));

    rows.iter()
        .map(|(extension, count)| {
            format!(
                "{:>cw$} {:>ew$} files",
                count,
                extension,
                cw = count_width,
                ew = extension_width
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
