use crate::app::cli::Cli;
use crate::app::error::ConfigurationError;
use crate::app::models::{FlattenConfig, TransferMode};
use anyhow::{bail, Context, Result};
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

#[derive(Deserialize, Debug)]
struct PresetsFile {
    #[serde(flatten)]
    presets: HashMap<String, PresetConfig>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct PresetConfig {
    pub pattern: Option<String>,
    pub destination: Option<PathBuf>,
    #[serde(rename = "move")]
    pub move_files: bool,
    pub simple_names: bool,
    pub force: bool,
    pub dry_run: bool,
    #[serde(rename = "continue")]
    pub continue_existing: bool,
}

fn presets_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("flatten").join("presets.toml"))
}

pub fn load_presets_file(config_path: &Path) -> Result<HashMap<String, PresetConfig>> {
    if !config_path.exists() {
        return Ok(HashMap::new());
    }

    let content = fs::read_to_string(config_path)
        .context(format!("Failed to read config at {:?}", config_path))?;

    let parsed: PresetsFile = toml::from_str(&content).context("Failed to parse presets.toml")?;

    Ok(parsed.presets)
}

/// Builds the configuration from CLI args, pulling in the named preset if any.
pub fn resolve_config(cli: Cli, working_dir: &Path) -> Result<FlattenConfig> {
    let presets = match cli.preset {
        Some(_) => load_presets_file(&presets_path()?)?,
        None => HashMap::new(),
    };
    resolve_with_presets(cli, working_dir, &presets)
}

pub fn resolve_with_presets(
    cli: Cli,
    working_dir: &Path,
    presets: &HashMap<String, PresetConfig>,
) -> Result<FlattenConfig> {
    let preset = match cli.preset.as_deref() {
        Some(name) => match presets.get(name) {
            Some(preset) => preset.clone(),
            None => bail!("Unknown preset '{}'", name),
        },
        None => PresetConfig::default(),
    };

    // CLI values win over the preset
    let pattern = cli
        .pattern
        .or(preset.pattern)
        .ok_or(ConfigurationError::MissingPattern)?;
    let pattern = Regex::new(&pattern).map_err(ConfigurationError::from)?;

    let source = normalize(&working_dir.join(&cli.source));
    let destination = match cli.destination.or(preset.destination) {
        Some(destination) => normalize(&working_dir.join(destination)),
        None => default_destination(&source),
    };

    let config = FlattenConfig {
        pattern,
        source,
        destination,
        mode: TransferMode::from_flag(cli.move_files || preset.move_files),
        simple_names: cli.simple_names || preset.simple_names,
        force: cli.force || preset.force,
        dry_run: cli.dry_run || preset.dry_run,
        continue_existing: cli.continue_existing || preset.continue_existing,
    };
    log::debug!("Resolved configuration: {:?}", config);

    Ok(config)
}

/// `<source>-flattened`, next to the source directory.
fn default_destination(source: &Path) -> PathBuf {
    let name = source
        .file_name()
        .map(|n| format!("{}-flattened", n.to_string_lossy()))
        .unwrap_or_else(|| "flattened".to_string());
    match source.parent() {
        Some(parent) => parent.join(name),
        None => PathBuf::from(name),
    }
}

/// Resolves `.` and `..` lexically, without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
