use crate::app::cli::Cli;
use crate::app::errors::GenerateError;
use crate::app::models::{GlobalSettings, RcOverrides, RunConfig};
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

pub const RC_FILE_NAME: &str = ".aigrc";

fn default_settings_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home
        .join(".config")
        .join("auto_index_gen")
        .join("settings.toml"))
}

/// Reads global settings from `path`, or from the per-user default location.
/// A missing file yields the built-in defaults.
pub fn load_settings(path: Option<&Path>) -> Result<GlobalSettings> {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => default_settings_path()?,
    };

    if !config_path.exists() {
        return Ok(GlobalSettings::default());
    }

    let content = fs::read_to_string(&config_path)
        .context(format!("Failed to read settings at {:?}", config_path))?;

    let settings: GlobalSettings = toml::from_str(&content)
        .context(format!("Failed to parse settings at {:?}", config_path))?;

    Ok(settings)
}

/// Settings file first, then command-line overrides.
pub fn resolve_settings(cli: &Cli) -> Result<GlobalSettings> {
    let mut settings = load_settings(cli.config.as_deref())?;

    if let Some(eol) = cli.eol {
        settings.eol = eol;
    }
    if let Some(quotes) = cli.quotes {
        settings.quotes = quotes;
    }
    if cli.no_semicolon {
        settings.semicolon = false;
    }
    if let Some(indent) = cli.indent {
        settings.tab_length = indent;
    }
    if cli.no_open {
        settings.open = false;
    }

    Ok(settings)
}

/// The per-invocation layer, applied beneath every directory's inherited and
/// local configuration.
pub fn invocation_overrides(cli: &Cli) -> RcOverrides {
    fn flag(set: bool, value: bool) -> Option<bool> {
        set.then_some(value)
    }

    RcOverrides {
        index: cli.index.clone(),
        ignore: cli.ignore.clone(),
        keep: cli.keep.clone(),
        default_export: flag(cli.default, true),
        namespace: flag(cli.namespace, true),
        class: flag(cli.class, true),
        recursive: flag(cli.no_recursive, false),
        sub_dir: flag(cli.sub_dir, true),
        inherit: flag(cli.inherit, true),
    }
}

/// Concatenates two pattern lists, dropping repeats while keeping order.
pub fn merge_patterns(global: &[String], local: &[String]) -> Vec<String> {
    let mut combined: Vec<String> = global.iter().chain(local).cloned().collect();
    let mut seen = HashSet::new();
    combined.retain(|item| seen.insert(item.clone()));
    combined
}

/// Parses `<dir>/.aigrc` if present.
pub fn read_rc_file(dir: &Path) -> Result<Option<RcOverrides>, GenerateError> {
    let rc_path = dir.join(RC_FILE_NAME);
    if !rc_path.is_file() {
        return Ok(None);
    }

    let content = fs::read_to_string(&rc_path).map_err(|source| GenerateError::ConfigRead {
        path: rc_path.clone(),
        source,
    })?;

    let record = serde_json::from_str(&content)
        .map_err(|source| GenerateError::ConfigParse { path: rc_path, source })?;

    Ok(Some(record))
}

/// A directory's runcom together with the merged record it was built from.
#[derive(Debug, Clone)]
pub struct Resolved {
    pub runcom: RunConfig,
    pub record: RcOverrides,
}

/// Stacks the local `.aigrc` of `dir` over `base` (invocation options plus
/// whatever a parent handed down) and fills in the defaults.
pub fn resolve_runcom(dir: &Path, base: &RcOverrides) -> Result<Resolved, GenerateError> {
    let record = match read_rc_file(dir)? {
        Some(local) => base.overlay(&local),
        None => base.clone(),
    };

    let runcom = RunConfig::from_overrides(&record);
    log::debug!("Resolved configuration for {:?}: {:?}", dir, runcom);

    Ok(Resolved { runcom, record })
}
