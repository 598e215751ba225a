// Declare modules
pub mod cli;
pub mod config;
pub mod errors;
pub mod formatter;
pub mod generator;
pub mod models;
pub mod naming;
pub mod persist;
pub mod scanner;

use anyhow::{Context, Result};
use clap::Parser;
use pathdiff::diff_paths;
use std::fs;
use std::path::{Path, PathBuf};

use self::cli::Cli;
use self::config::{invocation_overrides, resolve_settings};
use self::errors::GenerateError;
use self::generator::compute;
use self::models::{GeneratedIndex, GlobalSettings, Mode, RcOverrides};
use self::persist::persist_tree;

/// The directory whose index is generated: `path` itself, or the directory
/// containing it when `path` is a file.
pub fn target_directory(path: &Path) -> Result<PathBuf, GenerateError> {
    let stats = fs::metadata(path).map_err(|source| GenerateError::Stat {
        path: path.to_path_buf(),
        source,
    })?;

    if stats.is_dir() {
        return Ok(path.to_path_buf());
    }

    match path.parent() {
        Some(parent) if parent.as_os_str().is_empty() => Ok(PathBuf::from(".")),
        Some(parent) => Ok(parent.to_path_buf()),
        None => Err(GenerateError::PathExtraction(path.to_path_buf())),
    }
}

/// Computes the index tree rooted at `path` and writes every file in it.
pub fn generate(
    mode: Mode,
    path: &Path,
    settings: &GlobalSettings,
    invocation: &RcOverrides,
) -> Result<GeneratedIndex, GenerateError> {
    let dir = target_directory(path)?;
    let index = compute(mode, &dir, settings, invocation)?;

    for written in persist_tree(&index)? {
        let shown = diff_paths(&written, &dir).unwrap_or_else(|| written.clone());
        log::info!("Wrote {}", shown.display());
    }

    Ok(index)
}

/// Initializes components and orchestrates data flow.
pub fn run() -> Result<()> {
    // 1. Parse Args
    let args = Cli::parse();

    // 2. Resolve Configuration
    let settings = resolve_settings(&args)?;
    let invocation = invocation_overrides(&args);

    // 3. Dry run: show everything, touch nothing
    if args.dry_run {
        let dir = target_directory(&args.path)?;
        let index = compute(args.mode, &dir, &settings, &invocation)
            .context("Failed to generate index")?;
        for node in index.post_order() {
            println!("// {}", node.target_file.display());
            print!("{}", node.content);
        }
        return Ok(());
    }

    // 4. Generate and write
    let index = generate(args.mode, &args.path, &settings, &invocation)
        .context("Failed to generate index")?;

    // 5. Show the root index
    if settings.open {
        print!("{}", index.content);
    }

    Ok(())
}
