//! Workspace file command handlers.

use super::{OutputTarget, open_workspace, write_output};
use crate::config::AppConfig;
use anyhow::{Context, Result};
use std::path::Path;

/// Print the visible files below the data directory as JSON.
pub fn run_files_list(config: &AppConfig) -> Result<()> {
    let files = open_workspace(config).list_files()?;
    let mut text = serde_json::to_vec_pretty(&files).context("failed to render file list")?;
    text.push(b'\n');
    write_output(&text, &OutputTarget::Stdout, true)
}

/// Remove one file, given relative to the data directory.
pub fn run_files_rm(relative: &str, config: &AppConfig, quiet: bool) -> Result<()> {
    open_workspace(config).remove_file(relative)?;
    if !quiet {
        eprintln!("Removed {relative}");
    }
    Ok(())
}

/// Copy a local file into the data directory, optionally below `folder`.
pub fn run_files_put(
    file: &Path,
    folder: Option<&str>,
    config: &AppConfig,
    quiet: bool,
) -> Result<()> {
    let filename = file
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("{} has no usable file name", file.display()))?;
    let bytes =
        std::fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;

    let stored = open_workspace(config).store_upload(folder, filename, &bytes)?;
    if !quiet {
        eprintln!("Stored {}", stored.display());
    }
    Ok(())
}
