//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::AppConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".ztp-tools.yaml",
    ".ztp-tools.yml",
    "ztp-tools.yaml",
    "ztp-tools.yml",
];

/// Directories searched for a config file, in order.
///
/// 1. Current directory
/// 2. User config directory (~/.config/ztp-tools/)
/// 3. Home directory
#[must_use]
pub fn config_search_dirs() -> Vec<PathBuf> {
    let mut search = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        search.push(cwd);
    }
    if let Some(config_dir) = dirs::config_dir() {
        search.push(config_dir.join("ztp-tools"));
    }
    if let Some(home) = dirs::home_dir() {
        search.push(home);
    }
    search
}

/// Discover a config file, preferring an explicit path that exists.
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path
        && path.exists()
    {
        return Some(path.to_path_buf());
    }

    config_search_dirs()
        .iter()
        .find_map(|dir| find_config_in_dir(dir))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml_ng::from_str(&content).map_err(|source| ConfigFileError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the config a command runs with.
///
/// An explicitly named file must exist and parse. Without one, the first
/// discovered file is used and a broken discovered file falls back to defaults.
pub fn load_config(
    explicit_path: Option<&Path>,
) -> Result<(AppConfig, Option<PathBuf>), ConfigFileError> {
    match explicit_path {
        Some(path) => Ok((load_config_file(path)?, Some(path.to_path_buf()))),
        None => Ok(load_or_default(None)),
    }
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example configuration file content.
#[must_use]
pub fn generate_example_config() -> String {
    r"# ztp-tools configuration
# ========================
#
# Place this file at:
#   - .ztp-tools.yaml in the working directory
#   - ~/.config/ztp-tools/ztp-tools.yaml for a per-user default
#
# CLI arguments always override file settings.

storage:
  # Directory holding the document, the status log and served files
  data_dir: .
  # Document file name inside data_dir
  document: data.json
  # Status log file name inside data_dir
  status_log: status.json
  # Indent width of the persisted JSON document
  json_indent: 4

export:
  # Attachment name offered for CSV downloads
  filename: export.csv

workspace:
  # Names hidden from listings and refused by delete and upload
  protected:
    - app.py
    - data.json
    - index.html
    - main.js
    - status.json
    - style.css
    - script.py
"
    .to_string()
}
