//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand.

mod csv;
mod document;
mod files;
mod log;
mod output;

pub use csv::{run_export, run_import};
pub use document::{run_save, run_show, run_validate};
pub use files::{run_files_list, run_files_put, run_files_rm};
pub use log::{run_log_append, run_log_reset, run_log_show};
pub use output::{OutputTarget, write_output};

use crate::config::{AppConfig, Validatable, load_config};
use crate::error::ZtpError;
use crate::service::ZtpService;
use crate::store::{JsonFileStore, StatusLog};
use crate::workspace::Workspace;
use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};

/// Load the config, apply the `--data-dir` override and reject invalid settings.
///
/// A config file named on the command line must load; commands never fall
/// back to defaults and touch another directory.
pub fn resolve_config(explicit: Option<&Path>, data_dir: Option<PathBuf>) -> Result<AppConfig> {
    let (mut config, loaded_from) = load_config(explicit).context("failed to load config")?;
    if let Some(path) = &loaded_from {
        tracing::debug!("using config from {}", path.display());
    }
    if let Some(dir) = data_dir {
        config.storage.data_dir = dir;
    }

    let errors = config.validate();
    if !errors.is_empty() {
        let details: Vec<String> = errors.iter().map(ToString::to_string).collect();
        bail!("invalid configuration: {}", details.join("; "));
    }
    Ok(config)
}

/// Text printed for a failed command.
///
/// Library errors show their user message; anything else shows its context chain.
#[must_use]
pub fn error_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<ZtpError>() {
        Some(ztp) => ztp.user_message(),
        None => format!("{err:#}"),
    }
}

/// Service over the document file named by `config`.
fn open_service(config: &AppConfig) -> ZtpService<JsonFileStore> {
    let store =
        JsonFileStore::new(config.document_path()).with_indent(config.storage.json_indent);
    ZtpService::new(store).with_export_filename(config.export.filename.clone())
}

fn open_status_log(config: &AppConfig) -> StatusLog {
    StatusLog::open(config.status_log_path())
}

/// Workspace over `data_dir`. The document and the status log are always protected.
fn open_workspace(config: &AppConfig) -> Workspace {
    let mut protected = config.workspace.protected.clone();
    for managed in [&config.storage.document, &config.storage.status_log] {
        if !protected.contains(managed) {
            protected.push(managed.clone());
        }
    }
    Workspace::new(&config.storage.data_dir).with_protected(protected)
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::config::AppConfig;
    use tempfile::TempDir;

    /// Config rooted in a fresh temp directory.
    pub fn temp_config() -> (TempDir, AppConfig) {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config = AppConfig::builder().data_dir(dir.path()).build();
        (dir, config)
    }
}
