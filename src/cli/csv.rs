//! CSV command handlers.
//!
//! Implements `export` and `import`.

use super::{OutputTarget, open_service, write_output};
use crate::config::AppConfig;
use crate::service::Upload;
use crate::store::DocumentStore;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Write the stored document as CSV to stdout or `output_file`.
pub fn run_export(output_file: Option<PathBuf>, config: &AppConfig, quiet: bool) -> Result<()> {
    let payload = open_service(config).export_csv()?;
    write_output(&payload.body, &OutputTarget::from_option(output_file), quiet)
}

/// Replace the stored document with the contents of a CSV file.
pub fn run_import(file: &Path, config: &AppConfig, quiet: bool) -> Result<usize> {
    let bytes =
        std::fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;
    let upload = Upload {
        filename: file
            .file_name()
            .map_or_else(|| file.display().to_string(), |n| n.to_string_lossy().into_owned()),
        bytes,
    };

    let service = open_service(config);
    service.import_csv(Some(&upload))?;
    let entries = service.store().load()?.len();

    if !quiet {
        eprintln!("Imported {entries} entries from {}", upload.filename);
    }
    Ok(entries)
}
