//! Document command handlers.
//!
//! Implements `show`, `validate` and `save`.

use super::{OutputTarget, open_service, write_output};
use crate::config::AppConfig;
use crate::error::ZtpError;
use crate::model::Collection;
use crate::service::JSON_CONTENT_TYPE;
use crate::store::DocumentStore;
use anyhow::{Context, Result};
use std::io::Read as _;
use std::path::Path;

/// Print the stored document with the configured indent.
pub fn run_show(config: &AppConfig) -> Result<()> {
    let service = open_service(config);
    let collection = service.store().load()?;
    let mut text = collection
        .to_pretty_json(config.storage.json_indent)
        .context("failed to render document")?;
    text.push(b'\n');
    write_output(&text, &OutputTarget::Stdout, true)
}

/// Check a JSON file, or the stored document when `file` is `None`.
///
/// Returns the number of entries in the accepted collection.
pub fn run_validate(file: Option<&Path>, config: &AppConfig, quiet: bool) -> Result<usize> {
    let collection = match file {
        Some(path) => {
            let text = std::fs::read(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let document: serde_json::Value =
                serde_json::from_slice(&text).map_err(ZtpError::from)?;
            Collection::from_json(&document).map_err(ZtpError::from)?
        }
        None => open_service(config).store().load()?,
    };

    if !quiet {
        eprintln!("Document is valid ({} entries)", collection.len());
    }
    Ok(collection.len())
}

/// Replace the stored document with a JSON file, or stdin for `-`.
pub fn run_save(source: &Path, config: &AppConfig, quiet: bool) -> Result<()> {
    let body = read_source(source)?;
    let service = open_service(config);
    service.write_document(JSON_CONTENT_TYPE, &body)?;

    if !quiet {
        eprintln!("Saved {}", service.store().path().display());
    }
    Ok(())
}

fn read_source(source: &Path) -> Result<Vec<u8>> {
    if source == Path::new("-") {
        let mut body = Vec::new();
        std::io::stdin()
            .read_to_end(&mut body)
            .context("failed to read stdin")?;
        Ok(body)
    } else {
        std::fs::read(source).with_context(|| format!("failed to read {}", source.display()))
    }
}
