//! Status log command handlers.

use super::{OutputTarget, open_status_log, write_output};
use crate::config::AppConfig;
use anyhow::{Context, Result};

/// Print every logged status message as a JSON array.
pub fn run_log_show(config: &AppConfig) -> Result<()> {
    let entries = open_status_log(config).entries()?;
    let mut text = serde_json::to_vec_pretty(&entries).context("failed to render status log")?;
    text.push(b'\n');
    write_output(&text, &OutputTarget::Stdout, true)
}

/// Append one JSON object reported by `client`.
pub fn run_log_append(message: &str, client: &str, config: &AppConfig, quiet: bool) -> Result<()> {
    let message: serde_json::Value =
        serde_json::from_str(message).context("status message is not valid JSON")?;
    let logged = open_status_log(config).append(message, client)?;

    if !quiet {
        eprintln!("Logged message from {client}");
    }
    tracing::debug!(fields = logged.len(), "status message appended");
    Ok(())
}

/// Empty the status log.
pub fn run_log_reset(config: &AppConfig, quiet: bool) -> Result<()> {
    let log = open_status_log(config);
    log.reset()?;
    if !quiet {
        eprintln!("Cleared {}", log.path().display());
    }
    Ok(())
}
