//! Append-only status log kept as a JSON array on disk.
//!
//! Provisioning clients report progress by posting small JSON objects. Each
//! accepted message is tagged with the reporting client's address and the
//! local time, then the whole array is rewritten atomically.

use super::write_atomic;
use crate::error::{Result, ZtpError};
use chrono::{Local, NaiveDateTime};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Key under which the client address is recorded.
pub const CLIENT_KEY: &str = "ip";

/// Key under which the receive time is recorded.
pub const TIME_KEY: &str = "time";

/// Locale-style date and time, e.g. `10/19/26 14:03:59`.
pub const TIME_FORMAT: &str = "%x %X";

/// One logged status message.
pub type StatusMessage = Map<String, Value>;

/// Handle to the status log file. Open once and pass it where needed.
#[derive(Debug, Clone)]
pub struct StatusLog {
    path: PathBuf,
}

impl StatusLog {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        tracing::debug!(path = %path.display(), "status log opened");
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All logged messages, oldest first. A missing file is an empty log.
    pub fn entries(&self) -> Result<Vec<StatusMessage>> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(ZtpError::io(&self.path, e)),
        };
        let document: Value = serde_json::from_slice(&bytes)
            .map_err(|e| ZtpError::corrupt(&self.path, e.to_string()))?;
        match document {
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::Object(message) => Ok(message),
                    _ => Err(ZtpError::corrupt(&self.path, "Expected JSON object")),
                })
                .collect(),
            _ => Err(ZtpError::corrupt(&self.path, "Expected JSON array")),
        }
    }

    /// Append `message` as reported by `client`, stamped with the current time.
    pub fn append(&self, message: Value, client: &str) -> Result<StatusMessage> {
        self.append_at(message, client, Local::now().naive_local())
    }

    /// Append with an explicit receive time.
    pub fn append_at(
        &self,
        message: Value,
        client: &str,
        received: NaiveDateTime,
    ) -> Result<StatusMessage> {
        let Value::Object(mut message) = message else {
            return Err(ZtpError::ExpectingJsonObject);
        };
        message.insert(CLIENT_KEY.to_string(), Value::String(client.to_string()));
        message.insert(
            TIME_KEY.to_string(),
            Value::String(received.format(TIME_FORMAT).to_string()),
        );

        let mut entries = self.entries()?;
        entries.push(message.clone());
        self.write(&entries)?;

        tracing::info!(client, total = entries.len(), "status message logged");
        Ok(message)
    }

    /// Drop every logged message.
    pub fn reset(&self) -> Result<()> {
        self.write(&[])?;
        tracing::info!(path = %self.path.display(), "status log reset");
        Ok(())
    }

    fn write(&self, entries: &[StatusMessage]) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(entries)?;
        write_atomic(&self.path, &bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .and_then(|d| d.and_hms_opt(14, 3, 59))
            .expect("valid timestamp")
    }

    #[test]
    fn test_missing_log_is_empty() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let log = StatusLog::open(dir.path().join("status.json"));
        assert!(log.entries().unwrap().is_empty());
    }

    #[test]
    fn test_append_tags_client_and_time() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let log = StatusLog::open(dir.path().join("status.json"));

        let logged = log
            .append_at(json!({"status": "booted"}), "10.0.0.7", at())
            .unwrap();
        assert_eq!(logged["ip"], "10.0.0.7");
        assert_eq!(logged["time"], "10/19/26 14:03:59");

        log.append_at(json!({"status": "done"}), "10.0.0.8", at())
            .unwrap();
        let entries = log.entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["status"], "booted");
        assert_eq!(entries[1]["ip"], "10.0.0.8");

        let keys: Vec<_> = entries[0].keys().cloned().collect();
        assert_eq!(keys, vec!["status", "ip", "time"]);
    }

    #[test]
    fn test_append_rejects_non_object() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let log = StatusLog::open(dir.path().join("status.json"));
        let err = log.append(json!(["booted"]), "10.0.0.7").unwrap_err();
        assert!(matches!(err, ZtpError::ExpectingJsonObject));
        assert!(!log.path().exists());
    }

    #[test]
    fn test_reset_writes_empty_array() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let log = StatusLog::open(dir.path().join("status.json"));
        log.append(json!({"status": "booted"}), "10.0.0.7").unwrap();

        log.reset().unwrap();
        assert!(log.entries().unwrap().is_empty());
        assert_eq!(std::fs::read_to_string(log.path()).unwrap(), "[]");
    }

    #[test]
    fn test_corrupt_log_is_reported() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("status.json");
        std::fs::write(&path, r#"{"status": "booted"}"#).unwrap();
        let err = StatusLog::open(&path).entries().unwrap_err();
        assert!(matches!(err, ZtpError::CorruptDocument { .. }));
    }
}
