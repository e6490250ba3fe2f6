//! Configuration types for ztp-tools.

use crate::service::DEFAULT_EXPORT_FILENAME;
use crate::store::DEFAULT_JSON_INDENT;
use crate::workspace::DEFAULT_PROTECTED;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration, loaded from a config file and
/// overridden by CLI flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Where the document and the status log live
    pub storage: StorageConfig,
    /// CSV export settings
    pub export: ExportConfig,
    /// Auxiliary file handling
    pub workspace: WorkspaceConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Full path of the JSON document.
    #[must_use]
    pub fn document_path(&self) -> PathBuf {
        self.storage.data_dir.join(&self.storage.document)
    }

    /// Full path of the status log.
    #[must_use]
    pub fn status_log_path(&self) -> PathBuf {
        self.storage.data_dir.join(&self.storage.status_log)
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the directory holding the document, the log and served files.
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.storage.data_dir = dir.into();
        self
    }

    /// Set the document file name.
    pub fn document(mut self, name: impl Into<String>) -> Self {
        self.config.storage.document = name.into();
        self
    }

    /// Set the indent width of the persisted JSON.
    pub const fn json_indent(mut self, indent: usize) -> Self {
        self.config.storage.json_indent = indent;
        self
    }

    /// Set the CSV attachment name.
    pub fn export_filename(mut self, name: impl Into<String>) -> Self {
        self.config.export.filename = name.into();
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Sections
// ============================================================================

/// Storage locations.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the document, the status log and served files
    pub data_dir: PathBuf,
    /// Document file name inside `data_dir`
    pub document: String,
    /// Status log file name inside `data_dir`
    pub status_log: String,
    /// Indent width of the persisted JSON document
    pub json_indent: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            document: "data.json".to_string(),
            status_log: "status.json".to_string(),
            json_indent: DEFAULT_JSON_INDENT,
        }
    }
}

/// CSV export settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ExportConfig {
    /// Attachment file name offered to browsers
    pub filename: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            filename: DEFAULT_EXPORT_FILENAME.to_string(),
        }
    }
}

/// Auxiliary file handling.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Names hidden from listings and refused by delete and upload
    pub protected: Vec<String>,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            protected: DEFAULT_PROTECTED.iter().map(ToString::to_string).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_default_paths() {
        let config = AppConfig::default();
        assert_eq!(config.document_path(), Path::new("./data.json"));
        assert_eq!(config.status_log_path(), Path::new("./status.json"));
        assert_eq!(config.export.filename, "export.csv");
        assert!(config.workspace.protected.contains(&"data.json".to_string()));
    }

    #[test]
    fn test_builder() {
        let config = AppConfig::builder()
            .data_dir("/srv/ztp")
            .document("ztp.json")
            .json_indent(2)
            .export_filename("ztp.csv")
            .build();
        assert_eq!(config.document_path(), Path::new("/srv/ztp/ztp.json"));
        assert_eq!(config.storage.json_indent, 2);
        assert_eq!(config.export.filename, "ztp.csv");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: AppConfig = serde_yaml_ng::from_str("storage:\n  data_dir: /srv/ztp\n").unwrap();
        assert_eq!(config.storage.data_dir, Path::new("/srv/ztp"));
        assert_eq!(config.storage.document, "data.json");
        assert_eq!(config.export.filename, "export.csv");
    }
}
