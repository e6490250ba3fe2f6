//! Configuration validation for ztp-tools.
//!
//! Provides validation traits and implementations for all configuration types.

use super::types::{AppConfig, ExportConfig, StorageConfig, WorkspaceConfig};

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.storage.validate());
        errors.extend(self.export.validate());
        errors.extend(self.workspace.validate());
        errors
    }
}

/// Maximum indent width accepted for the persisted document.
const MAX_JSON_INDENT: usize = 16;

impl Validatable for StorageConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        for (field, name) in [
            ("storage.document", &self.document),
            ("storage.status_log", &self.status_log),
        ] {
            if let Some(message) = plain_file_name_problem(name) {
                errors.push(ConfigError {
                    field: field.to_string(),
                    message,
                });
            }
        }

        if self.document == self.status_log {
            errors.push(ConfigError {
                field: "storage.status_log".to_string(),
                message: "Status log must not share the document's file name".to_string(),
            });
        }

        if self.json_indent > MAX_JSON_INDENT {
            errors.push(ConfigError {
                field: "storage.json_indent".to_string(),
                message: format!(
                    "Indent must be at most {MAX_JSON_INDENT}, got {}",
                    self.json_indent
                ),
            });
        }

        errors
    }
}

impl Validatable for ExportConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if let Some(message) = plain_file_name_problem(&self.filename) {
            errors.push(ConfigError {
                field: "export.filename".to_string(),
                message,
            });
        } else if self.filename.contains('"') {
            errors.push(ConfigError {
                field: "export.filename".to_string(),
                message: "File name must not contain quotes".to_string(),
            });
        }
        errors
    }
}

impl Validatable for WorkspaceConfig {
    fn validate(&self) -> Vec<ConfigError> {
        self.protected
            .iter()
            .filter(|name| name.trim().is_empty())
            .map(|_| ConfigError {
                field: "workspace.protected".to_string(),
                message: "Protected names must not be empty".to_string(),
            })
            .collect()
    }
}

fn plain_file_name_problem(name: &str) -> Option<String> {
    if name.trim().is_empty() {
        Some("File name must not be empty".to_string())
    } else if name.contains('/') || name.contains('\\') {
        Some(format!("'{name}' must be a file name, not a path"))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().is_valid());
    }

    #[test]
    fn test_document_must_be_file_name() {
        let mut config = AppConfig::default();
        config.storage.document = "sub/data.json".to_string();
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "storage.document");
    }

    #[test]
    fn test_log_and_document_must_differ() {
        let mut config = AppConfig::default();
        config.storage.status_log = config.storage.document.clone();
        assert!(
            config
                .validate()
                .iter()
                .any(|e| e.field == "storage.status_log")
        );
    }

    #[test]
    fn test_indent_limit() {
        let mut config = AppConfig::default();
        config.storage.json_indent = 40;
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().starts_with("storage.json_indent:"));
    }

    #[test]
    fn test_export_filename_without_quotes() {
        let mut config = AppConfig::default();
        config.export.filename = "a\"b.csv".to_string();
        assert!(!config.is_valid());
    }

    #[test]
    fn test_blank_protected_name() {
        let mut config = AppConfig::default();
        config.workspace.protected.push("  ".to_string());
        assert!(!config.is_valid());
    }
}
