//! Unified error types for ztp-tools.
//!
//! Every failure a caller can observe is a [`ZtpError`]. Structural problems
//! with a document are carried by the nested [`ShapeError`] kind, whose
//! `Display` text is the message shown to users verbatim.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for ztp-tools operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ZtpError {
    /// The candidate collection violates the record model
    #[error("{0}")]
    InvalidShape(#[from] ShapeError),

    /// A request body could not be parsed as JSON
    #[error("Malformed JSON: {0}")]
    MalformedJson(String),

    /// The stored document exists but cannot be parsed or validated
    #[error("Stored document {} is unusable: {reason}", .path.display())]
    CorruptDocument { path: PathBuf, reason: String },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Missing upload field, undecodable bytes or an unusable CSV header
    #[error("Malformed upload: {0}")]
    MalformedUpload(String),

    /// Document writes accept `application/json` only
    #[error("Unsupported content type '{0}', expected application/json")]
    UnsupportedContentType(String),

    /// Status messages must be JSON objects
    #[error("Expected JSON object")]
    ExpectingJsonObject,

    /// Attempt to remove or overwrite one of the managed files
    #[error("Cannot remove {0}")]
    ProtectedFile(String),

    /// A workspace path points outside the workspace root
    #[error("Path escapes workspace root: {0}")]
    PathEscapesRoot(String),
}

/// Record model violations, in the order the validator checks them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ShapeError {
    #[error("Expecting JSON array of objects")]
    ExpectingArrayOfObjects,

    #[error("Empty JSON object not allowed")]
    EmptyObjectNotAllowed,

    #[error("Empty JSON keys not allowed")]
    EmptyKeyNotAllowed,

    #[error("Stack must be JSON object")]
    InvalidStackShape,

    #[error("Subst must be JSON object")]
    InvalidSubstShape,

    #[error(
        "Unsupported value under key '{key}': only scalars and one level of nested objects are allowed"
    )]
    UnsupportedValue { key: String },

    #[error("Maximum of one object without stack key is allowed")]
    TooManyDefaults,
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for ztp-tools operations
pub type Result<T> = std::result::Result<T, ZtpError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl ZtpError {
    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let message = format!("{source}");
        Self::Io {
            path: Some(path.into()),
            message,
            source,
        }
    }

    /// Create a corrupt document error
    pub fn corrupt(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::CorruptDocument {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a malformed upload error
    pub fn malformed_upload(message: impl Into<String>) -> Self {
        Self::MalformedUpload(message.into())
    }

    /// The readable message surfaced to GUI users.
    ///
    /// Shape violations, including those found in an already stored
    /// document, are reported with their reason text alone.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidShape(shape) => shape.to_string(),
            Self::CorruptDocument { reason, .. } => reason.clone(),
            Self::Io { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// The shape violation behind this error, if any.
    #[must_use]
    pub const fn shape(&self) -> Option<&ShapeError> {
        match self {
            Self::InvalidShape(shape) => Some(shape),
            _ => None,
        }
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for ZtpError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for ZtpError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedJson(err.to_string())
    }
}
