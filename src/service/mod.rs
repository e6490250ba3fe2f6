//! Boundary operations behind the GUI's HTTP endpoints.
//!
//! The transport (routing, multipart parsing, the listener) lives elsewhere.
//! This module owns the payloads: what each call accepts, what bytes and
//! headers it answers with, and how failures turn into the error body the
//! GUI displays.

use crate::error::{Result, ZtpError};
use crate::store::DocumentStore;
use crate::tabular;

/// Media type accepted by [`ZtpService::write_document`].
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Media type of [`ZtpService::export_csv`] responses.
pub const CSV_CONTENT_TYPE: &str = "text/csv";

/// Form field carrying the uploaded CSV file.
pub const UPLOAD_FIELD: &str = "upload";

/// Default attachment name for CSV exports.
pub const DEFAULT_EXPORT_FILENAME: &str = "export.csv";

/// Headers that keep browsers and proxies from caching a response.
pub const NO_CACHE_HEADERS: &[(&str, &str)] = &[
    ("Cache-Control", "no-cache, no-store, must-revalidate"),
    ("Pragma", "no-cache"),
    ("Expires", "0"),
];

/// A response body plus the headers the transport must send with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    pub content_type: &'static str,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Payload {
    fn uncached(content_type: &'static str, body: Vec<u8>) -> Self {
        Self {
            content_type,
            headers: NO_CACHE_HEADERS
                .iter()
                .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
                .collect(),
            body,
        }
    }

    /// Value of the first header named `name`, ignoring case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// One file taken from a multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// The document endpoints over any [`DocumentStore`].
#[derive(Debug)]
pub struct ZtpService<S> {
    store: S,
    export_filename: String,
}

impl<S: DocumentStore> ZtpService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            export_filename: DEFAULT_EXPORT_FILENAME.to_string(),
        }
    }

    #[must_use]
    pub fn with_export_filename(mut self, filename: impl Into<String>) -> Self {
        self.export_filename = filename.into();
        self
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    /// The whole collection as compact JSON. A missing document reads as `[{}]`.
    pub fn read_document(&self) -> Result<Payload> {
        let collection = self.store.load()?;
        let body = serde_json::to_vec(&collection)?;
        Ok(Payload::uncached(JSON_CONTENT_TYPE, body))
    }

    /// Replace the collection with a posted JSON body.
    pub fn write_document(&self, content_type: &str, body: &[u8]) -> Result<()> {
        if !is_json_media_type(content_type) {
            return Err(ZtpError::UnsupportedContentType(content_type.to_string()));
        }
        let document: serde_json::Value = serde_json::from_slice(body)?;
        let collection = self.store.save_json(&document)?;
        tracing::debug!(entries = collection.len(), "document written");
        Ok(())
    }

    /// The stored collection as a CSV attachment.
    pub fn export_csv(&self) -> Result<Payload> {
        let collection = self.store.load()?;
        let body = tabular::export_csv(&collection).into_bytes();
        let mut payload = Payload::uncached(CSV_CONTENT_TYPE, body);
        payload.headers.push((
            "Content-Disposition".to_string(),
            format!("attachment; filename=\"{}\"", self.export_filename),
        ));
        tracing::debug!(entries = collection.len(), "document exported as CSV");
        Ok(payload)
    }

    /// Replace the collection with the contents of an uploaded CSV file.
    pub fn import_csv(&self, upload: Option<&Upload>) -> Result<()> {
        let upload = upload.ok_or_else(|| {
            ZtpError::malformed_upload(format!("missing '{UPLOAD_FIELD}' file field"))
        })?;
        let collection = tabular::import_csv(&upload.bytes).inspect_err(|e| {
            tracing::warn!(file = %upload.filename, error = %e, "CSV import rejected");
        })?;
        self.store.save(&collection)?;
        tracing::info!(
            file = %upload.filename,
            entries = collection.len(),
            "CSV imported"
        );
        Ok(())
    }
}

/// JSON-encoded message string returned with a failed call.
#[must_use]
pub fn error_body(error: &ZtpError) -> String {
    serde_json::Value::String(error.user_message()).to_string()
}

fn is_json_media_type(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case(JSON_CONTENT_TYPE))
}
