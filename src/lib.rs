//! **Storage and CSV interchange for ZTP (Zero-Touch Provisioning) configuration data.**
//!
//! `ztp-tools` keeps the per-device provisioning records of a ZTP setup in a single JSON
//! document and lets operators move that document in and out of spreadsheets. It powers
//! both a command-line interface and a small library that a web front end can sit on.
//!
//! ## Key Features
//!
//! - **Shape Validation**: Every document is checked before it is stored. The first failing
//!   rule produces the exact message shown to the operator.
//! - **CSV Interchange**: Collections flatten to `;`-delimited CSV with `group/field` columns
//!   and unflatten back into nested entries.
//! - **Safe Persistence**: Writes go through a temp file and a rename, so a rejected or
//!   interrupted save never damages the stored document.
//! - **Status Log**: An append-only JSON log of client reports, stamped with address and time.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: [`Collection`] and [`Entry`], the typed form of a stored document.
//! - **[`validation`]**: The shape rules and their precedence.
//! - **[`tabular`]**: The flattener, the unflattener and the CSV codec between them.
//! - **[`store`]**: The [`DocumentStore`] trait, the JSON file store and the status log.
//! - **[`service`]**: Request/response payloads for the document endpoints.
//! - **[`workspace`]**: Listing, upload and removal of auxiliary files next to the document.
//!
//! ## Getting Started
//!
//! ```
//! use ztp_tools::{Collection, export_csv, import_csv};
//! use serde_json::json;
//!
//! let collection = Collection::from_json(&json!([
//!     {"name": "default"},
//!     {"stack": {"ip": "10.0.0.1"}, "name": "r1", "enabled": true},
//! ]))?;
//!
//! let csv = export_csv(&collection);
//! assert_eq!(csv, "name;stack/ip;enabled\ndefault;;\nr1;10.0.0.1;True\n");
//!
//! let back = import_csv(csv.as_bytes())?;
//! assert_eq!(back.len(), 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ### Storing a Document
//!
//! ```no_run
//! use ztp_tools::{DocumentStore, JsonFileStore};
//! use serde_json::json;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = JsonFileStore::new("data.json");
//!     store.save_json(&json!([{"stack": {"ip": "10.0.0.1"}}]))?;
//!
//!     let collection = store.load()?;
//!     println!("{} entries stored", collection.len());
//!     Ok(())
//! }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // # Errors sections would repeat the ZtpError variants on every fn
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod service;
pub mod store;
pub mod tabular;
pub mod validation;
pub mod workspace;

// Re-export main types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigError, Validatable};
pub use error::{Result, ShapeError, ZtpError};
pub use model::{Collection, Entry, FieldValue, Scalar};
pub use service::{Payload, Upload, ZtpService, error_body};
pub use store::{DocumentStore, JsonFileStore, MemoryStore, StatusLog};
pub use tabular::{FlatTable, export_csv, flatten, import_csv, unflatten};
pub use validation::validate;
pub use workspace::{FileEntry, Workspace};
