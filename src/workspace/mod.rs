//! Auxiliary files served next to the ZTP document.
//!
//! Provisioned devices fetch images and scripts from the same directory that
//! holds the document. Listing hides dot-files and the files this tool manages
//! itself; removal and upload refuse to touch the managed files.

use crate::error::{Result, ZtpError};
use serde::Serialize;
use std::path::{Component, Path, PathBuf};

/// File names managed by the service itself.
pub const DEFAULT_PROTECTED: &[&str] = &[
    "app.py",
    "data.json",
    "index.html",
    "main.js",
    "status.json",
    "style.css",
    "script.py",
];

/// One listed file, with a `/`-separated path relative to the root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    pub file: String,
    pub size: u64,
}

/// Files below `root` and their managed names.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    protected: Vec<String>,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            protected: DEFAULT_PROTECTED.iter().map(ToString::to_string).collect(),
        }
    }

    #[must_use]
    pub fn with_protected(mut self, protected: Vec<String>) -> Self {
        self.protected = protected;
        self
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Recursively list visible, unmanaged files, sorted by path.
    pub fn list_files(&self) -> Result<Vec<FileEntry>> {
        let mut files = Vec::new();
        self.scan_dir(&self.root, &mut files)?;
        files.sort_by(|a, b| a.file.cmp(&b.file));
        Ok(files)
    }

    fn scan_dir(&self, dir: &Path, files: &mut Vec<FileEntry>) -> Result<()> {
        let entries = std::fs::read_dir(dir).map_err(|e| ZtpError::io(dir, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| ZtpError::io(dir, e))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }
            let path = entry.path();
            let file_type = entry.file_type().map_err(|e| ZtpError::io(&path, e))?;
            if file_type.is_dir() {
                self.scan_dir(&path, files)?;
            } else if file_type.is_file() && !self.protected.contains(&name) {
                let size = entry.metadata().map_err(|e| ZtpError::io(&path, e))?.len();
                files.push(FileEntry {
                    file: self.relative_name(&path),
                    size,
                });
            }
        }
        Ok(())
    }

    fn relative_name(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Remove one file below the root.
    pub fn remove_file(&self, relative: &str) -> Result<()> {
        self.ensure_unprotected(relative)?;
        let path = self.resolve(relative)?;
        std::fs::remove_file(&path).map_err(|e| ZtpError::io(&path, e))?;
        tracing::info!(file = relative, "workspace file removed");
        Ok(())
    }

    /// Write uploaded bytes to `folder/filename`, creating the folder and
    /// overwriting an existing file.
    pub fn store_upload(&self, folder: Option<&str>, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
        let relative = match folder.filter(|f| !f.is_empty()) {
            Some(folder) => format!("{}/{filename}", folder.trim_end_matches('/')),
            None => filename.to_string(),
        };
        self.ensure_unprotected(&relative)?;
        let path = self.resolve(&relative)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ZtpError::io(parent, e))?;
        }
        std::fs::write(&path, bytes).map_err(|e| ZtpError::io(&path, e))?;
        tracing::info!(file = %relative, bytes = bytes.len(), "workspace file stored");
        Ok(path)
    }

    fn ensure_unprotected(&self, relative: &str) -> Result<()> {
        if self.protected.iter().any(|name| relative.contains(name.as_str())) {
            return Err(ZtpError::ProtectedFile(relative.to_string()));
        }
        Ok(())
    }

    fn resolve(&self, relative: &str) -> Result<PathBuf> {
        let candidate = Path::new(relative);
        let escapes = relative.is_empty()
            || candidate
                .components()
                .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(ZtpError::PathEscapesRoot(relative.to_string()));
        }
        Ok(self.root.join(candidate))
    }
}
