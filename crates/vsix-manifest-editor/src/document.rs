//! The manifest file on disk.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::EditorError;

/// A manifest file that is only ever replaced as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestFile {
    path: PathBuf,
}

impl ManifestFile {
    /// Wraps the path to a manifest file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the directory holding the manifest, which relative paths in it resolve against.
    pub fn base_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// Reads the current document text.
    pub fn read(&self) -> Result<String, EditorError> {
        Ok(fs::read_to_string(&self.path)?)
    }

    /// Replaces the document text.
    ///
    /// The new text is written to a temporary file next to the manifest and
    /// renamed over it, so readers see either the old or the new document.
    pub fn replace(&self, text: &str) -> Result<(), EditorError> {
        let mut tmp = tempfile::NamedTempFile::new_in(self.base_dir())?;
        tmp.write_all(text.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path)?;
        tracing::debug!(path = %self.path.display(), bytes = text.len(), "manifest replaced");
        Ok(())
    }
}
