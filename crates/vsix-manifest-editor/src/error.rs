//! Error types for the editing session.

use thiserror::Error;
use vsix_manifest::{ManifestError, ParseFailure};

/// Errors raised while applying an edit to a manifest document.
#[derive(Debug, Error)]
pub enum EditorError {
    /// The current document text is not a valid manifest.
    #[error("{0}")]
    Parse(#[from] ParseFailure),

    /// The edited manifest could not be serialized.
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Reading or writing the manifest file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Replacing the manifest file failed.
    #[error("failed to replace manifest file: {0}")]
    Persist(#[from] tempfile::PersistError),
}
