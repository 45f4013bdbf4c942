//! VS Code Extension Manifest Editor - host side of the form editor.
//!
//! This crate connects a manifest document to its form webview: it decodes
//! webview messages, applies them to the document text through
//! [`vsix_manifest::ManifestService`], and produces the messages and document
//! replacements the host should apply.

pub mod document;
pub mod error;
pub mod picker;
pub mod protocol;
pub mod session;

pub use document::ManifestFile;
pub use error::EditorError;
pub use picker::{file_picker_result, relative_manifest_path};
pub use protocol::{FileFilters, HostMessage, WebviewMessage};
pub use session::{ManifestSession, SessionAction};
