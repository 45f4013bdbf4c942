//! Messages exchanged with the form webview.
//!
//! Both directions are JSON objects tagged by a `type` field.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use vsix_manifest::{
    ExtensionDetection, FieldUpdate, Manifest, ManifestUpdate, ParseFailure, ValidationResult,
};

/// File dialog filters: label to extensions (e.g., `"Images": ["png"]`).
pub type FileFilters = BTreeMap<String, Vec<String>>;

/// A message sent by the webview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WebviewMessage {
    /// The webview has loaded and wants the current state.
    Ready,
    /// Replace the whole document with raw text.
    Edit { content: String },
    /// Merge field updates into the document.
    UpdateManifest {
        updates: Map<String, Value>,
        /// Keys to delete. JSON has no "undefined", so removals travel separately.
        #[serde(default)]
        remove: Vec<String>,
    },
    /// Add the fields a VS Code extension needs.
    InitializeAsExtension,
    /// Reopen the document in the plain text editor.
    CloseEditor,
    /// Ask the host to pick a file for a field.
    PickFile {
        field: String,
        #[serde(default)]
        filters: Option<FileFilters>,
    },
}

impl WebviewMessage {
    /// Builds the [`ManifestUpdate`] carried by an `updateManifest` message.
    ///
    /// Removals are applied after sets.
    pub fn manifest_update(&self) -> Option<ManifestUpdate> {
        let WebviewMessage::UpdateManifest { updates, remove } = self else {
            return None;
        };

        let sets = updates
            .iter()
            .map(|(k, v)| (k.clone(), FieldUpdate::Set(v.clone())));
        let removals = remove.iter().map(|k| (k.clone(), FieldUpdate::Remove));
        Some(sets.chain(removals).collect())
    }
}

/// A message sent to the webview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HostMessage {
    /// The document parsed; here is its current state.
    Update {
        content: String,
        manifest: Manifest,
        detection: ExtensionDetection,
        validation: ValidationResult,
    },
    /// The document does not parse.
    ParseError {
        error: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        line: Option<usize>,
        #[serde(skip_serializing_if = "Option::is_none")]
        column: Option<usize>,
    },
    /// A file was picked for a field.
    FilePickerResult { field: String, path: String },
}

impl From<ParseFailure> for HostMessage {
    fn from(failure: ParseFailure) -> Self {
        HostMessage::ParseError {
            error: failure.message,
            line: failure.line,
            column: failure.column,
        }
    }
}
