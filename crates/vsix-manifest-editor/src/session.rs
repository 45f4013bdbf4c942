//! Per-document editing session.
//!
//! A session sits between one open manifest document and its form webview. It
//! turns document text into [`HostMessage`]s and form edits into replacement
//! document text. It never touches the file system; the host applies
//! [`SessionAction::ReplaceDocument`] to the document however it stores it.

use vsix_manifest::{
    validate, Formatting, Manifest, ManifestService, ManifestUpdate, ParseOutcome,
    ServiceConfig,
};

use crate::error::EditorError;
use crate::protocol::{FileFilters, HostMessage, WebviewMessage};

/// What the host should do after a webview message was handled.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    /// Post a message to the webview.
    Post(HostMessage),
    /// Replace the whole document with this text.
    ReplaceDocument(String),
    /// Show an error notification.
    ShowError(String),
    /// Close the form and reopen the document in the plain text editor.
    ReopenWithDefaultEditor,
    /// Open a file dialog for a field.
    PickFile {
        field: String,
        filters: Option<FileFilters>,
    },
}

/// Editing state for one open manifest document.
#[derive(Debug, Clone, Default)]
pub struct ManifestSession {
    service: ManifestService,
    formatting: Formatting,
}

impl ManifestSession {
    /// Creates a session; edits use `config.default_formatting` until a document parses.
    pub fn new(config: ServiceConfig) -> Self {
        let formatting = config.default_formatting.clone();
        Self {
            service: ManifestService::new(config),
            formatting,
        }
    }

    /// Formatting captured at the last successful parse.
    pub fn formatting(&self) -> &Formatting {
        &self.formatting
    }

    /// The service used for parsing and serialization.
    pub fn service(&self) -> &ManifestService {
        &self.service
    }

    /// Parses the current document text and builds the state update for the webview.
    pub fn on_text_changed(&mut self, text: &str) -> HostMessage {
        match self.service.parse(text) {
            ParseOutcome::Parsed(parsed) => {
                self.formatting = parsed.formatting;
                let detection = self.service.detect_extension(&parsed.manifest);
                let validation = validate(&parsed.manifest);
                tracing::debug!(
                    errors = validation.errors.len(),
                    warnings = validation.warnings.len(),
                    is_extension = detection.is_extension,
                    "manifest refreshed"
                );
                HostMessage::Update {
                    content: parsed.raw_content,
                    manifest: parsed.manifest,
                    detection,
                    validation,
                }
            }
            ParseOutcome::Failed(failure) => {
                tracing::debug!(error = %failure, "manifest does not parse");
                HostMessage::from(failure)
            }
        }
    }

    /// Applies form field updates to the current text and returns the new text.
    pub fn on_field_edit(
        &self,
        current_text: &str,
        update: &ManifestUpdate,
    ) -> Result<String, EditorError> {
        let current = self.current_manifest(current_text)?;
        let updated = self.service.update(&current, update);
        Ok(self.service.serialize(&updated, &self.formatting)?)
    }

    /// Adds the fields a VS Code extension needs and returns the new text.
    pub fn on_initialize_as_extension(&self, current_text: &str) -> Result<String, EditorError> {
        let current = self.current_manifest(current_text)?;
        let initialized = self.service.initialize_as_extension(&current);
        Ok(self.service.serialize(&initialized, &self.formatting)?)
    }

    /// Dispatches one webview message against the current document text.
    pub fn handle(&mut self, message: WebviewMessage, current_text: &str) -> SessionAction {
        tracing::debug!(?message, "webview message");

        match message {
            WebviewMessage::Ready => SessionAction::Post(self.on_text_changed(current_text)),
            WebviewMessage::Edit { content } => SessionAction::ReplaceDocument(content),
            edit @ WebviewMessage::UpdateManifest { .. } => {
                let update = edit.manifest_update().unwrap_or_default();
                match self.on_field_edit(current_text, &update) {
                    Ok(text) => SessionAction::ReplaceDocument(text),
                    Err(e) => {
                        tracing::warn!(error = %e, "manifest update rejected");
                        SessionAction::ShowError(format!("Cannot update manifest: {}", e))
                    }
                }
            }
            WebviewMessage::InitializeAsExtension => {
                match self.on_initialize_as_extension(current_text) {
                    Ok(text) => SessionAction::ReplaceDocument(text),
                    Err(e) => {
                        tracing::warn!(error = %e, "initialize as extension rejected");
                        SessionAction::ShowError(format!("Cannot initialize: {}", e))
                    }
                }
            }
            WebviewMessage::CloseEditor => SessionAction::ReopenWithDefaultEditor,
            WebviewMessage::PickFile { field, filters } => SessionAction::PickFile { field, filters },
        }
    }

    fn current_manifest(&self, text: &str) -> Result<Manifest, EditorError> {
        let parsed = self.service.parse(text).into_result()?;
        Ok(parsed.manifest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const TABBED: &str = "{\n\t\"name\": \"ext\",\n\t\"version\": \"1.0.0\"\n}\n";

    #[test]
    fn test_text_changed_records_formatting() {
        let mut session = ManifestSession::default();
        assert_eq!(session.formatting().indent, "  ");

        let msg = session.on_text_changed(TABBED);
        assert!(matches!(msg, HostMessage::Update { .. }));
        assert_eq!(session.formatting().indent, "\t");
    }

    #[test]
    fn test_text_changed_reports_parse_error() {
        let mut session = ManifestSession::default();
        session.on_text_changed(TABBED);

        let msg = session.on_text_changed("{ \"name\": ");
        assert!(matches!(msg, HostMessage::ParseError { .. }));
        // Last good formatting is kept.
        assert_eq!(session.formatting().indent, "\t");
    }

    #[test]
    fn test_field_edit_uses_captured_formatting() {
        let mut session = ManifestSession::default();
        session.on_text_changed(TABBED);

        let text = session
            .on_field_edit(TABBED, &ManifestUpdate::new().set("publisher", "acme"))
            .unwrap();
        assert_eq!(
            text,
            "{\n\t\"name\": \"ext\",\n\t\"version\": \"1.0.0\",\n\t\"publisher\": \"acme\"\n}\n"
        );
    }

    #[test]
    fn test_configured_formatting_applies_before_first_parse() {
        let session = ManifestSession::new(ServiceConfig {
            default_formatting: Formatting::with_indent("\t"),
            ..ServiceConfig::default()
        });
        let text = session
            .on_field_edit("{\"name\": \"ext\"}", &ManifestUpdate::new().set("version", "1.0.0"))
            .unwrap();
        assert_eq!(text, "{\n\t\"name\": \"ext\",\n\t\"version\": \"1.0.0\"\n}\n");
        assert_eq!(session.service().config().default_formatting.indent, "\t");
    }

    #[test]
    fn test_invalid_configured_indent_shows_error() {
        let mut session = ManifestSession::new(ServiceConfig {
            default_formatting: Formatting::with_indent("--"),
            ..ServiceConfig::default()
        });
        let msg = WebviewMessage::UpdateManifest {
            updates: serde_json::Map::new(),
            remove: vec!["name".to_string()],
        };
        match session.handle(msg, "{\"name\": \"ext\"}") {
            SessionAction::ShowError(text) => assert!(text.contains("invalid indent")),
            other => panic!("expected error, got {:?}", other),
        }
    }

    #[test]
    fn test_update_on_malformed_document_shows_error() {
        let mut session = ManifestSession::default();
        let msg: WebviewMessage = serde_json::from_value(json!({
            "type": "updateManifest",
            "updates": { "name": "x" }
        }))
        .unwrap();

        match session.handle(msg, "{ not json") {
            SessionAction::ShowError(text) => assert!(text.starts_with("Cannot update manifest: ")),
            other => panic!("expected error, got {:?}", other),
        }
    }

    #[test]
    fn test_handle_dispatch() {
        let mut session = ManifestSession::default();

        assert!(matches!(
            session.handle(WebviewMessage::Ready, TABBED),
            SessionAction::Post(HostMessage::Update { .. })
        ));
        assert_eq!(
            session.handle(WebviewMessage::Edit { content: "{}".to_string() }, TABBED),
            SessionAction::ReplaceDocument("{}".to_string())
        );
        assert_eq!(
            session.handle(WebviewMessage::CloseEditor, TABBED),
            SessionAction::ReopenWithDefaultEditor
        );
        assert_eq!(
            session.handle(
                WebviewMessage::PickFile { field: "icon".to_string(), filters: None },
                TABBED
            ),
            SessionAction::PickFile { field: "icon".to_string(), filters: None }
        );
    }

    #[test]
    fn test_initialize_as_extension() {
        let mut session = ManifestSession::default();
        session.on_text_changed(TABBED);

        let SessionAction::ReplaceDocument(text) =
            session.handle(WebviewMessage::InitializeAsExtension, TABBED)
        else {
            panic!("expected replacement");
        };
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["engines"]["vscode"], "^1.85.0");
        assert!(text.contains("\n\t\"engines\""));
    }
}
