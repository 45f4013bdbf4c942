//! Parse, serialize, update, and classify manifests.
//!
//! [`ManifestService`] is the read-modify-write pipeline: raw text is parsed
//! into a [`Manifest`] plus its [`Formatting`], edits are merged into the
//! parsed value, and the result is serialized with the captured formatting so
//! that untouched content comes back unchanged.

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::{json, Value};

use crate::detection::ExtensionDetection;
use crate::error::{ManifestError, ParseFailure};
use crate::format::{is_valid_indent, ErrorPosition, Formatting};
use crate::manifest::{is_truthy, json_type_name, Manifest};
use crate::update::{apply_update, ManifestUpdate};

/// Engine range written by [`ManifestService::initialize_as_extension`].
pub const DEFAULT_ENGINE_RANGE: &str = "^1.85.0";

/// Service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServiceConfig {
    /// `engines.vscode` range added when initializing an extension.
    pub default_engine: String,
    /// Formatting used before any document has been parsed.
    pub default_formatting: Formatting,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            default_engine: DEFAULT_ENGINE_RANGE.to_string(),
            default_formatting: Formatting::default(),
        }
    }
}

/// A successfully parsed manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedManifest {
    /// The document value.
    pub manifest: Manifest,
    /// Formatting captured from the raw text.
    pub formatting: Formatting,
    /// The text that was parsed.
    pub raw_content: String,
}

/// The outcome of parsing raw manifest text.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    /// The text is a JSON object.
    Parsed(ParsedManifest),
    /// The text is malformed or its root is not an object.
    Failed(ParseFailure),
}

impl ParseOutcome {
    /// Returns true if parsing succeeded.
    pub fn is_parsed(&self) -> bool {
        matches!(self, ParseOutcome::Parsed(_))
    }

    /// Converts to a Result.
    pub fn into_result(self) -> Result<ParsedManifest, ParseFailure> {
        match self {
            ParseOutcome::Parsed(parsed) => Ok(parsed),
            ParseOutcome::Failed(failure) => Err(failure),
        }
    }
}

/// The manifest read-modify-write pipeline.
///
/// Holds only configuration; every operation is a pure function of its inputs.
#[derive(Debug, Clone, Default)]
pub struct ManifestService {
    config: ServiceConfig,
}

impl ManifestService {
    /// Creates a service with the given configuration.
    pub fn new(config: ServiceConfig) -> Self {
        Self { config }
    }

    /// Returns the service configuration.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Parses raw text into a manifest and its formatting.
    ///
    /// Never panics; malformed input becomes [`ParseOutcome::Failed`] with
    /// the 1-based location of the problem when it is known.
    ///
    /// # Example
    /// ```
    /// use vsix_manifest::{ManifestService, ParseOutcome};
    ///
    /// let service = ManifestService::default();
    /// match service.parse("{\n\t\"name\": \"ext\"\n}\n") {
    ///     ParseOutcome::Parsed(parsed) => {
    ///         assert_eq!(parsed.manifest.name(), Some("ext"));
    ///         assert_eq!(parsed.formatting.indent, "\t");
    ///     }
    ///     ParseOutcome::Failed(failure) => panic!("{}", failure),
    /// }
    /// ```
    pub fn parse(&self, text: &str) -> ParseOutcome {
        let value: Value = match serde_json::from_str(text) {
            Ok(value) => value,
            Err(err) => {
                let failure = locate_failure(
                    json_error_message(&err),
                    ErrorPosition::from_json_error(&err, text),
                    text,
                );
                tracing::debug!(%failure, "manifest parse failed");
                return ParseOutcome::Failed(failure);
            }
        };

        let manifest = match Manifest::try_from(value) {
            Ok(manifest) => manifest,
            Err(other) => {
                let offset = text.chars().take_while(|c| c.is_whitespace()).count();
                let failure = locate_failure(
                    format!(
                        "manifest root must be a JSON object, got {}",
                        json_type_name(&other)
                    ),
                    ErrorPosition::Offset(offset),
                    text,
                );
                tracing::debug!(%failure, "manifest root is not an object");
                return ParseOutcome::Failed(failure);
            }
        };

        ParseOutcome::Parsed(ParsedManifest {
            manifest,
            formatting: Formatting::detect(text),
            raw_content: text.to_string(),
        })
    }

    /// Serializes a manifest using the given formatting.
    ///
    /// Keys are written in the manifest's order, one level of `formatting.indent`
    /// per nesting depth. The indent must be a non-empty run of spaces and tabs.
    pub fn serialize(
        &self,
        manifest: &Manifest,
        formatting: &Formatting,
    ) -> Result<String, ManifestError> {
        if !is_valid_indent(&formatting.indent) {
            return Err(ManifestError::InvalidIndent(formatting.indent.clone()));
        }

        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(formatting.indent.as_bytes());
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        manifest.serialize(&mut serializer)?;

        let mut text = String::from_utf8(buf)?;
        if formatting.trailing_newline && !text.ends_with('\n') {
            text.push('\n');
        }
        Ok(text)
    }

    /// Merges a partial update into a copy of `original`.
    ///
    /// See [`apply_update`] for the merge rules.
    pub fn update(&self, original: &Manifest, updates: &ManifestUpdate) -> Manifest {
        tracing::debug!(fields = updates.len(), "applying manifest update");
        apply_update(original, updates)
    }

    /// Classifies the manifest as an extension or a plain package.
    pub fn detect_extension(&self, manifest: &Manifest) -> ExtensionDetection {
        ExtensionDetection::from_manifest(manifest)
    }

    /// Adds the minimum fields a VS Code extension needs.
    ///
    /// An existing engine constraint, activation event list, or contribution
    /// object is left as-is.
    pub fn initialize_as_extension(&self, manifest: &Manifest) -> Manifest {
        let mut updates = ManifestUpdate::new();

        match manifest.get("engines") {
            Some(Value::Object(engines)) => {
                if !engines.get("vscode").is_some_and(is_truthy) {
                    let mut engines = engines.clone();
                    engines.insert("vscode".to_string(), json!(self.config.default_engine));
                    updates = updates.set("engines", Value::Object(engines));
                }
            }
            _ => {
                updates = updates.set("engines", json!({ "vscode": self.config.default_engine }));
            }
        }

        if manifest.get("activationEvents").map_or(true, Value::is_null) {
            updates = updates.set("activationEvents", json!([]));
        }
        if manifest.get("contributes").map_or(true, Value::is_null) {
            updates = updates.set("contributes", json!({}));
        }

        self.update(manifest, &updates)
    }
}

/// The `serde_json` message without its trailing byte-based position.
fn json_error_message(err: &serde_json::Error) -> String {
    let message = err.to_string();
    let suffix = format!(" at line {} column {}", err.line(), err.column());
    match message.strip_suffix(&suffix) {
        Some(stripped) => stripped.to_string(),
        None => message,
    }
}

fn locate_failure(message: String, position: ErrorPosition, text: &str) -> ParseFailure {
    match position.resolve(text) {
        Some((line, column)) => ParseFailure::at(message, line, column),
        None => ParseFailure::new(message),
    }
}
