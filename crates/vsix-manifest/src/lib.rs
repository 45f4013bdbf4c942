//! VS Code Extension Manifest Library
//!
//! This crate parses, edits, validates, and re-serializes VS Code extension
//! manifests (`package.json`) without disturbing the fields an edit does not
//! touch.
//!
//! # Overview
//!
//! Editing a manifest is a read-modify-write cycle:
//!
//! - **Parse**: raw text becomes a [`Manifest`] (an ordered map of JSON values)
//!   plus the [`Formatting`] it was written with, or a [`ParseFailure`] with a
//!   line and column.
//! - **Update**: a [`ManifestUpdate`] is merged into the parsed value, producing
//!   a new manifest.
//! - **Serialize**: the new manifest is written back with the captured
//!   formatting, so untouched content is reproduced exactly.
//!
//! Alongside, [`validate`] reports errors, warnings, and suggestions, and
//! [`ExtensionDetection`] tells an extension manifest from a plain package.
//!
//! # Example
//!
//! ```
//! use vsix_manifest::{validate, ManifestService, ManifestUpdate};
//!
//! let service = ManifestService::default();
//! let text = "{\n    \"name\": \"my-ext\",\n    \"version\": \"0.0.1\"\n}\n";
//!
//! let parsed = service.parse(text).into_result().unwrap();
//! let updated = service.update(&parsed.manifest, &ManifestUpdate::new().set("version", "0.0.2"));
//! let output = service.serialize(&updated, &parsed.formatting).unwrap();
//!
//! assert_eq!(output, text.replace("0.0.1", "0.0.2"));
//!
//! let result = validate(&updated);
//! assert!(!result.valid); // publisher and engines.vscode are missing
//! ```
//!
//! # Modules
//!
//! - [`error`]: Parse failures, validation findings, and error types
//! - [`format`]: Formatting capture and error position translation
//! - [`manifest`]: The manifest document value
//! - [`update`]: Partial updates and the merge that applies them
//! - [`detection`]: Extension detection
//! - [`service`]: The parse / serialize / update pipeline
//! - [`validation`]: Manifest validation

pub mod detection;
pub mod error;
pub mod format;
pub mod manifest;
pub mod service;
pub mod update;
pub mod validation;

// Re-export commonly used types at the crate root
pub use detection::ExtensionDetection;
pub use error::{ManifestError, ParseFailure, Rule, Severity, ValidationFinding, ValidationResult};
pub use format::{
    detect_indentation, is_valid_indent, offset_to_line_column, ErrorPosition, Formatting,
};
pub use manifest::{is_truthy, Manifest};
pub use service::{
    ManifestService, ParseOutcome, ParsedManifest, ServiceConfig, DEFAULT_ENGINE_RANGE,
};
pub use update::{apply_update, FieldUpdate, ManifestUpdate};
pub use validation::{validate, validate_field};

#[cfg(test)]
mod integration_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// A typical extension manifest as generated by `yo code`.
    const GENERATED: &str = r#"{
  "name": "hello-world",
  "displayName": "Hello World",
  "description": "",
  "version": "0.0.1",
  "engines": {
    "vscode": "^1.85.0"
  },
  "categories": [
    "Other"
  ],
  "activationEvents": [],
  "main": "./out/extension.js",
  "contributes": {
    "commands": [
      {
        "command": "hello-world.helloWorld",
        "title": "Hello World"
      }
    ]
  },
  "scripts": {
    "vscode:prepublish": "npm run compile",
    "compile": "tsc -p ./"
  },
  "devDependencies": {
    "@types/vscode": "^1.85.0",
    "typescript": "^5.3.3"
  }
}
"#;

    #[test]
    fn test_generated_manifest_round_trips() {
        let service = ManifestService::default();
        let parsed = service.parse(GENERATED).into_result().unwrap();

        assert_eq!(parsed.formatting, Formatting::default());
        assert_eq!(service.serialize(&parsed.manifest, &parsed.formatting).unwrap(), GENERATED);
    }

    #[test]
    fn test_generated_manifest_snapshot() {
        let service = ManifestService::default();
        let parsed = service.parse(GENERATED).into_result().unwrap();

        let detection = service.detect_extension(&parsed.manifest);
        assert!(detection.is_extension);
        assert!(detection.has_main);
        assert!(!detection.has_activation_events);

        let result = validate(&parsed.manifest);
        let errors: Vec<&str> = result.errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(errors, vec!["publisher"]);
        let info: Vec<&str> = result.info.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(info, vec!["activationEvents", "description", "repository", "icon"]);
    }

    #[test]
    fn test_edit_only_changes_edited_lines() {
        let service = ManifestService::default();
        let parsed = service.parse(GENERATED).into_result().unwrap();

        let update = ManifestUpdate::new()
            .set("publisher", "acme")
            .set("engines", serde_json::json!({ "vscode": "^1.90.0" }));
        let updated = service.update(&parsed.manifest, &update);
        let output = service.serialize(&updated, &parsed.formatting).unwrap();

        let expected = GENERATED
            .replace("\"vscode\": \"^1.85.0\"", "\"vscode\": \"^1.90.0\"")
            .replace(
                "    \"typescript\": \"^5.3.3\"\n  }\n}\n",
                "    \"typescript\": \"^5.3.3\"\n  },\n  \"publisher\": \"acme\"\n}\n",
            );
        assert_eq!(output, expected);
        assert!(validate(&updated).valid);
    }
}
