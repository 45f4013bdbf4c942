//! Classifies a `package.json` as a VS Code extension or a plain package.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::manifest::{is_truthy, Manifest};

/// Signals that a manifest describes a VS Code extension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionDetection {
    /// True if any of the extension-only signals is present.
    pub is_extension: bool,
    /// `engines.vscode` is set.
    pub has_engines_vscode: bool,
    /// `contributes` has at least one key.
    pub has_contributes: bool,
    /// `activationEvents` is a non-empty array.
    pub has_activation_events: bool,
    /// `main` is set.
    pub has_main: bool,
    /// `browser` is set.
    pub has_browser: bool,
}

impl ExtensionDetection {
    /// Derives the detection flags from a manifest.
    ///
    /// `main` and `browser` are recorded but do not make a package an
    /// extension on their own; plain libraries declare them too.
    pub fn from_manifest(manifest: &Manifest) -> Self {
        let has_engines_vscode = manifest
            .pointer("engines.vscode")
            .is_some_and(is_truthy);
        let has_contributes = manifest
            .get("contributes")
            .and_then(Value::as_object)
            .is_some_and(|c| !c.is_empty());
        let has_activation_events = manifest
            .get("activationEvents")
            .and_then(Value::as_array)
            .is_some_and(|events| !events.is_empty());
        let has_main = manifest.get("main").is_some_and(is_truthy);
        let has_browser = manifest.get("browser").is_some_and(is_truthy);

        Self {
            is_extension: has_engines_vscode || has_contributes || has_activation_events,
            has_engines_vscode,
            has_contributes,
            has_activation_events,
            has_main,
            has_browser,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn detect(value: Value) -> ExtensionDetection {
        ExtensionDetection::from_manifest(&Manifest::try_from(value).unwrap())
    }

    #[test]
    fn test_plain_package_is_not_extension() {
        let d = detect(json!({ "name": "lib", "version": "1.0.0", "publisher": "me" }));
        assert!(!d.is_extension);
        assert_eq!(d, ExtensionDetection::default());
    }

    #[test]
    fn test_engines_vscode_makes_extension() {
        let d = detect(json!({
            "name": "lib",
            "version": "1.0.0",
            "publisher": "me",
            "engines": { "vscode": "^1.85.0" }
        }));
        assert!(d.is_extension);
        assert!(d.has_engines_vscode);
    }

    #[test]
    fn test_main_alone_is_not_extension() {
        let d = detect(json!({ "name": "lib", "main": "./index.js", "browser": "./web.js" }));
        assert!(d.has_main);
        assert!(d.has_browser);
        assert!(!d.is_extension);
    }

    #[test]
    fn test_empty_signals_do_not_count() {
        let d = detect(json!({
            "engines": { "vscode": "", "node": ">=18" },
            "contributes": {},
            "activationEvents": []
        }));
        assert!(!d.has_engines_vscode);
        assert!(!d.has_contributes);
        assert!(!d.has_activation_events);
        assert!(!d.is_extension);
    }

    #[test]
    fn test_contributes_or_activation_events_make_extension() {
        assert!(detect(json!({ "contributes": { "commands": [] } })).is_extension);
        assert!(detect(json!({ "activationEvents": ["onStartupFinished"] })).is_extension);
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(ExtensionDetection::default()).unwrap();
        assert!(json.get("isExtension").is_some());
        assert!(json.get("hasEnginesVscode").is_some());
    }
}
