//! Manifest validation.
//!
//! [`validate`] runs every check over the whole document and never stops
//! early: a manifest with three problems yields three findings. Checks that
//! only need one field's value are also reachable through [`validate_field`]
//! for per-keystroke feedback in a form.

mod contributes;
pub mod patterns;


use serde_json::Value;

use crate::error::{Rule, ValidationFinding, ValidationResult};
use crate::manifest::{is_truthy, Manifest};

pub use patterns::{
    is_hex_color, is_valid_activation_event, is_valid_category, is_valid_engine_range,
    is_valid_extension_id, is_valid_package_name, is_valid_semver, ACTIVATION_EVENT_PREFIXES,
    VALID_CATEGORIES,
};

use contributes::{validate_commands, validate_configuration};

/// Longest display name the marketplace shows in full.
pub const MAX_DISPLAY_NAME_LEN: usize = 200;

/// Longest description the marketplace shows in full.
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Validates a manifest and returns every finding.
///
/// # Example
/// ```
/// use serde_json::json;
/// use vsix_manifest::{validate, Manifest};
///
/// let manifest = Manifest::try_from(json!({
///     "name": "my-ext",
///     "version": "1.0",
///     "publisher": "me",
///     "engines": { "vscode": "^1.85.0" }
/// }))
/// .unwrap();
///
/// let result = validate(&manifest);
/// assert!(!result.valid);
/// assert_eq!(result.errors[0].path, "version");
/// ```
pub fn validate(manifest: &Manifest) -> ValidationResult {
    let mut result = ValidationResult::new();

    // Required fields
    validate_required(manifest, &mut result);

    // Field formats
    validate_formats(manifest, &mut result);

    // Categories
    if let Some(categories) = present(manifest.get("categories")) {
        check_categories(categories, &mut result);
    }

    // Contributions
    validate_commands(manifest, &mut result);
    validate_configuration(manifest, &mut result);

    // Activation events
    validate_activation_events(manifest, &mut result);

    // Extension dependencies
    if let Some(deps) = present(manifest.get("extensionDependencies")) {
        check_extension_dependencies(deps, &mut result);
    }

    // Best practices
    check_best_practices(manifest, &mut result);

    result
}

/// Validates a single field value in isolation.
///
/// `field` is the dotted field path as the form names it (e.g.,
/// "engines.vscode"). Checks that need the rest of the document, such as
/// required fields or duplicate command ids, are not run. Unknown fields
/// produce no findings.
pub fn validate_field(field: &str, value: &Value) -> Vec<ValidationFinding> {
    let mut result = ValidationResult::new();

    match field {
        "name" => check_name(value, &mut result),
        "version" => check_version(value, &mut result),
        "publisher" => check_publisher(value, &mut result),
        "engines.vscode" => check_engine(value, &mut result),
        "displayName" => check_length(field, value, MAX_DISPLAY_NAME_LEN, &mut result),
        "description" => check_length(field, value, MAX_DESCRIPTION_LEN, &mut result),
        "icon" if is_truthy(value) => check_icon(value, &mut result),
        "galleryBanner.color" if is_truthy(value) => check_banner_color(value, &mut result),
        "categories" if !value.is_null() => check_categories(value, &mut result),
        "activationEvents" => {
            if let Value::Array(events) = value {
                check_activation_events(events, &mut result);
            } else if !value.is_null() {
                activation_events_not_array(&mut result);
            }
        }
        "extensionDependencies" if !value.is_null() => {
            check_extension_dependencies(value, &mut result)
        }
        _ => {}
    }

    result.into_findings()
}

/// Returns the value if present and not `null`.
fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

/// Returns the value if it is truthy.
fn truthy(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| is_truthy(v))
}

/// Renders a value for a message: strings bare, everything else as JSON.
fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn validate_required(manifest: &Manifest, result: &mut ValidationResult) {
    for (field, message) in [
        ("name", "name is required"),
        ("version", "version is required"),
        ("publisher", "publisher is required for VS Code extensions"),
    ] {
        let is_set = manifest
            .get(field)
            .and_then(Value::as_str)
            .is_some_and(|s| !s.is_empty());
        if !is_set {
            result.add(ValidationFinding::error(Rule::RequiredField, field, message));
        }
    }

    if truthy(manifest.pointer("engines.vscode")).is_none() {
        result.add(ValidationFinding::error(
            Rule::RequiredField,
            "engines.vscode",
            "engines.vscode is required for VS Code extensions",
        ));
    }
}

fn validate_formats(manifest: &Manifest, result: &mut ValidationResult) {
    if let Some(name) = truthy(manifest.get("name")) {
        check_name(name, result);
    }
    if let Some(version) = truthy(manifest.get("version")) {
        check_version(version, result);
    }
    if let Some(engine) = truthy(manifest.pointer("engines.vscode")) {
        check_engine(engine, result);
    }
    if let Some(icon) = truthy(manifest.get("icon")) {
        check_icon(icon, result);
    }
    if let Some(color) = truthy(manifest.pointer("galleryBanner.color")) {
        check_banner_color(color, result);
    }
}

fn check_name(value: &Value, result: &mut ValidationResult) {
    if !value.as_str().is_some_and(is_valid_package_name) {
        result.add(ValidationFinding::error(
            Rule::InvalidName,
            "name",
            "name must be lowercase and can only contain letters, numbers, hyphens, tildes, and underscores",
        ));
    }
}

fn check_version(value: &Value, result: &mut ValidationResult) {
    if !value.as_str().is_some_and(is_valid_semver) {
        result.add(ValidationFinding::error(
            Rule::InvalidVersion,
            "version",
            "version must be a valid semver (e.g., 1.0.0)",
        ));
    }
}

fn check_publisher(value: &Value, result: &mut ValidationResult) {
    if !value.as_str().is_some_and(|s| !s.trim().is_empty()) {
        result.add(ValidationFinding::error(
            Rule::InvalidPublisher,
            "publisher",
            "publisher is required",
        ));
    }
}

fn check_engine(value: &Value, result: &mut ValidationResult) {
    if !value.as_str().is_some_and(is_valid_engine_range) {
        result.add(ValidationFinding::error(
            Rule::InvalidEngine,
            "engines.vscode",
            "engines.vscode must be a valid version range (e.g., ^1.85.0, >=1.80.0)",
        ));
    }
}

fn check_length(field: &str, value: &Value, max: usize, result: &mut ValidationResult) {
    if let Some(s) = value.as_str() {
        if s.chars().count() > max {
            result.add(ValidationFinding::warning(
                Rule::FieldLength,
                field,
                format!("{} should be under {} characters", field, max),
            ));
        }
    }
}

fn check_icon(value: &Value, result: &mut ValidationResult) {
    let is_png = value
        .as_str()
        .is_some_and(|path| path.to_ascii_lowercase().ends_with(".png"));
    if !is_png {
        result.add(ValidationFinding::warning(
            Rule::IconFormat,
            "icon",
            "icon should be a PNG file (128x128 pixels recommended)",
        ));
    }
}

fn check_banner_color(value: &Value, result: &mut ValidationResult) {
    if !value.as_str().is_some_and(is_hex_color) {
        result.add(ValidationFinding::warning(
            Rule::BannerColor,
            "galleryBanner.color",
            "galleryBanner.color should be a valid hex color (e.g., #FF0000)",
        ));
    }
}

fn check_categories(value: &Value, result: &mut ValidationResult) {
    let Some(categories) = value.as_array() else {
        result.add(ValidationFinding::error(
            Rule::InvalidCategory,
            "categories",
            "categories must be an array",
        ));
        return;
    };

    for (i, category) in categories.iter().enumerate() {
        if !category.as_str().is_some_and(is_valid_category) {
            result.add(ValidationFinding::error(
                Rule::InvalidCategory,
                format!("categories[{}]", i),
                format!(
                    "\"{}\" is not a valid VS Code extension category",
                    display(category)
                ),
            ));
        }
    }
}

fn validate_activation_events(manifest: &Manifest, result: &mut ValidationResult) {
    match present(manifest.get("activationEvents")) {
        Some(Value::Array(events)) if !events.is_empty() => {
            check_activation_events(events, result);
        }
        Some(Value::Array(_)) | None => {
            let has_commands = manifest.commands().is_some_and(|c| !c.is_empty());
            if has_commands {
                result.add(ValidationFinding::info(
                    Rule::ImplicitActivation,
                    "activationEvents",
                    "No activation events specified. Extension will use implicit activation from contributions.",
                ));
            }
        }
        Some(_) => activation_events_not_array(result),
    }
}

fn check_activation_events(events: &[Value], result: &mut ValidationResult) {
    for (i, event) in events.iter().enumerate() {
        let path = format!("activationEvents[{}]", i);

        match event.as_str() {
            Some("*") => result.add(ValidationFinding::warning(
                Rule::StartupActivation,
                path,
                "Using \"*\" activates the extension on startup which can impact VS Code performance",
            )),
            Some(event) if is_valid_activation_event(event) => {}
            _ => result.add(ValidationFinding::error(
                Rule::InvalidActivationEvent,
                path,
                format!("Invalid activation event: {}", display(event)),
            )),
        }
    }
}

fn activation_events_not_array(result: &mut ValidationResult) {
    result.add(ValidationFinding::error(
        Rule::InvalidActivationEvent,
        "activationEvents",
        "activationEvents must be an array",
    ));
}

fn check_extension_dependencies(value: &Value, result: &mut ValidationResult) {
    let Some(deps) = value.as_array() else {
        result.add(ValidationFinding::warning(
            Rule::DependencyId,
            "extensionDependencies",
            "extensionDependencies must be an array of extension ids",
        ));
        return;
    };

    for (i, dep) in deps.iter().enumerate() {
        if !dep.as_str().is_some_and(is_valid_extension_id) {
            result.add(ValidationFinding::warning(
                Rule::DependencyId,
                format!("extensionDependencies[{}]", i),
                format!(
                    "Extension dependency \"{}\" should be in format: publisher.extensionName",
                    display(dep)
                ),
            ));
        }
    }
}

fn check_best_practices(manifest: &Manifest, result: &mut ValidationResult) {
    for (field, message) in [
        ("displayName", "Consider adding a displayName for better marketplace visibility"),
        ("description", "Consider adding a description; it is shown in the marketplace"),
        ("repository", "Consider adding a repository URL for open source projects"),
        ("icon", "Consider adding an icon for better marketplace visibility"),
    ] {
        if truthy(manifest.get(field)).is_none() {
            result.add(ValidationFinding::info(Rule::BestPractice, field, message));
        }
    }

    let has_categories = match truthy(manifest.get("categories")) {
        Some(Value::Array(categories)) => !categories.is_empty(),
        Some(_) => true,
        None => false,
    };
    if !has_categories {
        result.add(ValidationFinding::info(
            Rule::BestPractice,
            "categories",
            "Consider adding categories to help users find your extension",
        ));
    }

    let preview = truthy(manifest.get("preview")).is_some();
    let stable = manifest.version().is_some_and(patterns::has_stable_major);
    if preview && stable {
        result.add(ValidationFinding::info(
            Rule::BestPractice,
            "preview",
            "Extension is marked as preview but version is >= 1.0.0. Consider removing preview flag.",
        ));
    }
}
