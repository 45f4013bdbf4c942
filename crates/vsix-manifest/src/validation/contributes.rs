//! Checks for the `contributes` section.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::error::{Rule, ValidationFinding, ValidationResult};
use crate::manifest::{is_truthy, Manifest};

/// Validates `contributes.commands`.
///
/// Every command needs an id and a title. Each repeat of an id after its
/// first occurrence is flagged at the repeating entry.
pub(super) fn validate_commands(manifest: &Manifest, result: &mut ValidationResult) {
    let Some(commands) = manifest.commands() else {
        return;
    };

    let mut seen: HashSet<String> = HashSet::new();

    for (i, cmd) in commands.iter().enumerate() {
        let id = cmd.get("command").filter(|v| is_truthy(v));
        let title = cmd.get("title").filter(|v| is_truthy(v));

        if id.is_none() {
            result.add(ValidationFinding::error(
                Rule::CommandField,
                format!("contributes.commands[{}].command", i),
                "command id is required",
            ));
        }
        if title.is_none() {
            result.add(ValidationFinding::error(
                Rule::CommandField,
                format!("contributes.commands[{}].title", i),
                "command title is required",
            ));
        }

        if let Some(id) = id {
            let key = match id {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            if seen.contains(&key) {
                result.add(ValidationFinding::warning(
                    Rule::DuplicateCommand,
                    format!("contributes.commands[{}].command", i),
                    format!("duplicate command id: {}", key),
                ));
            } else {
                seen.insert(key);
            }
        }
    }
}

/// Validates `contributes.configuration`, a single object or an array of them.
pub(super) fn validate_configuration(manifest: &Manifest, result: &mut ValidationResult) {
    let Some(config) = manifest.contributes().and_then(|c| c.get("configuration")) else {
        return;
    };

    match config {
        Value::Object(section) => {
            validate_configuration_section(manifest, section, "contributes.configuration", result);
        }
        Value::Array(sections) => {
            for (i, section) in sections.iter().enumerate() {
                if let Some(section) = section.as_object() {
                    let prefix = format!("contributes.configuration[{}]", i);
                    validate_configuration_section(manifest, section, &prefix, result);
                }
            }
        }
        _ => {}
    }
}

fn validate_configuration_section(
    manifest: &Manifest,
    section: &Map<String, Value>,
    prefix: &str,
    result: &mut ValidationResult,
) {
    let Some(properties) = section.get("properties").and_then(Value::as_object) else {
        return;
    };
    let name = manifest.name().filter(|n| !n.is_empty());

    for (key, prop) in properties {
        let path = format!("{}.properties.{}", prefix, key);

        if let Some(name) = name {
            if !key.starts_with(&format!("{}.", name)) {
                result.add(ValidationFinding::warning(
                    Rule::ConfigurationPrefix,
                    &path,
                    format!(
                        "configuration key should be prefixed with the extension name (e.g., {}.{})",
                        name, key
                    ),
                ));
            }
        }

        let Some(prop) = prop.as_object() else {
            continue;
        };
        let Some(default) = prop.get("default") else {
            continue;
        };
        let declared = declared_types(prop.get("type"));
        if declared.is_empty() {
            continue;
        }

        let actual = default_type_names(default);
        if !actual.iter().any(|t| declared.contains(t)) {
            result.add(ValidationFinding::warning(
                Rule::ConfigurationDefaultType,
                format!("{}.default", path),
                format!(
                    "default value type ({}) doesn't match declared type ({})",
                    actual[0],
                    declared.join(" | ")
                ),
            ));
        }
    }
}

/// The `type` of a configuration property: a name or an array of names.
fn declared_types(value: Option<&Value>) -> Vec<&str> {
    match value {
        Some(Value::String(t)) => vec![t.as_str()],
        Some(Value::Array(types)) => types.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    }
}

/// Configuration type names a default value satisfies, most specific last.
///
/// Integral numbers satisfy both `number` and `integer`.
fn default_type_names(value: &Value) -> Vec<&'static str> {
    match value {
        Value::Null => vec!["null"],
        Value::Bool(_) => vec!["boolean"],
        Value::Number(n) => {
            let integral = n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0);
            if integral {
                vec!["number", "integer"]
            } else {
                vec!["number"]
            }
        }
        Value::String(_) => vec!["string"],
        Value::Array(_) => vec!["array"],
        Value::Object(_) => vec!["object"],
    }
}
