//! The manifest document value.
//!
//! A manifest is an ordered map of arbitrary JSON values. Only a handful of
//! keys carry extension semantics; every other key is kept as-is so that a
//! round trip never loses data the editor does not understand.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An extension manifest (`package.json`).
///
/// Key order is the order of the source document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest(Map<String, Value>);

impl Manifest {
    /// Creates an empty manifest.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Returns the underlying map.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consumes the manifest, returning the underlying map.
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Returns the value at a top-level key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns true if the top-level key is present (even if `null`).
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Iterates over the top-level keys in document order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    /// Returns the number of top-level keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the manifest has no keys.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the value at a dotted path of object keys (e.g., "engines.vscode").
    pub fn pointer(&self, path: &str) -> Option<&Value> {
        let mut parts = path.split('.');
        let mut current = self.0.get(parts.next()?)?;
        for part in parts {
            current = current.as_object()?.get(part)?;
        }
        Some(current)
    }

    // ------------------------------------------------------------------------
    // Typed accessors for the well-known fields
    // ------------------------------------------------------------------------

    /// The package name.
    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    /// The package version.
    pub fn version(&self) -> Option<&str> {
        self.str_field("version")
    }

    /// The marketplace publisher id.
    pub fn publisher(&self) -> Option<&str> {
        self.str_field("publisher")
    }

    /// The marketplace display name.
    pub fn display_name(&self) -> Option<&str> {
        self.str_field("displayName")
    }

    /// The package description.
    pub fn description(&self) -> Option<&str> {
        self.str_field("description")
    }

    /// The icon path.
    pub fn icon(&self) -> Option<&str> {
        self.str_field("icon")
    }

    /// The preview flag.
    pub fn preview(&self) -> Option<bool> {
        self.0.get("preview").and_then(Value::as_bool)
    }

    /// The `engines.vscode` compatibility range.
    pub fn engines_vscode(&self) -> Option<&str> {
        self.pointer("engines.vscode").and_then(Value::as_str)
    }

    /// The `galleryBanner.color` value.
    pub fn gallery_banner_color(&self) -> Option<&str> {
        self.pointer("galleryBanner.color").and_then(Value::as_str)
    }

    /// The declared marketplace categories.
    pub fn categories(&self) -> Option<&Vec<Value>> {
        self.0.get("categories").and_then(Value::as_array)
    }

    /// The Node entry point.
    pub fn main(&self) -> Option<&str> {
        self.str_field("main")
    }

    /// The web entry point.
    pub fn browser(&self) -> Option<&str> {
        self.str_field("browser")
    }

    /// The declared activation events.
    pub fn activation_events(&self) -> Option<&Vec<Value>> {
        self.0.get("activationEvents").and_then(Value::as_array)
    }

    /// The `contributes` object.
    pub fn contributes(&self) -> Option<&Map<String, Value>> {
        self.0.get("contributes").and_then(Value::as_object)
    }

    /// The contributed commands.
    pub fn commands(&self) -> Option<&Vec<Value>> {
        self.contributes()?.get("commands").and_then(Value::as_array)
    }

    /// The declared extension dependencies.
    pub fn extension_dependencies(&self) -> Option<&Vec<Value>> {
        self.0
            .get("extensionDependencies")
            .and_then(Value::as_array)
    }

    /// The repository field (a URL string or an object).
    pub fn repository(&self) -> Option<&Value> {
        self.0.get("repository")
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

impl From<Map<String, Value>> for Manifest {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Manifest> for Value {
    fn from(manifest: Manifest) -> Self {
        Value::Object(manifest.0)
    }
}

impl TryFrom<Value> for Manifest {
    type Error = Value;

    /// Fails with the original value if it is not an object.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(other),
        }
    }
}

/// Truthiness as the manifest's JavaScript consumers see it.
///
/// `null`, `false`, `0`, and `""` are falsy; arrays and objects are always truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Returns the JSON type name of a value.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
