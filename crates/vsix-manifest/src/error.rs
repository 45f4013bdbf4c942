//! Error and finding types for manifest parsing and validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable identifiers for the checks run by the validation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rule {
    /// A required top-level field is missing.
    RequiredField,
    /// `name` is not a valid package name.
    InvalidName,
    /// `version` is not a valid semantic version.
    InvalidVersion,
    /// `publisher` is empty.
    InvalidPublisher,
    /// `engines.vscode` is not a valid version range.
    InvalidEngine,
    /// A category is not in the marketplace category list.
    InvalidCategory,
    /// The icon is not a PNG file.
    IconFormat,
    /// `galleryBanner.color` is not a hex color.
    BannerColor,
    /// A contributed command is missing its id or title.
    CommandField,
    /// A contributed command id was already declared.
    DuplicateCommand,
    /// A configuration key is not prefixed with the extension name.
    ConfigurationPrefix,
    /// A configuration default does not match the declared type.
    ConfigurationDefaultType,
    /// An activation event is not recognized.
    InvalidActivationEvent,
    /// The extension activates on startup (`*`).
    StartupActivation,
    /// No activation events; contributions activate implicitly.
    ImplicitActivation,
    /// An extension dependency id is not `publisher.name`.
    DependencyId,
    /// A display string is longer than the marketplace shows.
    FieldLength,
    /// An optional marketplace field is missing.
    BestPractice,
}

impl Rule {
    /// Returns the rule identifier (e.g., "required-field").
    pub fn as_str(&self) -> &'static str {
        match self {
            Rule::RequiredField => "required-field",
            Rule::InvalidName => "invalid-name",
            Rule::InvalidVersion => "invalid-version",
            Rule::InvalidPublisher => "invalid-publisher",
            Rule::InvalidEngine => "invalid-engine",
            Rule::InvalidCategory => "invalid-category",
            Rule::IconFormat => "icon-format",
            Rule::BannerColor => "banner-color",
            Rule::CommandField => "command-field",
            Rule::DuplicateCommand => "duplicate-command",
            Rule::ConfigurationPrefix => "configuration-prefix",
            Rule::ConfigurationDefaultType => "configuration-default-type",
            Rule::InvalidActivationEvent => "invalid-activation-event",
            Rule::StartupActivation => "startup-activation",
            Rule::ImplicitActivation => "implicit-activation",
            Rule::DependencyId => "dependency-id",
            Rule::FieldLength => "field-length",
            Rule::BestPractice => "best-practice",
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Severity level for validation findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Optional improvements.
    Info,
    /// Likely mistakes.
    Warning,
    /// The manifest violates the required shape.
    Error,
}

/// A single validation outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFinding {
    /// Field locator (e.g., "contributes.commands\[2\].command").
    pub path: String,
    /// Human-readable message.
    pub message: String,
    /// Severity level.
    pub severity: Severity,
    /// The check that produced this finding.
    pub rule: Rule,
}

impl ValidationFinding {
    /// Creates an error-level finding.
    pub fn error(rule: Rule, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(rule, Severity::Error, path, message)
    }

    /// Creates a warning-level finding.
    pub fn warning(rule: Rule, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(rule, Severity::Warning, path, message)
    }

    /// Creates an info-level finding.
    pub fn info(rule: Rule, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(rule, Severity::Info, path, message)
    }

    fn new(
        rule: Rule,
        severity: Severity,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            severity,
            rule,
        }
    }
}

impl std::fmt::Display for ValidationFinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} (at {})", self.rule, self.message, self.path)
    }
}

/// Result of validating a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// True if no error-level findings were produced.
    pub valid: bool,
    /// Error-level findings.
    pub errors: Vec<ValidationFinding>,
    /// Warning-level findings.
    pub warnings: Vec<ValidationFinding>,
    /// Info-level findings.
    pub info: Vec<ValidationFinding>,
}

impl ValidationResult {
    /// Creates an empty, valid result.
    pub fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            info: Vec::new(),
        }
    }

    /// Adds a finding to the list matching its severity.
    pub fn add(&mut self, finding: ValidationFinding) {
        match finding.severity {
            Severity::Info => self.info.push(finding),
            Severity::Warning => self.warnings.push(finding),
            Severity::Error => {
                self.valid = false;
                self.errors.push(finding);
            }
        }
    }

    /// Returns true if there are no errors.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Iterates over all findings: errors, then warnings, then info.
    pub fn findings(&self) -> impl Iterator<Item = &ValidationFinding> {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .chain(self.info.iter())
    }

    /// Consumes the result, returning all findings in severity order.
    pub fn into_findings(self) -> Vec<ValidationFinding> {
        let mut findings = self.errors;
        findings.extend(self.warnings);
        findings.extend(self.info);
        findings
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

/// A malformed manifest, with the location of the problem when known.
///
/// `line` and `column` are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseFailure {
    /// Parser message.
    pub message: String,
    /// Line of the offending token.
    pub line: Option<usize>,
    /// Column of the offending token.
    pub column: Option<usize>,
}

impl ParseFailure {
    /// Creates a failure with no known position.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: None,
            column: None,
        }
    }

    /// Creates a failure at a known position.
    pub fn at(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            message: message.into(),
            line: Some(line),
            column: Some(column),
        }
    }
}

impl std::fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.line, self.column) {
            (Some(line), Some(column)) => {
                write!(f, "{} (line {}, column {})", self.message, line, column)
            }
            _ => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ParseFailure {}

/// Top-level error type for manifest operations.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Indent is empty or holds characters other than spaces and tabs.
    #[error("invalid indent {0:?}: expected a non-empty run of spaces and tabs")]
    InvalidIndent(String),

    /// Serializer produced bytes that are not UTF-8.
    #[error("serialized manifest is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
