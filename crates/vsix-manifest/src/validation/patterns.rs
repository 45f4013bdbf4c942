//! Field grammars and the fixed marketplace lists.

use std::sync::OnceLock;

use regex::Regex;

/// Package name: optional `@scope/` prefix, lowercase URL-safe characters.
const PACKAGE_NAME_PATTERN: &str = r"^(?:@[a-z0-9~-][a-z0-9._~-]*/)?[a-z0-9~-][a-z0-9._~-]*$";

/// Semantic Versioning 2.0.0.
const SEMVER_PATTERN: &str = concat!(
    r"^(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)",
    r"(?:-((?:0|[1-9][0-9]*|[0-9]*[a-zA-Z-][0-9a-zA-Z-]*)(?:\.(?:0|[1-9][0-9]*|[0-9]*[a-zA-Z-][0-9a-zA-Z-]*))*))?",
    r"(?:\+([0-9a-zA-Z-]+(?:\.[0-9a-zA-Z-]+)*))?$",
);

/// Engine compatibility range (e.g., `^1.85.0`, `>=1.80.0`).
const ENGINE_RANGE_PATTERN: &str = r"^(\^|>=?|<=?|~)?[0-9]+\.[0-9]+\.[0-9]+(-[a-zA-Z0-9.]+)?$";

/// `#RRGGBB`.
const HEX_COLOR_PATTERN: &str = r"^#[0-9A-Fa-f]{6}$";

/// `publisher.extensionName`.
const EXTENSION_ID_PATTERN: &str = r"^[a-zA-Z0-9-]+\.[a-zA-Z0-9-]+$";

/// Marketplace categories.
pub const VALID_CATEGORIES: &[&str] = &[
    "Azure",
    "Data Science",
    "Debuggers",
    "Education",
    "Extension Packs",
    "Formatters",
    "Keymaps",
    "Language Packs",
    "Linters",
    "Machine Learning",
    "Notebooks",
    "Other",
    "Programming Languages",
    "SCM Providers",
    "Snippets",
    "Testing",
    "Themes",
    "Visualization",
];

/// Recognized activation events. An event is valid if it equals or starts with one of these.
pub const ACTIVATION_EVENT_PREFIXES: &[&str] = &[
    "onLanguage:",
    "onCommand:",
    "onDebug",
    "onDebugInitialConfigurations",
    "onDebugResolve:",
    "workspaceContains:",
    "onFileSystem:",
    "onView:",
    "onUri",
    "onWebviewPanel:",
    "onCustomEditor:",
    "onNotebook:",
    "onAuthenticationRequest:",
    "onStartupFinished",
    "*",
    "onWalkthrough:",
    "onSearch:",
    "onTerminalProfile:",
];

static PACKAGE_NAME_REGEX: OnceLock<Regex> = OnceLock::new();
static SEMVER_REGEX: OnceLock<Regex> = OnceLock::new();
static ENGINE_RANGE_REGEX: OnceLock<Regex> = OnceLock::new();
static HEX_COLOR_REGEX: OnceLock<Regex> = OnceLock::new();
static EXTENSION_ID_REGEX: OnceLock<Regex> = OnceLock::new();

fn regex(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("invalid regex pattern"))
}

/// Checks if a string is a valid package name.
pub fn is_valid_package_name(name: &str) -> bool {
    regex(&PACKAGE_NAME_REGEX, PACKAGE_NAME_PATTERN).is_match(name)
}

/// Checks if a string is a strict semantic version.
pub fn is_valid_semver(version: &str) -> bool {
    regex(&SEMVER_REGEX, SEMVER_PATTERN).is_match(version)
}

/// Checks if a string is a valid `engines.vscode` range.
pub fn is_valid_engine_range(range: &str) -> bool {
    range == "*" || regex(&ENGINE_RANGE_REGEX, ENGINE_RANGE_PATTERN).is_match(range)
}

/// Checks if a string is a `#RRGGBB` color.
pub fn is_hex_color(color: &str) -> bool {
    regex(&HEX_COLOR_REGEX, HEX_COLOR_PATTERN).is_match(color)
}

/// Checks if a string is a `publisher.extensionName` id.
pub fn is_valid_extension_id(id: &str) -> bool {
    regex(&EXTENSION_ID_REGEX, EXTENSION_ID_PATTERN).is_match(id)
}

/// Checks if a category is in the marketplace list.
pub fn is_valid_category(category: &str) -> bool {
    VALID_CATEGORIES.contains(&category)
}

/// Checks if an activation event is recognized.
pub fn is_valid_activation_event(event: &str) -> bool {
    ACTIVATION_EVENT_PREFIXES
        .iter()
        .any(|prefix| event == *prefix || event.starts_with(prefix))
}

/// Checks if the leading digits of a version string give a major version of 1 or more.
///
/// Any digit run with a non-zero digit counts, however long.
pub fn has_stable_major(version: &str) -> bool {
    version
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .any(|c| c != '0')
}
