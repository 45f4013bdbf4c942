//! Turning a picked file into a manifest field value.

use std::path::{Component, Path, PathBuf};

use crate::protocol::HostMessage;

/// Expresses `selected` relative to the manifest directory `base_dir`.
///
/// Relative inputs are first resolved against the current directory. The
/// result uses `/` separators and starts with `./` or `../`. Paths that share
/// no root with `base_dir` (e.g., another drive) are returned as-is.
pub fn relative_manifest_path(base_dir: &Path, selected: &Path) -> String {
    let base_dir = absolute(base_dir);
    let selected = absolute(selected);
    let base: Vec<Component> = base_dir
        .components()
        .filter(|c| *c != Component::CurDir)
        .collect();
    let target: Vec<Component> = selected
        .components()
        .filter(|c| *c != Component::CurDir)
        .collect();

    let common = base
        .iter()
        .zip(target.iter())
        .take_while(|(a, b)| a == b)
        .count();

    if common == 0 && selected.is_absolute() {
        return selected.to_string_lossy().replace('\\', "/");
    }

    let mut parts: Vec<String> = Vec::new();
    for _ in common..base.len() {
        parts.push("..".to_string());
    }
    for component in &target[common..] {
        parts.push(component.as_os_str().to_string_lossy().into_owned());
    }

    if parts.is_empty() {
        return ".".to_string();
    }
    let relative = parts.join("/");
    if relative.starts_with("../") || relative == ".." {
        relative
    } else {
        format!("./{}", relative)
    }
}

fn absolute(path: &Path) -> PathBuf {
    let path = if path.as_os_str().is_empty() {
        Path::new(".")
    } else {
        path
    };
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Builds the message that hands a picked path back to the form.
pub fn file_picker_result(field: impl Into<String>, base_dir: &Path, selected: &Path) -> HostMessage {
    let path = relative_manifest_path(base_dir, selected);
    tracing::debug!(%path, "file picked");
    HostMessage::FilePickerResult {
        field: field.into(),
        path,
    }
}
