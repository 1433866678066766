//! Folder normalization and joining.
//!
//! Names are `/`-separated strings rather than `Path`s: the same rules apply to
//! local folders and to remote object keys, and the output must be predictable
//! byte for byte from the inputs on every platform.

use std::path::{Path, PathBuf};

use crate::errors::BlueprintError;

/// Separator used for folders and object keys.
pub const SEPARATOR: char = '/';

/// Strip leading/trailing separators, then collapse duplicates and resolve
/// `.`/`..` segments.
///
/// Empty input stays empty (meaning "the root location"), which is distinct from
/// `"."`: a non-empty input that collapses to nothing normalizes to `"."`.
pub fn normalize_folder(folder: &str) -> String {
    let trimmed = folder.trim_matches(SEPARATOR);
    if trimmed.is_empty() {
        return String::new();
    }
    normalize(trimmed)
}

/// Combine `folder` and `file` with exactly one separator, then normalize.
///
/// An empty folder returns the (normalized) file unchanged. A leading separator
/// on the combined value is kept, so `"/key"` never silently turns into `"key"`.
pub fn join(folder: &str, file: &str) -> String {
    if folder.is_empty() {
        return normalize(file);
    }
    normalize(&format!("{folder}{SEPARATOR}{file}"))
}

/// Last separator-delimited segment of `name`.
pub fn base_name(name: &str) -> &str {
    name.rsplit(SEPARATOR).next().unwrap_or(name)
}

/// Map a `/`-separated name onto the filesystem under `root`.
///
/// Empty and `.` segments are skipped, so a rooted name still lands inside
/// `root`. A `..` segment would leave `root` and is refused.
pub fn path_under_root(root: &Path, name: &str, field: &'static str) -> Result<PathBuf, BlueprintError> {
    let mut path = root.to_path_buf();
    for segment in name.split(SEPARATOR) {
        match segment {
            "" | "." => {}
            ".." => {
                return Err(BlueprintError::InvalidInput {
                    field,
                    reason: format!("'{name}' points outside {}", root.display()),
                });
            }
            _ => path.push(segment),
        }
    }
    Ok(path)
}

/// Lexical normalization; never touches the filesystem.
fn normalize(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }
    let rooted = path.starts_with(SEPARATOR);

    let mut parts: Vec<&str> = Vec::new();
    for segment in path.split(SEPARATOR) {
        match segment {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|p| *p != "..") {
                    parts.pop();
                } else if !rooted {
                    // `..` above the root of a rooted key is dropped
                    parts.push("..");
                }
            }
            other => parts.push(other),
        }
    }

    let body = parts.join("/");
    match (rooted, body.is_empty()) {
        (true, _) => format!("{SEPARATOR}{body}"),
        (false, true) => ".".to_string(),
        (false, false) => body,
    }
}
