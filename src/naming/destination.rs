//! Destination-name resolution.
//!
//! Policy:
//! - No explicit name: use the base name of the source item.
//! - Explicit name, single item: use it verbatim.
//! - Explicit name, multiple items: inject a 1-based sequence number at the first
//!   `.` (`out.csv` -> `out_2.csv`), or append `_n` when there is no `.`.
//!
//! Notes:
//! - Only the first `.` counts as the extension boundary (`a.tar.gz` -> `a_1.tar.gz`).
//! - These are textual transforms; nothing here looks at the destination to see
//!   whether a name is already taken.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::errors::BlueprintError;

use super::folder::{base_name, join, normalize_folder, path_under_root};

/// Decide the file-name part of a destination.
pub fn resolve_destination_name(
    explicit_name: Option<&str>,
    source_name: &str,
    sequence_number: Option<usize>,
) -> String {
    match (explicit_name, sequence_number) {
        (None, _) => base_name(source_name).to_string(),
        (Some(name), None) => name.to_string(),
        (Some(name), Some(n)) => enumerate_name(name, n),
    }
}

/// Full destination: normalized folder joined with the resolved file name.
pub fn resolve_full_destination(
    folder: &str,
    explicit_name: Option<&str>,
    source_name: &str,
    sequence_number: Option<usize>,
) -> String {
    join(
        &normalize_folder(folder),
        &resolve_destination_name(explicit_name, source_name, sequence_number),
    )
}

/// Fallback name for an extracted archive: its base name minus `.{extension}`.
pub fn strip_archive_extension(source_name: &str, extension: &str) -> String {
    let name = base_name(source_name);
    let suffix = format!(".{extension}");
    name.replacen(&suffix, "", 1)
}

fn enumerate_name(name: &str, n: usize) -> String {
    match name.find('.') {
        Some(dot) => format!("{}_{n}{}", &name[..dot], &name[dot..]),
        None => format!("{name}_{n}"),
    }
}

/// What the user asked for on the destination side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DestinationSpec {
    folder: String,
    file_name: Option<String>,
}

impl DestinationSpec {
    /// Build a spec; the folder is normalized and an empty file name counts as absent.
    pub fn new(folder: &str, file_name: Option<&str>) -> Self {
        Self {
            folder: normalize_folder(folder),
            file_name: file_name
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        }
    }

    pub fn folder(&self) -> &str {
        &self.folder
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// Resolve the destination for one source item.
    pub fn resolve(&self, source_name: &str, sequence_number: Option<usize>) -> ResolvedDestination {
        ResolvedDestination(join(
            &self.folder,
            &resolve_destination_name(self.file_name(), source_name, sequence_number),
        ))
    }
}

/// Final folder + file key used for a single write.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResolvedDestination(String);

impl ResolvedDestination {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File-name part of the key.
    pub fn file_name(&self) -> &str {
        base_name(&self.0)
    }

    /// Local path of this key under `root`. A key that climbs out of `root`
    /// with `..` is refused.
    pub fn to_path(&self, root: &Path) -> Result<PathBuf, BlueprintError> {
        path_under_root(root, &self.0, "destination_folder_name")
    }
}

impl fmt::Display for ResolvedDestination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
