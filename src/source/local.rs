//! Local filesystem source.
//! - Enumerates regular files under `root/location` recursively.
//! - Entries are visited sorted by file name within each directory so repeated
//!   runs over the same tree produce the same order.
//!
//! Notes:
//! - Any walk error (permission denied, vanished directory) aborts enumeration;
//!   a partial listing would silently change which items match.

use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::{Component, Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::errors::BlueprintError;
use crate::fs_ops::TEMP_PREFIX;
use crate::naming::{normalize_folder, path_under_root};

use super::{Candidate, Handle, Source};

#[derive(Debug, Clone)]
pub struct LocalSource {
    root: PathBuf,
}

impl LocalSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }


    /// Name of `path` relative to `root`, `/`-separated.
    fn name_of(&self, path: &Path) -> String {
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        rel.components()
            .filter_map(|c| match c {
                Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
                Component::ParentDir => Some("..".to_string()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// In-flight temp files written by a concurrent sink into the same tree.
fn is_transient(entry: &walkdir::DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with(TEMP_PREFIX)
}

fn walk_error(dir: &Path, err: walkdir::Error) -> BlueprintError {
    let path = err.path().unwrap_or(dir).to_path_buf();
    match err.into_io_error() {
        Some(io) => BlueprintError::from_io("enumerate", &path, io),
        None => BlueprintError::InvalidInput {
            field: "source_folder_name",
            reason: format!("filesystem loop detected at {}", path.display()),
        },
    }
}

impl Source for LocalSource {
    fn describe(&self) -> String {
        format!("local:{}", self.root.display())
    }

    fn enumerate_candidates(&self, location: &str) -> Result<Vec<Candidate>, BlueprintError> {
        let dir = path_under_root(&self.root, &normalize_folder(location), "source_folder_name")?;
        let meta = fs::metadata(&dir).map_err(|e| BlueprintError::from_io("stat", &dir, e))?;
        if !meta.is_dir() {
            return Err(BlueprintError::InvalidInput {
                field: "source_folder_name",
                reason: format!("not a directory: {}", dir.display()),
            });
        }

        let mut candidates = Vec::new();
        for entry in WalkDir::new(&dir).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| walk_error(&dir, e))?;
            if !entry.file_type().is_file() || is_transient(&entry) {
                continue;
            }
            let name = self.name_of(entry.path());
            candidates.push(Candidate::path(name, entry.into_path()));
        }
        debug!(dir = %dir.display(), count = candidates.len(), "Enumerated local files");
        Ok(candidates)
    }

    fn lookup(&self, name: &str) -> Result<Candidate, BlueprintError> {
        let path = path_under_root(&self.root, name, "source_file_name")?;
        let meta = fs::metadata(&path).map_err(|e| BlueprintError::from_io("stat", &path, e))?;
        if !meta.is_file() {
            return Err(BlueprintError::InvalidInput {
                field: "source_file_name",
                reason: format!("not a regular file: {}", path.display()),
            });
        }
        Ok(Candidate::path(self.name_of(&path), path))
    }

    fn open(&self, candidate: &Candidate) -> Result<Box<dyn Read + Send + '_>, BlueprintError> {
        match candidate.handle() {
            Handle::Path(path) => {
                let file = File::open(path).map_err(|e| BlueprintError::from_io("open", path, e))?;
                Ok(Box::new(BufReader::new(file)))
            }
            Handle::Key(key) => Err(BlueprintError::InvalidInput {
                field: "candidate",
                reason: format!("'{key}' is not a local file"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn enumerates_nested_files_in_name_order() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("in/b.csv").write_str("b").unwrap();
        temp.child("in/a.csv").write_str("a").unwrap();
        temp.child("in/sub/c.csv").write_str("c").unwrap();

        let source = LocalSource::new(temp.path());
        let names: Vec<_> = source
            .enumerate_candidates("/in/")
            .unwrap()
            .into_iter()
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(names, ["in/a.csv", "in/b.csv", "in/sub/c.csv"]);
    }

    #[test]
    fn empty_location_scans_root() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("x.txt").touch().unwrap();
        let source = LocalSource::new(temp.path());
        assert_eq!(source.enumerate_candidates("").unwrap().len(), 1);
    }

    #[test]
    fn missing_location_is_not_found() {
        let temp = assert_fs::TempDir::new().unwrap();
        let source = LocalSource::new(temp.path());
        let err = source.enumerate_candidates("nope").unwrap_err();
        assert!(matches!(err, BlueprintError::NotFound { .. }));
    }

    #[test]
    fn names_above_root_are_refused() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("inside/x.txt").touch().unwrap();
        let source = LocalSource::new(temp.child("inside").path());
        assert_eq!(source.lookup("../inside/x.txt").unwrap_err().kind(), "invalid_input");
        assert_eq!(source.enumerate_candidates("..").unwrap_err().kind(), "invalid_input");
        assert!(source.lookup("x.txt").is_ok());
    }

    #[test]
    fn lookup_rejects_directories() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("dir").create_dir_all().unwrap();
        let source = LocalSource::new(temp.path());
        let err = source.lookup("dir").unwrap_err();
        assert_eq!(err.kind(), "invalid_input");
    }

    #[test]
    fn open_reads_contents() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("reports/q1.csv").write_str("id,total\n").unwrap();
        let source = LocalSource::new(temp.path());
        let candidate = source.lookup("reports/q1.csv").unwrap();
        assert_eq!(candidate.name(), "reports/q1.csv");

        let mut body = String::new();
        source.open(&candidate).unwrap().read_to_string(&mut body).unwrap();
        assert_eq!(body, "id,total\n");
    }
}
