//! Write side of a transfer.

use std::io::Read;
use std::path::PathBuf;
use tracing::trace;

use crate::errors::BlueprintError;
use crate::fs_ops::write_atomically;
use crate::naming::ResolvedDestination;

/// Destination endpoint: receives one body per resolved destination.
pub trait Sink: Send + Sync {
    /// Human-readable description used in logs.
    fn describe(&self) -> String;

    /// Stream `reader` to `destination`, returning the number of bytes written.
    /// An existing item at the same destination is replaced.
    fn write(&self, reader: &mut dyn Read, destination: &ResolvedDestination) -> Result<u64, BlueprintError>;
}

/// Local filesystem sink rooted at a directory.
#[derive(Debug, Clone)]
pub struct LocalSink {
    root: PathBuf,
}

impl LocalSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Sink for LocalSink {
    fn describe(&self) -> String {
        format!("local:{}", self.root.display())
    }

    fn write(&self, reader: &mut dyn Read, destination: &ResolvedDestination) -> Result<u64, BlueprintError> {
        let path = destination.to_path(&self.root)?;
        trace!(dest = %path.display(), "Writing local file");
        write_atomically(reader, &path).map_err(|e| BlueprintError::from_io("write", &path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn writes_under_root_and_creates_folders() {
        let temp = tempfile::tempdir().unwrap();
        let sink = LocalSink::new(temp.path());
        let dest = ResolvedDestination::new("exports/daily/out.csv");
        let n = sink.write(&mut Cursor::new(b"a,b\n".to_vec()), &dest).unwrap();
        assert_eq!(n, 4);
        let written = std::fs::read(temp.path().join("exports/daily/out.csv")).unwrap();
        assert_eq!(written, b"a,b\n");
    }

    #[test]
    fn rooted_key_stays_inside_root() {
        let temp = tempfile::tempdir().unwrap();
        let sink = LocalSink::new(temp.path());
        sink.write(&mut Cursor::new(b"x".to_vec()), &ResolvedDestination::new("/top.txt"))
            .unwrap();
        assert!(temp.path().join("top.txt").is_file());
    }

    #[test]
    fn key_above_root_is_refused() {
        let temp = tempfile::tempdir().unwrap();
        let sink = LocalSink::new(temp.path().join("root"));
        let err = sink
            .write(&mut Cursor::new(b"x".to_vec()), &ResolvedDestination::new("../escaped.txt"))
            .unwrap_err();
        assert_eq!(err.kind(), "invalid_input");
        assert!(!temp.path().join("escaped.txt").exists());
    }
}
