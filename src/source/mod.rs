//! Sources: where candidates come from.
//!
//! A `Source` enumerates the items under a location, looks up a single literal
//! name, and opens an item for reading. Local folders and object stores both
//! present their items as `/`-separated names relative to the source root.

mod local;
mod memory;
mod paged;

pub use local::LocalSource;
pub use memory::MemoryStore;
pub use paged::{collect_all_pages, Page, PagedListing};

use std::io::Read;
use std::path::{Path, PathBuf};

use crate::errors::BlueprintError;

/// Opaque locator for a candidate inside its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handle {
    /// Local filesystem path.
    Path(PathBuf),
    /// Object key in a key-namespaced store.
    Key(String),
}

/// One discoverable item at the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    name: String,
    handle: Handle,
}

impl Candidate {
    pub fn new(name: impl Into<String>, handle: Handle) -> Self {
        Self {
            name: name.into(),
            handle,
        }
    }

    /// Candidate backed by a local file.
    pub fn path(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::new(name, Handle::Path(path.into()))
    }

    /// Candidate whose handle is its own key.
    pub fn key(key: impl Into<String>) -> Self {
        let key = key.into();
        Self::new(key.clone(), Handle::Key(key))
    }

    /// Name relative to the source root, `/`-separated.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    /// Local path, when the candidate lives on the filesystem.
    pub fn local_path(&self) -> Option<&Path> {
        match &self.handle {
            Handle::Path(p) => Some(p),
            Handle::Key(_) => None,
        }
    }
}

/// Read side of a transfer.
pub trait Source: Send + Sync {
    /// Human-readable description used in logs.
    fn describe(&self) -> String;

    /// Every item under `location`, across all pages. Order is whatever the
    /// backend produces.
    fn enumerate_candidates(&self, location: &str) -> Result<Vec<Candidate>, BlueprintError>;

    /// A single item by its literal name; `NotFound` when it does not exist.
    fn lookup(&self, name: &str) -> Result<Candidate, BlueprintError>;

    /// Open an item for reading.
    fn open(&self, candidate: &Candidate) -> Result<Box<dyn Read + Send + '_>, BlueprintError>;
}
