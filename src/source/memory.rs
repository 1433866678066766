//! In-memory object store.
//!
//! Keys are plain strings in a flat namespace (no directories, no `..`
//! resolution), listed in lexical order and paginated by a fixed page size with
//! the last returned key as the continuation token. Works as both a source and
//! a sink.

use std::collections::BTreeMap;
use std::io::{Cursor, Read};
use std::ops::Bound;
use std::sync::{PoisonError, RwLock};

use crate::errors::BlueprintError;
use crate::naming::{normalize_folder, ResolvedDestination};
use crate::transfer::Sink;

use super::{collect_all_pages, Candidate, Handle, Page, PagedListing, Source};

pub const DEFAULT_PAGE_SIZE: usize = 1000;

#[derive(Debug)]
pub struct MemoryStore {
    name: String,
    page_size: usize,
    objects: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            page_size: DEFAULT_PAGE_SIZE,
            objects: RwLock::new(BTreeMap::new()),
        }
    }

    /// Items per listing page (at least 1).
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn insert(&self, key: impl Into<String>, body: impl Into<Vec<u8>>) {
        self.objects
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), body.into());
    }

    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.objects
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// All keys in lexical order.
    pub fn keys(&self) -> Vec<String> {
        self.objects
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    fn location(&self, key: &str) -> String {
        format!("memory://{}/{}", self.name, key)
    }
}

impl PagedListing for MemoryStore {
    fn list_page(&self, location: &str, token: Option<&str>) -> Result<Page, BlueprintError> {
        let folder = normalize_folder(location);
        let prefix = if folder.is_empty() {
            String::new()
        } else {
            format!("{folder}/")
        };
        let start = match token {
            Some(t) => Bound::Excluded(t.to_string()),
            None => Bound::Unbounded,
        };

        let objects = self.objects.read().unwrap_or_else(PoisonError::into_inner);
        let mut keys = objects
            .range::<String, _>((start, Bound::Unbounded))
            .map(|(k, _)| k)
            .filter(|k| k.starts_with(&prefix));

        let items: Vec<Candidate> = keys
            .by_ref()
            .take(self.page_size)
            .map(|k| Candidate::key(k.clone()))
            .collect();
        let next_token = if keys.next().is_some() {
            items.last().map(|c| c.name().to_string())
        } else {
            None
        };

        Ok(Page { items, next_token })
    }
}

impl Source for MemoryStore {
    fn describe(&self) -> String {
        format!("memory://{}", self.name)
    }

    fn enumerate_candidates(&self, location: &str) -> Result<Vec<Candidate>, BlueprintError> {
        collect_all_pages(self, location)
    }

    fn lookup(&self, name: &str) -> Result<Candidate, BlueprintError> {
        let objects = self.objects.read().unwrap_or_else(PoisonError::into_inner);
        if objects.contains_key(name) {
            Ok(Candidate::key(name))
        } else {
            Err(BlueprintError::NotFound {
                location: self.location(name),
            })
        }
    }

    fn open(&self, candidate: &Candidate) -> Result<Box<dyn Read + Send + '_>, BlueprintError> {
        match candidate.handle() {
            Handle::Key(key) => match self.get(key) {
                Some(body) => Ok(Box::new(Cursor::new(body))),
                None => Err(BlueprintError::NotFound {
                    location: self.location(key),
                }),
            },
            Handle::Path(path) => Err(BlueprintError::InvalidInput {
                field: "candidate",
                reason: format!("'{}' is not an object key", path.display()),
            }),
        }
    }
}

impl Sink for MemoryStore {
    fn describe(&self) -> String {
        format!("memory://{}", self.name)
    }

    fn write(
        &self,
        reader: &mut dyn Read,
        destination: &ResolvedDestination,
    ) -> Result<u64, BlueprintError> {
        let mut body = Vec::new();
        reader
            .read_to_end(&mut body)
            .map_err(|e| BlueprintError::Transfer {
                name: destination.to_string(),
                reason: e.to_string(),
                transient: true,
            })?;
        let len = body.len() as u64;
        self.insert(destination.as_str(), body);
        Ok(len)
    }
}
