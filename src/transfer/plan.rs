//! Planning: turn a request into `(candidate, destination)` pairs.
//!
//! Exact plans look up one literal name. Pattern plans enumerate the source
//! folder, filter by candidate name, and number each destination by its 1-based
//! position in enumeration order.

use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::errors::BlueprintError;
use crate::matching::{compile_pattern, filter_by_pattern, MatchPolicy};
use crate::naming::{join, normalize_folder, DestinationSpec, ResolvedDestination};
use crate::source::{Candidate, Source};

/// Everything a blueprint needs to know about what to move and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub policy: MatchPolicy,
    pub source_folder: String,
    pub source_file_name: String,
    pub destination: DestinationSpec,
}

impl TransferRequest {
    pub fn new(
        policy: MatchPolicy,
        source_folder: &str,
        source_file_name: &str,
        destination: DestinationSpec,
    ) -> Self {
        Self {
            policy,
            source_folder: source_folder.to_string(),
            source_file_name: source_file_name.to_string(),
            destination,
        }
    }
}

/// A single planned write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedTransfer {
    pub candidate: Candidate,
    pub destination: ResolvedDestination,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferPlan {
    pub policy: MatchPolicy,
    pub items: Vec<PlannedTransfer>,
}

impl TransferPlan {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Resolved destinations, in plan order.
    pub fn destinations(&self) -> Vec<&ResolvedDestination> {
        self.items.iter().map(|i| &i.destination).collect()
    }
}

/// Build the plan for `request` against `source`.
///
/// Errors here are fatal for the invocation: a missing Exact item, an invalid
/// pattern, or a folder that cannot be enumerated.
pub fn plan(source: &dyn Source, request: &TransferRequest) -> Result<TransferPlan, BlueprintError> {
    if request.source_file_name.trim().is_empty() {
        return Err(BlueprintError::InvalidInput {
            field: "source_file_name",
            reason: "must not be empty".to_string(),
        });
    }
    let folder = normalize_folder(&request.source_folder);

    let items = match request.policy {
        MatchPolicy::Exact => {
            let name = join(&folder, &request.source_file_name);
            let candidate = source.lookup(&name)?;
            let destination = request.destination.resolve(candidate.name(), None);
            vec![PlannedTransfer {
                candidate,
                destination,
            }]
        }
        MatchPolicy::Pattern => {
            let pattern = compile_pattern(&request.source_file_name)?;
            let all = source.enumerate_candidates(&folder)?;
            let scanned = all.len();
            let matched = filter_by_pattern(all, &pattern);
            info!(
                source = %source.describe(),
                folder = %folder,
                pattern = %request.source_file_name,
                scanned,
                matched = matched.len(),
                "Matched source files"
            );
            matched
                .into_iter()
                .enumerate()
                .map(|(i, candidate)| {
                    let destination = request.destination.resolve(candidate.name(), Some(i + 1));
                    PlannedTransfer {
                        candidate,
                        destination,
                    }
                })
                .collect()
        }
    };

    warn_on_collisions(&items);
    for item in &items {
        debug!(src = %item.candidate.name(), dest = %item.destination, "Planned transfer");
    }
    Ok(TransferPlan {
        policy: request.policy,
        items,
    })
}

/// Same-named files from different folders resolve to the same destination
/// when no explicit name is given; later writes replace earlier ones.
fn warn_on_collisions(items: &[PlannedTransfer]) {
    let mut seen: HashMap<&ResolvedDestination, &str> = HashMap::new();
    for item in items {
        if let Some(first) = seen.insert(&item.destination, item.candidate.name()) {
            warn!(
                dest = %item.destination,
                first = %first,
                second = %item.candidate.name(),
                "Destination collision; the later item will replace the earlier one"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemoryStore;

    fn store() -> MemoryStore {
        let store = MemoryStore::new("test");
        store.insert("in/a.csv", "a");
        store.insert("in/b.csv", "b");
        store.insert("in/notes.txt", "n");
        store.insert("other/c.csv", "c");
        store
    }

    #[test]
    fn pattern_numbers_destinations_in_order() {
        let request = TransferRequest::new(
            MatchPolicy::Pattern,
            "/in/",
            r"\.csv$",
            DestinationSpec::new("out", Some("out.csv")),
        );
        let plan = plan(&store(), &request).unwrap();
        let dests: Vec<_> = plan.destinations().iter().map(|d| d.as_str()).collect();
        assert_eq!(dests, ["out/out_1.csv", "out/out_2.csv"]);
    }

    #[test]
    fn exact_resolves_single_item() {
        let request = TransferRequest::new(
            MatchPolicy::Exact,
            "in",
            "a.csv",
            DestinationSpec::new("", None),
        );
        let plan = plan(&store(), &request).unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.items[0].candidate.name(), "in/a.csv");
        assert_eq!(plan.items[0].destination.as_str(), "a.csv");
    }

    #[test]
    fn exact_missing_is_not_found() {
        let request = TransferRequest::new(
            MatchPolicy::Exact,
            "in",
            "missing.csv",
            DestinationSpec::default(),
        );
        let err = plan(&store(), &request).unwrap_err();
        assert_eq!(err.kind(), "not_found");
    }

    #[test]
    fn zero_matches_is_an_empty_plan() {
        let request = TransferRequest::new(
            MatchPolicy::Pattern,
            "in",
            r"\.parquet$",
            DestinationSpec::default(),
        );
        assert!(plan(&store(), &request).unwrap().is_empty());
    }

    #[test]
    fn invalid_pattern_is_fatal() {
        let request = TransferRequest::new(MatchPolicy::Pattern, "in", "(", DestinationSpec::default());
        assert_eq!(plan(&store(), &request).unwrap_err().kind(), "invalid_pattern");
    }

    #[test]
    fn empty_source_name_is_rejected() {
        let request = TransferRequest::new(MatchPolicy::Exact, "in", "  ", DestinationSpec::default());
        assert_eq!(plan(&store(), &request).unwrap_err().kind(), "invalid_input");
    }
}
