//! Continuation-token pagination.
//!
//! Remote listings return one page at a time plus an optional cursor for the
//! next page. `collect_all_pages` follows the cursor until the backend stops
//! returning one, so callers always see the complete listing.

use std::collections::HashSet;
use tracing::{debug, trace};

use crate::errors::BlueprintError;

use super::Candidate;

/// One page of a listing.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub items: Vec<Candidate>,
    /// Cursor for the next page; `None` (or empty) on the last page.
    pub next_token: Option<String>,
}

/// A backend that lists a location one page at a time.
pub trait PagedListing {
    fn list_page(&self, location: &str, token: Option<&str>) -> Result<Page, BlueprintError>;
}

/// Fetch every page of `location` and return all items in page order.
///
/// A cursor that comes back a second time is an error: following it would loop
/// forever.
pub fn collect_all_pages<L>(listing: &L, location: &str) -> Result<Vec<Candidate>, BlueprintError>
where
    L: PagedListing + ?Sized,
{
    let mut items = Vec::new();
    let mut token: Option<String> = None;
    let mut seen: HashSet<String> = HashSet::new();
    let mut pages = 0usize;

    loop {
        let page = listing.list_page(location, token.as_deref())?;
        pages += 1;
        trace!(location, page = pages, items = page.items.len(), "Fetched listing page");
        items.extend(page.items);

        match page.next_token {
            Some(next) if !next.is_empty() => {
                if !seen.insert(next.clone()) {
                    return Err(BlueprintError::InvalidInput {
                        field: "continuation_token",
                        reason: format!("token '{next}' repeated after {pages} pages"),
                    });
                }
                token = Some(next);
            }
            _ => break,
        }
    }

    debug!(location, pages, items = items.len(), "Collected listing");
    Ok(items)
}
