//! In-batch duplicate suppression.
//!
//! Wire services and search feeds routinely surface the same item under
//! one run; the store-level hash check handles cross-run duplicates, this
//! pass handles intra-batch ones before any store round-trip.

use std::collections::HashSet;

use presswatch_core::ClassifiedItem;

/// Survivors plus how many duplicates were dropped.
#[derive(Debug)]
pub struct DedupOutcome {
    pub items: Vec<ClassifiedItem>,
    pub duplicates_removed: usize,
}

/// Drop items whose dedup key (guid when present, else link) was already
/// seen. First occurrence wins; survivor order is input order.
#[must_use]
pub fn remove_duplicates(mut items: Vec<ClassifiedItem>) -> DedupOutcome {
    let before = items.len();
    let mut seen = HashSet::new();
    items.retain(|classified| seen.insert(classified.item.dedup_key().to_string()));
    let duplicates_removed = before - items.len();
    DedupOutcome {
        items,
        duplicates_removed,
    }
}
