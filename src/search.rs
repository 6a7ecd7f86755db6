// receipt-generation-service/src/search.rs

use crate::directory::{ContactRecord, Directory};

/// Case-insensitive substring search over every cell of every row.
///
/// An empty query matches nothing (no implicit "show all"). Results keep
/// table order and carry their row index via [`ContactRecord::index`].
/// No accent/whitespace normalization, no ranking: pure containment.
pub fn search<'a>(directory: &'a Directory, query: &str) -> Vec<&'a ContactRecord> {
    if query.is_empty() {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    directory
        .records()
        .iter()
        .filter(|record| record.haystack().contains(&needle))
        .collect()
}
