//! Client-side free-text filtering over a fetched collection.

use crate::catalog::CatalogEntity;

/// True when the trimmed query is a case-insensitive substring of any of the
/// entity's searchable fields. A blank query matches everything.
pub fn matches<E: CatalogEntity>(entity: &E, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    entity
        .searchable_fields()
        .into_iter()
        .flatten()
        .any(|value| value.to_lowercase().contains(&needle))
}

/// Filtered projection of `all`, preserving order. Never mutates `all`.
pub fn filter_entities<'a, E: CatalogEntity>(all: &'a [E], query: &str) -> Vec<&'a E> {
    all.iter().filter(|entity| matches(*entity, query)).collect()
}
