//! Resource mapper
//!
//! Translates human-readable display names to opaque resource ids by
//! scanning a materialized listing. Matching is case-insensitive and the
//! first match wins; duplicate display names are not detected.

use skyfleet_cloud::{Named, ResourceKind};

/// Resolve a display name to an id. Returns `None` (never a partial id)
/// when no candidate matches; the caller decides whether the reference
/// was required.
pub fn resolve_id(kind: ResourceKind, display_name: &str, candidates: &[Named]) -> Option<String> {
    let found = candidates
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(display_name))
        .map(|c| c.id.clone());

    if found.is_none() {
        tracing::warn!("{kind} specified does not exist: {display_name}");
    }

    found
}

/// Reverse mapping for display paths: id back to display name.
pub fn resolve_name(kind: ResourceKind, id: &str, candidates: &[Named]) -> Option<String> {
    let found = candidates
        .iter()
        .find(|c| c.id == id)
        .map(|c| c.name.clone());

    if found.is_none() {
        tracing::warn!("{kind} id specified does not exist: {id}");
    }

    found
}
