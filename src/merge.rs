//! Merge and dedup engine for canonical component lists.
//!
//! Combines an ordered sequence of independently normalized lists into
//! one, resolving identity collisions and merging conflicting fields with
//! deterministic rules:
//!
//! - components are "the same" when they share the identity key
//!   `name@version`;
//! - dependency sets union, `cveCount` takes the max, risk only escalates;
//! - a generic placeholder description is replaced once by the first
//!   specific incoming one and never overwritten again;
//! - all other fields keep their first-seen values permanently;
//! - a raw id already issued for a different key is disambiguated by
//!   appending `-{sourceIndex}`.
//!
//! Output order is first-seen-key order.

use crate::model::CanonicalComponent;
use indexmap::IndexMap;
use std::collections::HashSet;

/// Engine combining normalized component lists.
///
/// Stateless; every call builds and returns data local to that call, so
/// concurrent callers need no synchronization.
#[derive(Debug, Default)]
pub struct MergeEngine;

impl MergeEngine {
    /// Create a new merge engine.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Merge an ordered sequence of canonical component lists into one.
    ///
    /// The merge itself cannot fail: every conflict has a resolution rule.
    #[must_use]
    pub fn merge(&self, sources: &[Vec<CanonicalComponent>]) -> Vec<CanonicalComponent> {
        let mut merged: IndexMap<String, CanonicalComponent> = IndexMap::new();
        let mut issued_ids: HashSet<String> = HashSet::new();

        for (source_index, source) in sources.iter().enumerate() {
            for component in source {
                let key = component.identity_key();

                if let Some(existing) = merged.get_mut(&key) {
                    merge_into(existing, component);
                } else {
                    let mut entry = component.clone();
                    // Same raw id, different identity: another source
                    // already claimed this id for a different component.
                    if issued_ids.contains(&entry.id) {
                        let disambiguated = format!("{}-{}", entry.id, source_index);
                        tracing::debug!(
                            raw_id = %component.id,
                            id = %disambiguated,
                            "disambiguating colliding component id"
                        );
                        entry.id = disambiguated;
                    }
                    issued_ids.insert(entry.id.clone());
                    merged.insert(key, entry);
                }
            }
        }

        merged.into_values().collect()
    }

    /// Deduplicate a single flat list.
    ///
    /// Equivalent to merging the list as a sequence of one-element
    /// sources, in input order, with the identical per-key rules.
    #[must_use]
    pub fn dedup(&self, components: &[CanonicalComponent]) -> Vec<CanonicalComponent> {
        let singletons: Vec<Vec<CanonicalComponent>> =
            components.iter().map(|c| vec![c.clone()]).collect();
        self.merge(&singletons)
    }
}

/// Apply the per-key conflict-resolution rules for a repeated identity.
fn merge_into(existing: &mut CanonicalComponent, incoming: &CanonicalComponent) {
    existing
        .dependencies
        .extend(incoming.dependencies.iter().cloned());
    existing.cve_count = existing.cve_count.max(incoming.cve_count);
    existing.risk_level = existing.risk_level.escalate(incoming.risk_level);

    // One-shot description upgrade: only while still generic, only from a
    // specific incoming value.
    if existing.has_generic_description()
        && !incoming.description.is_empty()
        && !incoming.has_generic_description()
    {
        existing.description.clone_from(&incoming.description);
    }
    // license, type, and everything else: first-seen wins, permanently.
}
