//! Cross-reference footer shared by all output modes.
//!
//! # Invariants
//! - One row per path; first-seen title wins for duplicated paths.
//! - Rows sort by `(kind, name)`, with path as the final tie-breaker.

use crate::model::entity::{Entity, EntityKind};
use serde::Serialize;
use std::collections::HashSet;

/// One footer row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub path: String,
}

/// Accumulates touched records into a deduplicated table.
#[derive(Debug, Default)]
pub struct ReferenceTableBuilder {
    seen: HashSet<String>,
    entries: Vec<ReferenceEntry>,
}

impl ReferenceTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one record; repeated paths are ignored.
    pub fn add<T: Entity>(&mut self, entity: &T) -> &mut Self {
        if self.seen.insert(entity.path().to_string()) {
            self.entries.push(ReferenceEntry {
                name: entity.title().to_string(),
                kind: T::KIND,
                path: entity.path().to_string(),
            });
        }
        self
    }

    /// Adds every record yielded by `entities`.
    pub fn extend<'e, T: Entity + 'e>(
        &mut self,
        entities: impl IntoIterator<Item = &'e T>,
    ) -> &mut Self {
        for entity in entities {
            self.add(entity);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sorted rows.
    pub fn build(mut self) -> Vec<ReferenceEntry> {
        self.entries.sort_by(|left, right| {
            (left.kind, &left.name, &left.path).cmp(&(right.kind, &right.name, &right.path))
        });
        self.entries
    }
}
