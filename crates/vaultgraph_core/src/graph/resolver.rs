//! Reference resolution by exact, case-insensitive title.
//!
//! # Responsibility
//! - Normalize raw `[[wikilink]]`/plain-title references.
//! - Map normalized titles to canonical Project/Area records.
//!
//! # Invariants
//! - No fuzzy matching: a reference either equals a normalized title or is
//!   unresolved.
//! - When titles collide, the last inserted record wins; the collision is
//!   reported through `ambiguity()`, never through failure.

use crate::model::entity::{Area, Entity, Project};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static WIKILINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\[\[(.*)\]\]\s*$").expect("valid wikilink regex"));

/// Strips an optional `[[...]]` wrapper and surrounding whitespace.
pub fn strip_wikilink(raw: &str) -> &str {
    let inner = match WIKILINK_RE.captures(raw) {
        Some(caps) => caps.get(1).map_or("", |m| m.as_str()),
        None => raw,
    };
    inner.trim()
}

/// Normalizes one raw reference for title lookup.
///
/// Strips an optional `[[...]]` wrapper, trims, and lowercases. Returns `None`
/// for missing or blank input.
pub fn normalize(raw: Option<&str>) -> Option<String> {
    let normalized = strip_wikilink(raw?).to_lowercase();
    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}

/// Title collision details for one normalized title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ambiguity<'a> {
    /// Normalized title shared by several records.
    pub title: String,
    /// Number of records sharing the title.
    pub matches: usize,
    /// Path of the record resolution picks.
    pub chosen_path: &'a str,
}

struct TitleEntry<'a, T> {
    winner: &'a T,
    matches: usize,
}

/// Normalized-title index over one record kind.
pub struct TitleIndex<'a, T: Entity> {
    entries: HashMap<String, TitleEntry<'a, T>>,
}

impl<'a, T: Entity> TitleIndex<'a, T> {
    /// Indexes records in order; later duplicates replace earlier ones.
    pub fn build(records: impl IntoIterator<Item = &'a T>) -> Self {
        let mut entries: HashMap<String, TitleEntry<'a, T>> = HashMap::new();
        for record in records {
            let Some(key) = normalize(Some(record.title())) else {
                continue;
            };
            entries
                .entry(key)
                .and_modify(|entry| {
                    entry.winner = record;
                    entry.matches += 1;
                })
                .or_insert(TitleEntry {
                    winner: record,
                    matches: 1,
                });
        }
        Self { entries }
    }

    /// Resolves one raw reference; `None` means unresolved.
    pub fn resolve(&self, raw: Option<&str>) -> Option<&'a T> {
        let key = normalize(raw)?;
        self.entries.get(&key).map(|entry| entry.winner)
    }

    /// Reports a title collision behind `raw`, if any.
    pub fn ambiguity(&self, raw: Option<&str>) -> Option<Ambiguity<'a>> {
        let key = normalize(raw)?;
        let entry = self.entries.get(&key)?;
        if entry.matches < 2 {
            return None;
        }
        Some(Ambiguity {
            title: key,
            matches: entry.matches,
            chosen_path: entry.winner.path(),
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Project and Area title indexes for one set of records.
pub struct ReferenceResolver<'a> {
    projects: TitleIndex<'a, Project>,
    areas: TitleIndex<'a, Area>,
}

impl<'a> ReferenceResolver<'a> {
    pub fn new(
        projects: impl IntoIterator<Item = &'a Project>,
        areas: impl IntoIterator<Item = &'a Area>,
    ) -> Self {
        Self {
            projects: TitleIndex::build(projects),
            areas: TitleIndex::build(areas),
        }
    }

    pub fn resolve_project(&self, raw: Option<&str>) -> Option<&'a Project> {
        self.projects.resolve(raw)
    }

    pub fn resolve_area(&self, raw: Option<&str>) -> Option<&'a Area> {
        self.areas.resolve(raw)
    }

    pub fn project_ambiguity(&self, raw: Option<&str>) -> Option<Ambiguity<'a>> {
        self.projects.ambiguity(raw)
    }

    pub fn area_ambiguity(&self, raw: Option<&str>) -> Option<Ambiguity<'a>> {
        self.areas.ambiguity(raw)
    }
}
