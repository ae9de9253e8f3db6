//! Non-fatal data-quality warnings.
//!
//! # Invariants
//! - Warnings are data attached to results; collection never fails.
//! - Each distinct message appears once per result, in discovery order.
//! - Reference messages end with the source path, so same-titled records
//!   with the same broken reference stay distinct.
//! - Logs carry paths and kinds only, never titles or reference text.

use crate::graph::resolver::{normalize, strip_wikilink, Ambiguity, ReferenceResolver};
use crate::model::entity::{Entity, EntityKind, Project, Task};
use log::warn;
use std::collections::HashSet;

/// Ordered, deduplicated warning list.
#[derive(Debug, Default)]
pub struct WarningCollector {
    seen: HashSet<String>,
    messages: Vec<String>,
}

impl WarningCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: String) {
        if self.seen.insert(message.clone()) {
            self.messages.push(message);
        }
    }

    /// Checks a task's project and area references against known records.
    ///
    /// `known` indexes every record in the snapshot, so references to
    /// inactive records do not warn.
    pub fn check_task(&mut self, task: &Task, known: &ReferenceResolver<'_>) {
        let project_ref = task.project_ref.as_deref();
        if normalize(project_ref).is_some() && known.resolve_project(project_ref).is_none() {
            self.unresolved(task, EntityKind::Project, project_ref);
        }
        let area_ref = task.area_ref.as_deref();
        if normalize(area_ref).is_some() && known.resolve_area(area_ref).is_none() {
            self.unresolved(task, EntityKind::Area, area_ref);
        }
    }

    /// Checks a project's area reference against known records.
    pub fn check_project(&mut self, project: &Project, known: &ReferenceResolver<'_>) {
        let area_ref = project.area_ref.as_deref();
        if normalize(area_ref).is_some() && known.resolve_area(area_ref).is_none() {
            self.unresolved(project, EntityKind::Area, area_ref);
        }
    }

    /// Checks a project's `blocked_by` references.
    pub fn check_blockers(&mut self, project: &Project, known: &ReferenceResolver<'_>) {
        for raw in &project.blocked_by {
            if normalize(Some(raw.as_str())).is_some()
                && known.resolve_project(Some(raw.as_str())).is_none()
            {
                warn!(
                    "event=reference_unresolved module=service status=warn path={} kind=blocked_by",
                    project.path
                );
                self.push(format!(
                    "project '{}' blocked by non-existent project '{}' ({})",
                    project.title,
                    strip_wikilink(raw),
                    project.path
                ));
            }
        }
    }

    /// Records a title collision behind one resolution.
    pub fn ambiguity(&mut self, kind: EntityKind, ambiguity: Option<Ambiguity<'_>>) {
        let Some(ambiguity) = ambiguity else {
            return;
        };
        warn!(
            "event=title_ambiguous module=service status=warn kind={} matches={} chosen={}",
            kind.as_str(),
            ambiguity.matches,
            ambiguity.chosen_path
        );
        self.push(format!(
            "ambiguous {kind} title '{}' matches {} {kind}s; using {}",
            ambiguity.title,
            ambiguity.matches,
            ambiguity.chosen_path,
            kind = kind.as_str()
        ));
    }

    /// Records ambiguity for both references of one task.
    pub fn check_task_ambiguity(&mut self, task: &Task, resolver: &ReferenceResolver<'_>) {
        self.ambiguity(
            EntityKind::Project,
            resolver.project_ambiguity(task.project_ref.as_deref()),
        );
        self.ambiguity(
            EntityKind::Area,
            resolver.area_ambiguity(task.area_ref.as_deref()),
        );
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.messages
    }

    fn unresolved<T: Entity>(&mut self, source: &T, target: EntityKind, raw: Option<&str>) {
        warn!(
            "event=reference_unresolved module=service status=warn path={} kind={}",
            source.path(),
            target.as_str()
        );
        self.push(format!(
            "{} '{}' references non-existent {} '{}' ({})",
            T::KIND.as_str(),
            source.title(),
            target.as_str(),
            strip_wikilink(raw.unwrap_or_default()),
            source.path()
        ));
    }
}
