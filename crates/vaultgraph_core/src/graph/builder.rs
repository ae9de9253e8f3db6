//! Area → Project → Task relationship graph.
//!
//! # Responsibility
//! - Partition active projects into area buckets or orphans.
//! - Partition active tasks into project, direct-area, or orphan buckets.
//!
//! # Invariants
//! - Every input task lands in exactly one destination; placement is decided
//!   once per task and pushed once, so no later filtering pass exists.
//! - Project resolution is attempted before area resolution.
//! - Bucket vectors keep input order.

use crate::graph::resolver::ReferenceResolver;
use crate::model::entity::{Area, Project, Task};
use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;

/// Destination chosen for one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskPlacement<'a> {
    Project(&'a Project),
    Area(&'a Area),
    Orphan,
}

/// Relationship buckets for one set of active records.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RelationshipGraph<'a> {
    /// Area path → projects whose `area_ref` resolves to it.
    pub area_projects: BTreeMap<String, Vec<&'a Project>>,
    /// Project path → tasks whose `project_ref` resolves to it.
    pub project_tasks: BTreeMap<String, Vec<&'a Task>>,
    /// Area path → tasks without a resolvable project but with a resolvable area.
    pub direct_area_tasks: BTreeMap<String, Vec<&'a Task>>,
    pub orphan_projects: Vec<&'a Project>,
    pub orphan_tasks: Vec<&'a Task>,
}

impl<'a> RelationshipGraph<'a> {
    /// Projects attached to one area, empty when none.
    pub fn projects_in_area(&self, area_path: &str) -> &[&'a Project] {
        self.area_projects
            .get(area_path)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Tasks attached to one project, empty when none.
    pub fn tasks_in_project(&self, project_path: &str) -> &[&'a Task] {
        self.project_tasks
            .get(project_path)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Tasks attached directly to one area, empty when none.
    pub fn direct_tasks_in_area(&self, area_path: &str) -> &[&'a Task] {
        self.direct_area_tasks
            .get(area_path)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every task reachable from one area: project tasks first, then direct.
    pub fn tasks_in_area(&self, area_path: &str) -> Vec<&'a Task> {
        let mut tasks: Vec<&'a Task> = self
            .projects_in_area(area_path)
            .iter()
            .flat_map(|project| self.tasks_in_project(&project.path).iter().copied())
            .collect();
        tasks.extend(self.direct_tasks_in_area(area_path).iter().copied());
        tasks
    }

    /// Number of tasks across all buckets.
    pub fn task_count(&self) -> usize {
        self.project_tasks.values().map(Vec::len).sum::<usize>()
            + self.direct_area_tasks.values().map(Vec::len).sum::<usize>()
            + self.orphan_tasks.len()
    }
}

/// Builds relationship graphs from active records.
pub struct GraphBuilder<'r, 'a> {
    resolver: &'r ReferenceResolver<'a>,
}

impl<'r, 'a> GraphBuilder<'r, 'a> {
    /// Creates a builder resolving against an index of active records.
    pub fn new(resolver: &'r ReferenceResolver<'a>) -> Self {
        Self { resolver }
    }

    /// Decides the single destination of one task.
    pub fn place_task(&self, task: &Task) -> TaskPlacement<'a> {
        if let Some(project) = self.resolver.resolve_project(task.project_ref.as_deref()) {
            return TaskPlacement::Project(project);
        }
        if let Some(area) = self.resolver.resolve_area(task.area_ref.as_deref()) {
            return TaskPlacement::Area(area);
        }
        TaskPlacement::Orphan
    }

    /// Partitions active records.
    ///
    /// Every area and project passed in gets a (possibly empty) bucket so
    /// callers can index by path without probing.
    pub fn build(
        &self,
        tasks: &[&'a Task],
        projects: &[&'a Project],
        areas: &[&'a Area],
    ) -> RelationshipGraph<'a> {
        let mut graph = RelationshipGraph::default();
        for area in areas {
            graph.area_projects.entry(area.path.clone()).or_default();
            graph.direct_area_tasks.entry(area.path.clone()).or_default();
        }
        for project in projects {
            graph.project_tasks.entry(project.path.clone()).or_default();
        }

        for &project in projects {
            match self.resolver.resolve_area(project.area_ref.as_deref()) {
                Some(area) => graph
                    .area_projects
                    .entry(area.path.clone())
                    .or_default()
                    .push(project),
                None => graph.orphan_projects.push(project),
            }
        }

        for &task in tasks {
            match self.place_task(task) {
                TaskPlacement::Project(project) => graph
                    .project_tasks
                    .entry(project.path.clone())
                    .or_default()
                    .push(task),
                TaskPlacement::Area(area) => graph
                    .direct_area_tasks
                    .entry(area.path.clone())
                    .or_default()
                    .push(task),
                TaskPlacement::Orphan => graph.orphan_tasks.push(task),
            }
        }

        debug!(
            "event=graph_build module=graph status=ok areas={} projects={} tasks={} orphan_projects={} orphan_tasks={}",
            areas.len(),
            projects.len(),
            tasks.len(),
            graph.orphan_projects.len(),
            graph.orphan_tasks.len()
        );
        graph
    }
}
