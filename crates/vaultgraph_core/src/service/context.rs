//! Presentation-agnostic projection results.
//!
//! # Responsibility
//! - Carry every relationship, count and timeline membership a formatter
//!   needs, so human/AI/JSON renderers never recompute them.
//! - Offer derived views (reference table, area tree) built only from the
//!   fields already present.
//!
//! # Invariants
//! - Results borrow from the snapshot they were projected from.
//! - Accessors never consult the snapshot again.

use crate::graph::builder::RelationshipGraph;
use crate::model::entity::{Area, Project, Task};
use crate::model::status::{ProjectStatus, TaskStatus};
use crate::references::{ReferenceEntry, ReferenceTableBuilder};
use crate::stats::ContextStats;
use crate::timeline::Timeline;
use crate::tree::{build_area_tree, calculate_area_task_count, AreaTaskCount, TreeNode};
use serde::Serialize;
use std::collections::BTreeMap;

/// Whole-vault projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VaultOverview<'a> {
    pub areas: Vec<&'a Area>,
    pub projects: Vec<&'a Project>,
    pub tasks: Vec<&'a Task>,
    /// `area_projects`, `project_tasks`, `direct_area_tasks`,
    /// `orphan_projects` and `orphan_tasks`.
    #[serde(flatten)]
    pub graph: RelationshipGraph<'a>,
    pub timeline: Timeline<'a>,
    pub stats: ContextStats,
    pub warnings: Vec<String>,
}

impl<'a> VaultOverview<'a> {
    /// Outline for one area, empty when the path is not an active area.
    pub fn area_tree(&self, area_path: &str) -> Vec<TreeNode> {
        build_area_tree(
            self.graph.projects_in_area(area_path),
            &self.graph.project_tasks,
            self.graph.direct_tasks_in_area(area_path),
        )
    }

    /// Direct/via-project task split for one area.
    pub fn area_task_count(&self, area_path: &str) -> AreaTaskCount {
        calculate_area_task_count(
            self.graph.projects_in_area(area_path),
            &self.graph.project_tasks,
            self.graph.direct_tasks_in_area(area_path),
        )
    }

    pub fn reference_table(&self) -> Vec<ReferenceEntry> {
        let mut builder = ReferenceTableBuilder::new();
        builder
            .extend(self.areas.iter().copied())
            .extend(self.projects.iter().copied())
            .extend(self.tasks.iter().copied());
        builder.build()
    }
}

/// Projects of one area grouped by status, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ProjectsByStatus<'a> {
    pub in_progress: Vec<&'a Project>,
    pub ready: Vec<&'a Project>,
    pub planning: Vec<&'a Project>,
    pub blocked: Vec<&'a Project>,
    pub paused: Vec<&'a Project>,
    pub done: Vec<&'a Project>,
    /// Projects without a status value.
    pub unspecified: Vec<&'a Project>,
}

impl<'a> ProjectsByStatus<'a> {
    pub fn group(projects: &[&'a Project]) -> Self {
        let mut groups = Self::default();
        for &project in projects {
            let bucket = match project.status {
                Some(ProjectStatus::InProgress) => &mut groups.in_progress,
                Some(ProjectStatus::Ready) => &mut groups.ready,
                Some(ProjectStatus::Planning) => &mut groups.planning,
                Some(ProjectStatus::Blocked) => &mut groups.blocked,
                Some(ProjectStatus::Paused) => &mut groups.paused,
                Some(ProjectStatus::Done) => &mut groups.done,
                None => &mut groups.unspecified,
            };
            bucket.push(project);
        }
        groups
    }
}

/// One area's projects and tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaContext<'a> {
    pub area: &'a Area,
    pub projects: Vec<&'a Project>,
    /// Project path → tasks, for this area's projects only.
    pub project_tasks: BTreeMap<String, Vec<&'a Task>>,
    pub direct_tasks: Vec<&'a Task>,
    pub projects_by_status: ProjectsByStatus<'a>,
    pub timeline: Timeline<'a>,
    pub stats: ContextStats,
    pub warnings: Vec<String>,
}

impl<'a> AreaContext<'a> {
    pub fn tree(&self) -> Vec<TreeNode> {
        build_area_tree(&self.projects, &self.project_tasks, &self.direct_tasks)
    }

    pub fn task_count(&self) -> AreaTaskCount {
        calculate_area_task_count(&self.projects, &self.project_tasks, &self.direct_tasks)
    }

    pub fn reference_table(&self) -> Vec<ReferenceEntry> {
        let mut builder = ReferenceTableBuilder::new();
        builder
            .add(self.area)
            .extend(self.projects.iter().copied())
            .extend(self.project_tasks.values().flatten().copied())
            .extend(self.direct_tasks.iter().copied());
        builder.build()
    }
}

/// Tasks of one project grouped by status, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TasksByStatus<'a> {
    pub in_progress: Vec<&'a Task>,
    pub blocked: Vec<&'a Task>,
    pub ready: Vec<&'a Task>,
    pub inbox: Vec<&'a Task>,
}

impl<'a> TasksByStatus<'a> {
    /// Groups open tasks; closed statuses have no group.
    pub fn group(tasks: &[&'a Task]) -> Self {
        let mut groups = Self::default();
        for &task in tasks {
            match task.status {
                TaskStatus::InProgress => groups.in_progress.push(task),
                TaskStatus::Blocked => groups.blocked.push(task),
                TaskStatus::Ready => groups.ready.push(task),
                TaskStatus::Inbox => groups.inbox.push(task),
                TaskStatus::Icebox | TaskStatus::Dropped | TaskStatus::Done => {}
            }
        }
        groups
    }
}

/// One project's tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectContext<'a> {
    pub project: &'a Project,
    pub area: Option<&'a Area>,
    pub tasks: Vec<&'a Task>,
    pub tasks_by_status: TasksByStatus<'a>,
    /// Resolved `blocked_by` projects, in reference order.
    pub blocked_by: Vec<&'a Project>,
    pub timeline: Timeline<'a>,
    pub stats: ContextStats,
    pub warnings: Vec<String>,
}

impl<'a> ProjectContext<'a> {
    pub fn reference_table(&self) -> Vec<ReferenceEntry> {
        let mut builder = ReferenceTableBuilder::new();
        builder.add(self.project);
        if let Some(area) = self.area {
            builder.add(area);
        }
        builder
            .extend(self.tasks.iter().copied())
            .extend(self.blocked_by.iter().copied());
        builder.build()
    }
}

/// One task with its resolved parents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskContext<'a> {
    pub task: &'a Task,
    pub project: Option<&'a Project>,
    /// Project's area when it has one, otherwise the task's own area.
    pub area: Option<&'a Area>,
    pub warnings: Vec<String>,
}

impl<'a> TaskContext<'a> {
    pub fn reference_table(&self) -> Vec<ReferenceEntry> {
        let mut builder = ReferenceTableBuilder::new();
        builder.add(self.task);
        if let Some(project) = self.project {
            builder.add(project);
        }
        if let Some(area) = self.area {
            builder.add(area);
        }
        builder.build()
    }
}
