//! Summary counts shared by every output mode.
//!
//! # Invariants
//! - Counts are read from graph/timeline output only; nothing here re-runs
//!   visibility, resolution, or classification.
//! - `overdue_count == timeline.overdue.len()` for the same scope.

use crate::graph::builder::RelationshipGraph;
use crate::model::entity::Task;
use crate::model::status::TaskStatus;
use crate::timeline::Timeline;
use serde::Serialize;

/// Counts attached to every context result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ContextStats {
    pub area_count: usize,
    pub project_count: usize,
    pub task_count: usize,
    pub overdue_count: usize,
    pub due_today_count: usize,
    pub in_progress_count: usize,
    /// Present only for project-scoped results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocked_count: Option<usize>,
}

/// Whole-vault counts.
pub fn vault_stats(graph: &RelationshipGraph<'_>, timeline: &Timeline<'_>) -> ContextStats {
    let in_progress_count = graph
        .project_tasks
        .values()
        .chain(graph.direct_area_tasks.values())
        .map(|tasks| count_status(tasks, TaskStatus::InProgress))
        .sum::<usize>()
        + count_status(&graph.orphan_tasks, TaskStatus::InProgress);

    ContextStats {
        area_count: graph.area_projects.len(),
        project_count: graph.project_tasks.len(),
        task_count: graph.task_count(),
        overdue_count: timeline.overdue.len(),
        due_today_count: timeline.due_today.len(),
        in_progress_count,
        blocked_count: None,
    }
}

/// Counts for one area's projects and tasks.
pub fn area_stats(
    graph: &RelationshipGraph<'_>,
    area_path: &str,
    timeline: &Timeline<'_>,
) -> ContextStats {
    let tasks = graph.tasks_in_area(area_path);
    ContextStats {
        area_count: 1,
        project_count: graph.projects_in_area(area_path).len(),
        task_count: tasks.len(),
        overdue_count: timeline.overdue.len(),
        due_today_count: timeline.due_today.len(),
        in_progress_count: count_status(&tasks, TaskStatus::InProgress),
        blocked_count: None,
    }
}

/// Counts for one project's tasks, including the blocked count.
pub fn project_stats(
    graph: &RelationshipGraph<'_>,
    project_path: &str,
    has_area: bool,
    timeline: &Timeline<'_>,
) -> ContextStats {
    let tasks = graph.tasks_in_project(project_path);
    ContextStats {
        area_count: usize::from(has_area),
        project_count: 1,
        task_count: tasks.len(),
        overdue_count: timeline.overdue.len(),
        due_today_count: timeline.due_today.len(),
        in_progress_count: count_status(tasks, TaskStatus::InProgress),
        blocked_count: Some(count_status(tasks, TaskStatus::Blocked)),
    }
}

/// Number of tasks with `status`.
pub fn count_status(tasks: &[&Task], status: TaskStatus) -> usize {
    tasks.iter().filter(|task| task.status == status).count()
}
