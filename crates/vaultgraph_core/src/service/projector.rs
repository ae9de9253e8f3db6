//! Context projection use-cases.
//!
//! # Responsibility
//! - Run filter → resolve → graph → timeline → stats for one scope.
//! - Attach non-fatal reference warnings to every result.
//!
//! # Invariants
//! - Every entry point is a pure function of snapshot, clock and options.
//! - The entity a context is requested for is always part of its own
//!   graph, even when default visibility would hide it.
//! - Broken references never abort a projection.

use crate::clock::Clock;
use crate::graph::builder::{GraphBuilder, RelationshipGraph};
use crate::graph::filter::ActiveFilter;
use crate::graph::resolver::ReferenceResolver;
use crate::model::entity::{Area, EntityKind, Project, Task};
use crate::model::snapshot::VaultSnapshot;
use crate::options::ProjectionOptions;
use crate::service::context::{
    AreaContext, ProjectContext, ProjectsByStatus, TaskContext, TasksByStatus, VaultOverview,
};
use crate::service::warnings::WarningCollector;
use crate::stats::{area_stats, project_stats, vault_stats};
use crate::timeline::TimelineClassifier;
use log::info;
use std::collections::BTreeMap;

/// Active records plus resolvers and graph for one call.
struct Prepared<'a> {
    tasks: Vec<&'a Task>,
    projects: Vec<&'a Project>,
    areas: Vec<&'a Area>,
    /// Resolves against the records in this scope's graph.
    active: ReferenceResolver<'a>,
    /// Resolves against every record in the snapshot.
    known: ReferenceResolver<'a>,
    graph: RelationshipGraph<'a>,
}

impl<'a> Prepared<'a> {
    /// Active match first, then any record in the snapshot.
    fn resolve_project(&self, raw: Option<&str>) -> Option<&'a Project> {
        self.active
            .resolve_project(raw)
            .or_else(|| self.known.resolve_project(raw))
    }

    fn resolve_area(&self, raw: Option<&str>) -> Option<&'a Area> {
        self.active
            .resolve_area(raw)
            .or_else(|| self.known.resolve_area(raw))
    }
}

/// Stateless orchestrator over one options set.
#[derive(Debug, Clone, Default)]
pub struct ContextProjector {
    options: ProjectionOptions,
}

impl ContextProjector {
    pub fn new(options: ProjectionOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ProjectionOptions {
        &self.options
    }

    /// Full pipeline over every active record.
    pub fn build_vault_overview<'a>(
        &self,
        vault: &'a VaultSnapshot,
        clock: Clock,
    ) -> VaultOverview<'a> {
        let prepared = self.prepare(vault, clock, None, None);
        let timeline = TimelineClassifier::new(clock, &self.options).classify(&prepared.tasks);
        let stats = vault_stats(&prepared.graph, &timeline);

        let mut warnings = WarningCollector::new();
        for &project in &prepared.projects {
            warnings.check_project(project, &prepared.known);
            warnings.ambiguity(
                EntityKind::Area,
                prepared.active.area_ambiguity(project.area_ref.as_deref()),
            );
        }
        for &task in &prepared.tasks {
            warnings.check_task(task, &prepared.known);
            warnings.check_task_ambiguity(task, &prepared.active);
        }

        info!(
            "event=vault_overview module=service status=ok areas={} projects={} tasks={} warnings={}",
            prepared.areas.len(),
            prepared.projects.len(),
            prepared.tasks.len(),
            warnings.len()
        );

        VaultOverview {
            areas: prepared.areas,
            projects: prepared.projects,
            tasks: prepared.tasks,
            graph: prepared.graph,
            timeline,
            stats,
            warnings: warnings.into_vec(),
        }
    }

    /// Scoped to one area's projects and tasks.
    pub fn build_area_context<'a>(
        &self,
        area: &'a Area,
        vault: &'a VaultSnapshot,
        clock: Clock,
    ) -> AreaContext<'a> {
        let prepared = self.prepare(vault, clock, Some(area.path.as_str()), None);
        let graph = &prepared.graph;

        let projects: Vec<&'a Project> = graph.projects_in_area(&area.path).to_vec();
        let project_tasks: BTreeMap<String, Vec<&'a Task>> = projects
            .iter()
            .map(|project| {
                (
                    project.path.clone(),
                    graph.tasks_in_project(&project.path).to_vec(),
                )
            })
            .collect();
        let direct_tasks = graph.direct_tasks_in_area(&area.path).to_vec();

        let scoped_tasks = graph.tasks_in_area(&area.path);
        let timeline = TimelineClassifier::new(clock, &self.options).classify(&scoped_tasks);
        let stats = area_stats(graph, &area.path, &timeline);

        let mut warnings = WarningCollector::new();
        warnings.ambiguity(
            EntityKind::Area,
            prepared.active.area_ambiguity(Some(area.title.as_str())),
        );
        for &task in &scoped_tasks {
            warnings.check_task(task, &prepared.known);
            warnings.check_task_ambiguity(task, &prepared.active);
        }

        info!(
            "event=area_context module=service status=ok path={} projects={} tasks={} warnings={}",
            area.path,
            projects.len(),
            scoped_tasks.len(),
            warnings.len()
        );

        AreaContext {
            area,
            projects_by_status: ProjectsByStatus::group(&projects),
            projects,
            project_tasks,
            direct_tasks,
            timeline,
            stats,
            warnings: warnings.into_vec(),
        }
    }

    /// Scoped to one project's tasks.
    pub fn build_project_context<'a>(
        &self,
        project: &'a Project,
        vault: &'a VaultSnapshot,
        clock: Clock,
    ) -> ProjectContext<'a> {
        let prepared = self.prepare(vault, clock, None, Some(project.path.as_str()));
        let tasks = prepared.graph.tasks_in_project(&project.path).to_vec();
        let area = prepared.resolve_area(project.area_ref.as_deref());

        let mut warnings = WarningCollector::new();
        warnings.ambiguity(
            EntityKind::Project,
            prepared.active.project_ambiguity(Some(project.title.as_str())),
        );
        warnings.check_project(project, &prepared.known);
        warnings.ambiguity(
            EntityKind::Area,
            prepared.active.area_ambiguity(project.area_ref.as_deref()),
        );
        warnings.check_blockers(project, &prepared.known);
        let blocked_by: Vec<&'a Project> = project
            .blocked_by
            .iter()
            .filter_map(|raw| prepared.resolve_project(Some(raw.as_str())))
            .collect();
        for &task in &tasks {
            warnings.check_task(task, &prepared.known);
        }

        let timeline = TimelineClassifier::new(clock, &self.options).classify(&tasks);
        let stats = project_stats(&prepared.graph, &project.path, area.is_some(), &timeline);

        info!(
            "event=project_context module=service status=ok path={} tasks={} warnings={}",
            project.path,
            tasks.len(),
            warnings.len()
        );

        ProjectContext {
            project,
            area,
            tasks_by_status: TasksByStatus::group(&tasks),
            tasks,
            blocked_by,
            timeline,
            stats,
            warnings: warnings.into_vec(),
        }
    }

    /// Resolves one task's parent project and area.
    ///
    /// Parents resolve against active records first, the same index the
    /// overview graph places the task with, and fall back to the whole
    /// snapshot so a task under a done project still shows its parent.
    /// The area comes from the project when the project has one, otherwise
    /// from the task's own reference.
    pub fn build_task_context<'a>(
        &self,
        task: &'a Task,
        vault: &'a VaultSnapshot,
        clock: Clock,
    ) -> TaskContext<'a> {
        let prepared = self.prepare(vault, clock, None, None);
        let project = prepared.resolve_project(task.project_ref.as_deref());
        let project_area =
            project.and_then(|project| prepared.resolve_area(project.area_ref.as_deref()));
        let area = project_area.or_else(|| prepared.resolve_area(task.area_ref.as_deref()));

        let mut warnings = WarningCollector::new();
        warnings.check_task(task, &prepared.known);
        warnings.check_task_ambiguity(task, &prepared.active);
        if let Some(project) = project {
            warnings.check_project(project, &prepared.known);
        }

        info!(
            "event=task_context module=service status=ok path={} has_project={} has_area={} today={}",
            task.path,
            project.is_some(),
            area.is_some(),
            clock.today
        );

        TaskContext {
            task,
            project,
            area,
            warnings: warnings.into_vec(),
        }
    }

    fn prepare<'a>(
        &self,
        vault: &'a VaultSnapshot,
        clock: Clock,
        pinned_area: Option<&str>,
        pinned_project: Option<&str>,
    ) -> Prepared<'a> {
        let filter = ActiveFilter::new(clock.today, &self.options);
        let tasks: Vec<&'a Task> = vault
            .tasks
            .iter()
            .filter(|task| filter.is_active_task(task))
            .collect();
        let projects: Vec<&'a Project> = vault
            .projects
            .iter()
            .filter(|project| {
                filter.is_active_project(project) || pinned_project == Some(project.path.as_str())
            })
            .collect();
        let areas: Vec<&'a Area> = vault
            .areas
            .iter()
            .filter(|area| filter.is_active_area(area) || pinned_area == Some(area.path.as_str()))
            .collect();

        let active = ReferenceResolver::new(projects.iter().copied(), areas.iter().copied());
        let known = ReferenceResolver::new(&vault.projects, &vault.areas);
        let graph = GraphBuilder::new(&active).build(&tasks, &projects, &areas);

        Prepared {
            tasks,
            projects,
            areas,
            active,
            known,
            graph,
        }
    }
}
