use vaultgraph_core::{
    parse_date, Area, AreaStatus, Clock, ContextProjector, EntityKind, Project, ProjectStatus,
    Task, TaskStatus, VaultSnapshot,
};

fn clock() -> Clock {
    Clock::parse("2025-06-10", Some("2025-06-10T12:00:00Z")).unwrap()
}

fn task(path: &str, title: &str, status: TaskStatus, project_ref: Option<&str>) -> Task {
    let mut task = Task::new(path, title, status);
    task.project_ref = project_ref.map(str::to_string);
    task
}

fn project(path: &str, title: &str, status: Option<ProjectStatus>, area: &str) -> Project {
    let mut project = Project::new(path, title);
    project.status = status;
    project.area_ref = Some(format!("[[{area}]]"));
    project
}

fn sample_vault() -> VaultSnapshot {
    let mut overdue = task(
        "tasks/budget.md",
        "Budget",
        TaskStatus::InProgress,
        Some("[[Launch]]"),
    );
    overdue.due = Some(parse_date("2025-06-05").unwrap());
    let mut direct = Task::new("tasks/renew.md", "Renew license", TaskStatus::Ready);
    direct.area_ref = Some("Work".to_string());

    let mut launch = project(
        "projects/launch.md",
        "Launch",
        Some(ProjectStatus::InProgress),
        "Work",
    );
    launch.blocked_by = vec!["[[Hiring]]".to_string(), "[[Vendor]]".to_string()];

    VaultSnapshot::new(
        vec![
            overdue,
            task("tasks/copy.md", "Copy", TaskStatus::Blocked, Some("Launch")),
            task("tasks/site.md", "Site", TaskStatus::Ready, Some("Launch")),
            task("tasks/shipped.md", "Shipped", TaskStatus::Done, Some("Launch")),
            task("tasks/interview.md", "Interview", TaskStatus::Inbox, Some("Hiring")),
            direct,
            task("tasks/loose.md", "Loose", TaskStatus::Ready, None),
        ],
        vec![
            launch,
            project("projects/hiring.md", "Hiring", Some(ProjectStatus::Planning), "Work"),
            project("projects/legacy.md", "Legacy", Some(ProjectStatus::Done), "Work"),
            project("projects/garden.md", "Garden", None, "Home"),
        ],
        vec![Area::new("areas/work.md", "Work"), Area::new("areas/home.md", "Home")],
    )
}

#[test]
fn overview_is_deterministic() {
    let vault = sample_vault();
    let projector = ContextProjector::default();

    let first = projector.build_vault_overview(&vault, clock());
    let second = projector.build_vault_overview(&vault, clock());

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_value(&first).unwrap(),
        serde_json::to_value(&second).unwrap()
    );
}

#[test]
fn overview_counts_match_graph_and_timeline() {
    let vault = sample_vault();
    let overview = ContextProjector::default().build_vault_overview(&vault, clock());

    assert_eq!(overview.stats.area_count, 2);
    assert_eq!(overview.stats.project_count, 3);
    assert_eq!(overview.stats.task_count, 6);
    assert_eq!(overview.stats.task_count, overview.graph.task_count());
    assert_eq!(overview.stats.overdue_count, overview.timeline.overdue.len());
    assert_eq!(overview.stats.in_progress_count, 1);
    assert_eq!(overview.stats.blocked_count, None);
}

#[test]
fn area_task_count_splits_direct_and_project_tasks() {
    let vault = sample_vault();
    let overview = ContextProjector::default().build_vault_overview(&vault, clock());

    let counts = overview.area_task_count("areas/work.md");
    assert_eq!(counts.direct, 1);
    assert_eq!(counts.via_projects, 4);
    assert_eq!(counts.total, counts.direct + counts.via_projects);
    assert_eq!(counts.total, overview.graph.tasks_in_area("areas/work.md").len());
}

#[test]
fn area_context_groups_projects_and_scopes_timeline() {
    let vault = sample_vault();
    let work = vault.area("areas/work.md").unwrap();

    let context = ContextProjector::default().build_area_context(work, &vault, clock());

    let project_paths: Vec<&str> = context
        .projects
        .iter()
        .map(|project| project.path.as_str())
        .collect();
    assert_eq!(project_paths, vec!["projects/launch.md", "projects/hiring.md"]);
    assert_eq!(context.projects_by_status.in_progress.len(), 1);
    assert_eq!(context.projects_by_status.planning.len(), 1);
    assert!(context.projects_by_status.done.is_empty());

    assert_eq!(context.direct_tasks.len(), 1);
    assert_eq!(context.stats.area_count, 1);
    assert_eq!(context.stats.project_count, 2);
    assert_eq!(context.stats.task_count, 5);
    assert_eq!(context.stats.task_count, context.task_count().total);
    assert_eq!(context.stats.overdue_count, 1);
    assert!(context
        .timeline
        .iter_all()
        .all(|task| task.path != "tasks/loose.md"));
}

#[test]
fn area_context_tree_lists_projects_then_direct_tasks() {
    let vault = sample_vault();
    let work = vault.area("areas/work.md").unwrap();

    let context = ContextProjector::default().build_area_context(work, &vault, clock());
    let tree = context.tree();

    assert_eq!(tree.len(), 3);
    assert_eq!(
        tree[0].content,
        "🔄 Launch [in-progress] - 3 tasks (1 in-progress, 1 blocked)"
    );
    assert_eq!(tree[0].children.len(), 1);
    assert_eq!(tree[0].children[0].content, "🔄 Budget");
    assert_eq!(tree[1].content, "📝 Hiring [planning] - 1 task");
    assert!(tree[1].children.is_empty());
    assert_eq!(tree[2].content, "📋 Renew license");
}

#[test]
fn archived_area_still_projects_its_own_context() {
    let mut vault = sample_vault();
    vault.areas[0].status = Some(AreaStatus::Archived);
    let work = vault.area("areas/work.md").unwrap();

    let context = ContextProjector::default().build_area_context(work, &vault, clock());

    assert_eq!(context.projects.len(), 2);
    assert!(context.warnings.is_empty());
}

#[test]
fn project_context_resolves_area_and_blockers() {
    let vault = sample_vault();
    let launch = vault.project("projects/launch.md").unwrap();

    let context = ContextProjector::default().build_project_context(launch, &vault, clock());

    assert_eq!(context.area.map(|area| area.path.as_str()), Some("areas/work.md"));
    assert_eq!(context.tasks.len(), 3);
    assert_eq!(context.tasks_by_status.in_progress.len(), 1);
    assert_eq!(context.tasks_by_status.blocked.len(), 1);
    assert_eq!(context.tasks_by_status.ready.len(), 1);
    assert!(context.tasks_by_status.inbox.is_empty());

    assert_eq!(context.stats.area_count, 1);
    assert_eq!(context.stats.blocked_count, Some(1));
    assert_eq!(context.stats.overdue_count, 1);

    let blockers: Vec<&str> = context
        .blocked_by
        .iter()
        .map(|project| project.path.as_str())
        .collect();
    assert_eq!(blockers, vec!["projects/hiring.md"]);
    assert_eq!(
        context.warnings,
        vec![
            "project 'Launch' blocked by non-existent project 'Vendor' (projects/launch.md)"
                .to_string()
        ]
    );
}

#[test]
fn done_project_context_still_lists_its_open_tasks() {
    let mut vault = sample_vault();
    vault
        .tasks
        .push(task("tasks/docs.md", "Docs", TaskStatus::Ready, Some("Legacy")));
    let legacy = vault.project("projects/legacy.md").unwrap();

    let context = ContextProjector::default().build_project_context(legacy, &vault, clock());

    assert_eq!(context.tasks.len(), 1);
    assert_eq!(context.tasks[0].path, "tasks/docs.md");
}

#[test]
fn task_context_takes_area_from_its_project() {
    let mut vault = sample_vault();
    vault.tasks[1].area_ref = Some("[[Home]]".to_string());
    let copy = vault.task("tasks/copy.md").unwrap();

    let context = ContextProjector::default().build_task_context(copy, &vault, clock());

    assert_eq!(
        context.project.map(|project| project.path.as_str()),
        Some("projects/launch.md")
    );
    assert_eq!(context.area.map(|area| area.path.as_str()), Some("areas/work.md"));
    assert!(context.warnings.is_empty());
}

#[test]
fn task_context_falls_back_to_own_area() {
    let vault = sample_vault();
    let renew = vault.task("tasks/renew.md").unwrap();

    let context = ContextProjector::default().build_task_context(renew, &vault, clock());

    assert!(context.project.is_none());
    assert_eq!(context.area.map(|area| area.path.as_str()), Some("areas/work.md"));
}

#[test]
fn reference_tables_sort_by_kind_then_name() {
    let vault = sample_vault();
    let launch = vault.project("projects/launch.md").unwrap();

    let context = ContextProjector::default().build_project_context(launch, &vault, clock());
    let table = context.reference_table();

    let rows: Vec<(EntityKind, &str)> = table
        .iter()
        .map(|entry| (entry.kind, entry.name.as_str()))
        .collect();
    assert_eq!(
        rows,
        vec![
            (EntityKind::Area, "Work"),
            (EntityKind::Project, "Hiring"),
            (EntityKind::Project, "Launch"),
            (EntityKind::Task, "Budget"),
            (EntityKind::Task, "Copy"),
            (EntityKind::Task, "Site"),
        ]
    );
}

#[test]
fn task_context_parent_matches_overview_bucket_for_shared_titles() {
    let live = project(
        "projects/live.md",
        "Launch",
        Some(ProjectStatus::InProgress),
        "Work",
    );
    let old = project("projects/old.md", "launch", Some(ProjectStatus::Done), "Work");
    let vault = VaultSnapshot::new(
        vec![task("tasks/kickoff.md", "Kickoff", TaskStatus::Ready, Some("[[Launch]]"))],
        vec![live, old],
        vec![Area::new("areas/work.md", "Work")],
    );
    let projector = ContextProjector::default();

    let overview = projector.build_vault_overview(&vault, clock());
    let kickoff = vault.task("tasks/kickoff.md").unwrap();
    let context = projector.build_task_context(kickoff, &vault, clock());

    assert_eq!(overview.graph.tasks_in_project("projects/live.md").len(), 1);
    assert_eq!(
        context.project.map(|project| project.path.as_str()),
        Some("projects/live.md")
    );
    assert_eq!(context.warnings, overview.warnings);
    assert!(context.warnings.is_empty());
}

#[test]
fn task_context_keeps_done_parent_project() {
    let vault = sample_vault();
    let shipped = vault.task("tasks/shipped.md").unwrap();
    let mut vault_with_legacy_task = vault.clone();
    vault_with_legacy_task.tasks[3].project_ref = Some("[[Legacy]]".to_string());
    let shipped_legacy = vault_with_legacy_task.task("tasks/shipped.md").unwrap();

    let projector = ContextProjector::default();
    let context = projector.build_task_context(shipped, &vault, clock());
    assert_eq!(
        context.project.map(|project| project.path.as_str()),
        Some("projects/launch.md")
    );

    let context = projector.build_task_context(shipped_legacy, &vault_with_legacy_task, clock());
    assert_eq!(
        context.project.map(|project| project.path.as_str()),
        Some("projects/legacy.md")
    );
    assert_eq!(context.area.map(|area| area.path.as_str()), Some("areas/work.md"));
    assert!(context.warnings.is_empty());
}

#[test]
fn task_context_warns_on_unresolved_references() {
    let mut vault = sample_vault();
    let mut stray = task("tasks/stray.md", "Stray", TaskStatus::Ready, Some("[[Ghost]]"));
    stray.area_ref = Some("[[Nowhere]]".to_string());
    vault.tasks.push(stray);
    let stray = vault.task("tasks/stray.md").unwrap();

    let context = ContextProjector::default().build_task_context(stray, &vault, clock());

    assert!(context.project.is_none());
    assert!(context.area.is_none());
    assert_eq!(
        context.warnings,
        vec![
            "task 'Stray' references non-existent project 'Ghost' (tasks/stray.md)".to_string(),
            "task 'Stray' references non-existent area 'Nowhere' (tasks/stray.md)".to_string(),
        ]
    );
}

#[test]
fn shared_area_title_warns_and_uses_last() {
    let mut vault = sample_vault();
    vault.areas.push(Area::new("areas/work-2024.md", "WORK"));

    let overview = ContextProjector::default().build_vault_overview(&vault, clock());

    assert!(overview.graph.projects_in_area("areas/work.md").is_empty());
    assert_eq!(overview.graph.projects_in_area("areas/work-2024.md").len(), 2);
    assert!(overview.warnings.contains(
        &"ambiguous area title 'work' matches 2 areas; using areas/work-2024.md".to_string()
    ));
}

#[test]
fn projects_without_status_are_grouped_as_unspecified() {
    let vault = sample_vault();
    let home = vault.area("areas/home.md").unwrap();

    let context = ContextProjector::default().build_area_context(home, &vault, clock());

    let unspecified: Vec<&str> = context
        .projects_by_status
        .unspecified
        .iter()
        .map(|project| project.path.as_str())
        .collect();
    assert_eq!(unspecified, vec!["projects/garden.md"]);
    assert!(context.projects_by_status.in_progress.is_empty());
    assert!(context.projects_by_status.planning.is_empty());
    assert_eq!(context.projects.len(), 1);
}
