//! Default-visibility predicates.
//!
//! # Invariants
//! - Predicates are total: missing fields pass through as visible.
//! - `today` is always explicit; nothing here reads wall-clock time.

use crate::model::entity::{Area, Project, Task};
use crate::model::status::{AreaStatus, ProjectStatus};
use crate::options::ProjectionOptions;
use chrono::NaiveDate;

/// Visibility rules for one projection call.
#[derive(Debug, Clone, Copy)]
pub struct ActiveFilter<'o> {
    today: NaiveDate,
    options: &'o ProjectionOptions,
}

impl<'o> ActiveFilter<'o> {
    pub fn new(today: NaiveDate, options: &'o ProjectionOptions) -> Self {
        Self { today, options }
    }

    /// Open status, not deferred past today, not under an archive folder.
    pub fn is_active_task(&self, task: &Task) -> bool {
        if self.options.include_inactive {
            return true;
        }
        !task.status.is_closed()
            && task.defer_until.map_or(true, |date| date <= self.today)
            && !self.is_archived_path(&task.path)
    }

    pub fn is_active_project(&self, project: &Project) -> bool {
        self.options.include_inactive || project.status != Some(ProjectStatus::Done)
    }

    pub fn is_active_area(&self, area: &Area) -> bool {
        self.options.include_inactive
            || matches!(area.status, None | Some(AreaStatus::Active))
    }

    fn is_archived_path(&self, path: &str) -> bool {
        path.split(['/', '\\']).any(|component| {
            self.options
                .archive_markers
                .iter()
                .any(|marker| component.eq_ignore_ascii_case(marker.trim()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::ActiveFilter;
    use crate::clock::parse_date;
    use crate::model::entity::{Area, Project, Task};
    use crate::model::status::{AreaStatus, ProjectStatus, TaskStatus};
    use crate::options::ProjectionOptions;

    #[test]
    fn deferred_task_becomes_active_on_defer_date() {
        let options = ProjectionOptions::default();
        let filter = ActiveFilter::new(parse_date("2025-06-10").unwrap(), &options);
        let mut task = Task::new("tasks/b.md", "B", TaskStatus::Ready);

        task.defer_until = Some(parse_date("2025-06-11").unwrap());
        assert!(!filter.is_active_task(&task));

        task.defer_until = Some(parse_date("2025-06-10").unwrap());
        assert!(filter.is_active_task(&task));
    }

    #[test]
    fn archived_paths_and_closed_statuses_are_hidden() {
        let options = ProjectionOptions::default();
        let filter = ActiveFilter::new(parse_date("2025-06-10").unwrap(), &options);

        let archived = Task::new("tasks/Archive/old.md", "Old", TaskStatus::Ready);
        assert!(!filter.is_active_task(&archived));

        let lookalike = Task::new("tasks/archived-notes.md", "Note", TaskStatus::Ready);
        assert!(filter.is_active_task(&lookalike));

        let iced = Task::new("tasks/ice.md", "Ice", TaskStatus::Icebox);
        assert!(!filter.is_active_task(&iced));
    }

    #[test]
    fn include_inactive_bypasses_every_rule() {
        let options = ProjectionOptions {
            include_inactive: true,
            ..ProjectionOptions::default()
        };
        let filter = ActiveFilter::new(parse_date("2025-06-10").unwrap(), &options);

        let done = Task::new("archive/done.md", "Done", TaskStatus::Done);
        assert!(filter.is_active_task(&done));

        let mut project = Project::new("projects/p.md", "P");
        project.status = Some(ProjectStatus::Done);
        assert!(filter.is_active_project(&project));

        let mut area = Area::new("areas/a.md", "A");
        area.status = Some(AreaStatus::Archived);
        assert!(filter.is_active_area(&area));
    }
}
