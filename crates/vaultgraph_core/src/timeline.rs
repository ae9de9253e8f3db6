//! Temporal bucketing of active tasks.
//!
//! # Responsibility
//! - Assign each task to at most one timeline bucket by fixed priority.
//! - Group this week's scheduled tasks by date.
//!
//! # Invariants
//! - First matching bucket wins; a task path never appears in two buckets.
//! - `recently_modified` is emptied, not truncated, above the ceiling.
//! - Bucket vectors keep input order; `scheduled_this_week` keys ascend.

use crate::clock::Clock;
use crate::model::entity::Task;
use crate::model::status::TaskStatus;
use crate::options::ProjectionOptions;
use chrono::{Duration, NaiveDate};
use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;

/// Timeline categories in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineBucket {
    Overdue,
    DueToday,
    ScheduledToday,
    NewlyActionable,
    Blocked,
    ScheduledThisWeek,
    RecentlyModified,
}

/// Classified tasks for one projection scope.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Timeline<'a> {
    pub overdue: Vec<&'a Task>,
    pub due_today: Vec<&'a Task>,
    pub scheduled_today: Vec<&'a Task>,
    pub newly_actionable: Vec<&'a Task>,
    pub blocked: Vec<&'a Task>,
    pub scheduled_this_week: BTreeMap<NaiveDate, Vec<&'a Task>>,
    pub recently_modified: Vec<&'a Task>,
}

impl<'a> Timeline<'a> {
    /// Bucket holding `path`, if any.
    pub fn bucket_of(&self, path: &str) -> Option<TimelineBucket> {
        let contains = |tasks: &[&'a Task]| tasks.iter().any(|task| task.path == path);
        if contains(&self.overdue) {
            Some(TimelineBucket::Overdue)
        } else if contains(&self.due_today) {
            Some(TimelineBucket::DueToday)
        } else if contains(&self.scheduled_today) {
            Some(TimelineBucket::ScheduledToday)
        } else if contains(&self.newly_actionable) {
            Some(TimelineBucket::NewlyActionable)
        } else if contains(&self.blocked) {
            Some(TimelineBucket::Blocked)
        } else if self.scheduled_this_week.values().any(|tasks| contains(tasks)) {
            Some(TimelineBucket::ScheduledThisWeek)
        } else if contains(&self.recently_modified) {
            Some(TimelineBucket::RecentlyModified)
        } else {
            None
        }
    }

    /// Tasks across every bucket, in bucket priority order.
    pub fn iter_all(&self) -> impl Iterator<Item = &'a Task> + '_ {
        self.overdue
            .iter()
            .chain(&self.due_today)
            .chain(&self.scheduled_today)
            .chain(&self.newly_actionable)
            .chain(&self.blocked)
            .chain(self.scheduled_this_week.values().flatten())
            .chain(&self.recently_modified)
            .copied()
    }

    pub fn is_empty(&self) -> bool {
        self.iter_all().next().is_none()
    }

    fn push(&mut self, bucket: TimelineBucket, task: &'a Task) {
        match bucket {
            TimelineBucket::Overdue => self.overdue.push(task),
            TimelineBucket::DueToday => self.due_today.push(task),
            TimelineBucket::ScheduledToday => self.scheduled_today.push(task),
            TimelineBucket::NewlyActionable => self.newly_actionable.push(task),
            TimelineBucket::Blocked => self.blocked.push(task),
            TimelineBucket::ScheduledThisWeek => {
                if let Some(date) = task.scheduled {
                    self.scheduled_this_week.entry(date).or_default().push(task);
                }
            }
            TimelineBucket::RecentlyModified => self.recently_modified.push(task),
        }
    }
}

/// Priority-ordered classifier bound to one clock.
pub struct TimelineClassifier<'o> {
    clock: Clock,
    end_of_week: NaiveDate,
    options: &'o ProjectionOptions,
}

impl<'o> TimelineClassifier<'o> {
    pub fn new(clock: Clock, options: &'o ProjectionOptions) -> Self {
        Self {
            clock,
            end_of_week: clock.end_of_week(),
            options,
        }
    }

    /// First matching bucket for one task, or `None`.
    pub fn classify_task(&self, task: &Task) -> Option<TimelineBucket> {
        let today = self.clock.today;
        if task.due.is_some_and(|due| due < today) {
            return Some(TimelineBucket::Overdue);
        }
        if task.due == Some(today) {
            return Some(TimelineBucket::DueToday);
        }
        if task.scheduled == Some(today) {
            return Some(TimelineBucket::ScheduledToday);
        }
        if task.defer_until == Some(today) {
            return Some(TimelineBucket::NewlyActionable);
        }
        if task.status == TaskStatus::Blocked {
            return Some(TimelineBucket::Blocked);
        }
        if task
            .scheduled
            .is_some_and(|date| today < date && date <= self.end_of_week)
        {
            return Some(TimelineBucket::ScheduledThisWeek);
        }
        if self.is_recently_modified(task) {
            return Some(TimelineBucket::RecentlyModified);
        }
        None
    }

    /// Classifies tasks in input order.
    pub fn classify<'a>(&self, tasks: &[&'a Task]) -> Timeline<'a> {
        let mut timeline = Timeline::default();
        for &task in tasks {
            if let Some(bucket) = self.classify_task(task) {
                timeline.push(bucket, task);
            }
        }

        let candidates = timeline.recently_modified.len();
        if candidates > self.options.recent_ceiling {
            debug!(
                "event=timeline_recent_suppressed module=timeline status=ok candidates={} ceiling={}",
                candidates, self.options.recent_ceiling
            );
            timeline.recently_modified.clear();
        }

        debug!(
            "event=timeline_classify module=timeline status=ok tasks={} overdue={} due_today={} scheduled_week_days={}",
            tasks.len(),
            timeline.overdue.len(),
            timeline.due_today.len(),
            timeline.scheduled_this_week.len()
        );
        timeline
    }

    fn is_recently_modified(&self, task: &Task) -> bool {
        let window = Duration::hours(i64::from(self.options.recent_window_hours));
        // A window reaching past the earliest representable instant has no lower bound.
        match self.clock.now.checked_sub_signed(window) {
            Some(since) => task.updated_at >= since,
            None => true,
        }
    }
}
