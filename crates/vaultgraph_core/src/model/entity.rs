//! Task, Project and Area records.
//!
//! # Responsibility
//! - Define the already-parsed records handed over by the file layer.
//! - Keep raw reference strings untouched; resolution happens in `graph`.
//!
//! # Invariants
//! - `path` is the sole identity key within one snapshot.
//! - Records are read-only inputs; the engine never mutates them.

use crate::model::status::{AreaStatus, ProjectStatus, TaskStatus};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Actionable item parsed from one markdown file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Vault-relative file path; identity key.
    pub path: String,
    pub title: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub due: Option<NaiveDate>,
    #[serde(default)]
    pub scheduled: Option<NaiveDate>,
    /// Task stays hidden until this date (inclusive).
    #[serde(default)]
    pub defer_until: Option<NaiveDate>,
    /// Raw `[[wikilink]]` or plain title of the parent project.
    #[serde(default)]
    pub project_ref: Option<String>,
    /// Raw `[[wikilink]]` or plain title of the parent area.
    #[serde(default)]
    pub area_ref: Option<String>,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub body: String,
}

impl Task {
    /// Creates a task with no dates or references.
    ///
    /// Timestamps default to the unix epoch; callers set real values.
    pub fn new(path: impl Into<String>, title: impl Into<String>, status: TaskStatus) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
            status,
            due: None,
            scheduled: None,
            defer_until: None,
            project_ref: None,
            area_ref: None,
            created_at: DateTime::<Utc>::default(),
            updated_at: DateTime::<Utc>::default(),
            completed_at: None,
            body: String::new(),
        }
    }
}

/// Outcome-oriented container for tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub path: String,
    pub title: String,
    #[serde(default)]
    pub status: Option<ProjectStatus>,
    #[serde(default)]
    pub area_ref: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Raw references to projects that block this one.
    #[serde(default)]
    pub blocked_by: Vec<String>,
    #[serde(default)]
    pub body: String,
}

impl Project {
    pub fn new(path: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
            status: None,
            area_ref: None,
            start_date: None,
            end_date: None,
            blocked_by: Vec::new(),
            body: String::new(),
        }
    }
}

/// Long-lived sphere of responsibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    pub path: String,
    pub title: String,
    #[serde(default)]
    pub status: Option<AreaStatus>,
    /// Free-form classification such as `personal` or `work`.
    #[serde(default)]
    pub area_type: Option<String>,
    #[serde(default)]
    pub body: String,
}

impl Area {
    pub fn new(path: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
            status: None,
            area_type: None,
            body: String::new(),
        }
    }
}

/// Record kind. Declaration order is the reference-table sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Area,
    Project,
    Task,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Area => "area",
            Self::Project => "project",
            Self::Task => "task",
        }
    }
}

/// Identity and title access shared by all record kinds.
pub trait Entity {
    const KIND: EntityKind;

    fn path(&self) -> &str;
    fn title(&self) -> &str;
}

impl Entity for Task {
    const KIND: EntityKind = EntityKind::Task;

    fn path(&self) -> &str {
        &self.path
    }

    fn title(&self) -> &str {
        &self.title
    }
}

impl Entity for Project {
    const KIND: EntityKind = EntityKind::Project;

    fn path(&self) -> &str {
        &self.path
    }

    fn title(&self) -> &str {
        &self.title
    }
}

impl Entity for Area {
    const KIND: EntityKind = EntityKind::Area;

    fn path(&self) -> &str {
        &self.path
    }

    fn title(&self) -> &str {
        &self.title
    }
}
