//! In-memory vault snapshot.
//!
//! # Invariants
//! - A snapshot is immutable for the duration of one projection call.
//! - Vector order is the caller's insertion order and is preserved by every
//!   projection that does not sort explicitly.

use crate::model::entity::{Area, Project, Task};
use serde::{Deserialize, Serialize};

/// All Task/Project/Area records of one vault at one instant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultSnapshot {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub areas: Vec<Area>,
}

impl VaultSnapshot {
    pub fn new(tasks: Vec<Task>, projects: Vec<Project>, areas: Vec<Area>) -> Self {
        Self {
            tasks,
            projects,
            areas,
        }
    }

    /// Looks up one task by identity path.
    pub fn task(&self, path: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.path == path)
    }

    /// Looks up one project by identity path.
    pub fn project(&self, path: &str) -> Option<&Project> {
        self.projects.iter().find(|project| project.path == path)
    }

    /// Looks up one area by identity path.
    pub fn area(&self, path: &str) -> Option<&Area> {
        self.areas.iter().find(|area| area.path == path)
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty() && self.projects.is_empty() && self.areas.is_empty()
    }
}
