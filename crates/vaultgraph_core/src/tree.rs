//! Nested outline structures for area summaries.
//!
//! # Responsibility
//! - Build presentation-agnostic `{content, children}` trees from graph output.
//! - Render trees with box-drawing connectors.
//!
//! # Invariants
//! - Non-last siblings use `├── ` and pass `│   ` to descendants; the last
//!   sibling uses `└── ` and passes four spaces.
//! - `AreaTaskCount::total == direct + via_projects`.

use crate::model::entity::{Project, Task};
use crate::model::status::TaskStatus;
use crate::stats::count_status;
use serde::Serialize;
use std::collections::BTreeMap;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const CONTINUATION: &str = "│   ";
const BLANK_CONTINUATION: &str = "    ";
const UNKNOWN_STATUS_EMOJI: &str = "❔";

/// Shorthand statuses summarized on project nodes, in display order.
const SHORTHAND_STATUSES: [TaskStatus; 2] = [TaskStatus::InProgress, TaskStatus::Blocked];

/// One outline node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    pub content: String,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn leaf(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(content: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self {
            content: content.into(),
            children,
        }
    }
}

/// Task totals for one area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AreaTaskCount {
    pub direct: usize,
    pub via_projects: usize,
    pub total: usize,
}

/// Renders sibling nodes into connector-prefixed lines.
pub fn render_tree(nodes: &[TreeNode]) -> Vec<String> {
    let mut lines = Vec::new();
    render_level(nodes, "", &mut lines);
    lines
}

fn render_level(nodes: &[TreeNode], prefix: &str, lines: &mut Vec<String>) {
    for (index, node) in nodes.iter().enumerate() {
        let is_last = index + 1 == nodes.len();
        let (connector, continuation) = if is_last {
            (LAST_BRANCH, BLANK_CONTINUATION)
        } else {
            (BRANCH, CONTINUATION)
        };
        lines.push(format!("{prefix}{connector}{}", node.content));
        if !node.children.is_empty() {
            render_level(&node.children, &format!("{prefix}{continuation}"), lines);
        }
    }
}

/// Builds one area's outline: a node per project, then direct tasks.
///
/// Project nodes carry their in-progress tasks as children.
pub fn build_area_tree(
    projects: &[&Project],
    project_tasks: &BTreeMap<String, Vec<&Task>>,
    direct_tasks: &[&Task],
) -> Vec<TreeNode> {
    let mut nodes: Vec<TreeNode> = projects
        .iter()
        .map(|project| {
            let tasks = project_tasks
                .get(&project.path)
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            let children = tasks
                .iter()
                .filter(|task| task.status == TaskStatus::InProgress)
                .map(|task| TreeNode::leaf(task_label(task)))
                .collect();
            TreeNode::with_children(project_label(project, tasks), children)
        })
        .collect();
    nodes.extend(direct_tasks.iter().map(|task| TreeNode::leaf(task_label(task))));
    nodes
}

/// Splits an area's task total into direct and via-project parts.
pub fn calculate_area_task_count(
    projects: &[&Project],
    project_tasks: &BTreeMap<String, Vec<&Task>>,
    direct_tasks: &[&Task],
) -> AreaTaskCount {
    let via_projects = projects
        .iter()
        .filter_map(|project| project_tasks.get(&project.path))
        .map(Vec::len)
        .sum();
    let direct = direct_tasks.len();
    AreaTaskCount {
        direct,
        via_projects,
        total: direct + via_projects,
    }
}

/// `"(2 in-progress, 1 blocked)"`, or empty when every count is zero.
pub fn status_shorthand(tasks: &[&Task]) -> String {
    let parts: Vec<String> = SHORTHAND_STATUSES
        .iter()
        .filter_map(|&status| {
            let count = count_status(tasks, status);
            (count > 0).then(|| format!("{count} {status}"))
        })
        .collect();
    if parts.is_empty() {
        String::new()
    } else {
        format!("({})", parts.join(", "))
    }
}

fn project_label(project: &Project, tasks: &[&Task]) -> String {
    let emoji = project
        .status
        .map_or(UNKNOWN_STATUS_EMOJI, |status| status.emoji());
    let mut label = format!("{emoji} {}", project.title);
    if let Some(status) = project.status {
        label.push_str(&format!(" [{status}]"));
    }
    let noun = if tasks.len() == 1 { "task" } else { "tasks" };
    label.push_str(&format!(" - {} {noun}", tasks.len()));
    let shorthand = status_shorthand(tasks);
    if !shorthand.is_empty() {
        label.push(' ');
        label.push_str(&shorthand);
    }
    label
}

fn task_label(task: &Task) -> String {
    format!("{} {}", task.status.emoji(), task.title)
}

#[cfg(test)]
mod tests {
    use super::{render_tree, status_shorthand, TreeNode};
    use crate::model::entity::Task;
    use crate::model::status::TaskStatus;

    #[test]
    fn render_uses_continuation_only_below_non_last_siblings() {
        let nodes = vec![
            TreeNode::with_children("A", vec![TreeNode::leaf("A1"), TreeNode::leaf("A2")]),
            TreeNode::with_children("B", vec![TreeNode::leaf("B1")]),
        ];
        assert_eq!(
            render_tree(&nodes),
            vec![
                "├── A",
                "│   ├── A1",
                "│   └── A2",
                "└── B",
                "    └── B1",
            ]
        );
    }

    #[test]
    fn shorthand_omits_zero_counts() {
        let ready = Task::new("t/1.md", "One", TaskStatus::Ready);
        let blocked = Task::new("t/2.md", "Two", TaskStatus::Blocked);
        assert_eq!(status_shorthand(&[&ready]), "");
        assert_eq!(status_shorthand(&[&ready, &blocked]), "(1 blocked)");
    }
}
