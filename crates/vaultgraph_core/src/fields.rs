//! Ordered field descriptors shared by all output modes.
//!
//! Each record kind declares its optional fields once as
//! `(label, is_present, render)` triples; human, AI and JSON formatters walk
//! the same list so field order and presence never drift between modes.

use crate::model::entity::{Area, Project, Task};

/// One optional field of record type `T`.
pub struct FieldDescriptor<T> {
    pub label: &'static str,
    pub is_present: fn(&T) -> bool,
    pub render: fn(&T) -> String,
}

/// Task fields in display order.
pub static TASK_FIELDS: [FieldDescriptor<Task>; 8] = [
    FieldDescriptor {
        label: "status",
        is_present: |_| true,
        render: |task| task.status.to_string(),
    },
    FieldDescriptor {
        label: "due",
        is_present: |task| task.due.is_some(),
        render: |task| render_date(task.due),
    },
    FieldDescriptor {
        label: "scheduled",
        is_present: |task| task.scheduled.is_some(),
        render: |task| render_date(task.scheduled),
    },
    FieldDescriptor {
        label: "defer_until",
        is_present: |task| task.defer_until.is_some(),
        render: |task| render_date(task.defer_until),
    },
    FieldDescriptor {
        label: "project",
        is_present: |task| has_text(task.project_ref.as_deref()),
        render: |task| task.project_ref.clone().unwrap_or_default(),
    },
    FieldDescriptor {
        label: "area",
        is_present: |task| has_text(task.area_ref.as_deref()),
        render: |task| task.area_ref.clone().unwrap_or_default(),
    },
    FieldDescriptor {
        label: "completed_at",
        is_present: |task| task.completed_at.is_some(),
        render: |task| {
            task.completed_at
                .map(|instant| instant.to_rfc3339())
                .unwrap_or_default()
        },
    },
    FieldDescriptor {
        label: "updated_at",
        is_present: |_| true,
        render: |task| task.updated_at.to_rfc3339(),
    },
];

/// Project fields in display order.
pub static PROJECT_FIELDS: [FieldDescriptor<Project>; 5] = [
    FieldDescriptor {
        label: "status",
        is_present: |project| project.status.is_some(),
        render: |project| {
            project
                .status
                .map(|status| status.to_string())
                .unwrap_or_default()
        },
    },
    FieldDescriptor {
        label: "area",
        is_present: |project| has_text(project.area_ref.as_deref()),
        render: |project| project.area_ref.clone().unwrap_or_default(),
    },
    FieldDescriptor {
        label: "start_date",
        is_present: |project| project.start_date.is_some(),
        render: |project| render_date(project.start_date),
    },
    FieldDescriptor {
        label: "end_date",
        is_present: |project| project.end_date.is_some(),
        render: |project| render_date(project.end_date),
    },
    FieldDescriptor {
        label: "blocked_by",
        is_present: |project| !project.blocked_by.is_empty(),
        render: |project| project.blocked_by.join(", "),
    },
];

/// Area fields in display order.
pub static AREA_FIELDS: [FieldDescriptor<Area>; 2] = [
    FieldDescriptor {
        label: "status",
        is_present: |area| area.status.is_some(),
        render: |area| area.status.map(|status| status.to_string()).unwrap_or_default(),
    },
    FieldDescriptor {
        label: "type",
        is_present: |area| has_text(area.area_type.as_deref()),
        render: |area| area.area_type.clone().unwrap_or_default(),
    },
];

/// Renders the present fields of `entity` as `(label, value)` pairs.
pub fn present_fields<T>(
    entity: &T,
    descriptors: &[FieldDescriptor<T>],
) -> Vec<(&'static str, String)> {
    descriptors
        .iter()
        .filter(|descriptor| (descriptor.is_present)(entity))
        .map(|descriptor| (descriptor.label, (descriptor.render)(entity)))
        .collect()
}

fn render_date(value: Option<chrono::NaiveDate>) -> String {
    value.map(|date| date.to_string()).unwrap_or_default()
}

fn has_text(value: Option<&str>) -> bool {
    value.is_some_and(|text| !text.trim().is_empty())
}
