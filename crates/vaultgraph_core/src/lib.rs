//! Vault relationship graph and context projection engine.
//! This crate is the single source of truth for memberships, counts and
//! timeline buckets rendered by every output mode.

pub mod clock;
pub mod fields;
pub mod graph;
pub mod logging;
pub mod model;
pub mod options;
pub mod references;
pub mod service;
pub mod stats;
pub mod timeline;
pub mod tree;

pub use clock::{parse_date, Clock, ClockError};
pub use fields::{present_fields, FieldDescriptor, AREA_FIELDS, PROJECT_FIELDS, TASK_FIELDS};
pub use graph::builder::{GraphBuilder, RelationshipGraph, TaskPlacement};
pub use graph::filter::ActiveFilter;
pub use graph::resolver::{normalize, strip_wikilink, Ambiguity, ReferenceResolver, TitleIndex};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::entity::{Area, Entity, EntityKind, Project, Task};
pub use model::snapshot::VaultSnapshot;
pub use model::status::{AreaStatus, ProjectStatus, StatusParseError, TaskStatus};
pub use options::{OptionsError, ProjectionOptions};
pub use references::{ReferenceEntry, ReferenceTableBuilder};
pub use service::context::{
    AreaContext, ProjectContext, ProjectsByStatus, TaskContext, TasksByStatus, VaultOverview,
};
pub use service::projector::ContextProjector;
pub use service::warnings::WarningCollector;
pub use stats::ContextStats;
pub use timeline::{Timeline, TimelineBucket, TimelineClassifier};
pub use tree::{
    build_area_tree, calculate_area_task_count, render_tree, status_shorthand, AreaTaskCount,
    TreeNode,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
