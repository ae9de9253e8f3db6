//! Relationship graph over vault records.
//!
//! # Responsibility
//! - Resolve textual references into Project/Area records.
//! - Decide default visibility per record kind.
//! - Partition active records into area/project/orphan buckets.
//!
//! # Invariants
//! - Unresolved references are a valid terminal state (orphans), not errors.
//! - Graph output is the only source for counts and memberships downstream.

pub mod builder;
pub mod filter;
pub mod resolver;
