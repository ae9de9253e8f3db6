//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate graph, timeline and stats into context projections.
//! - Keep formatter layers decoupled from relationship resolution.

pub mod context;
pub mod projector;
pub mod warnings;
