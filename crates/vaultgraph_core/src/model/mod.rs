//! Vault domain model.
//!
//! # Responsibility
//! - Define the Task/Project/Area records consumed by the projection engine.
//! - Own the single canonicalization step for status strings.
//!
//! # Invariants
//! - Every record is identified by its vault-relative `path`.
//! - Parent links are raw strings; no record holds a foreign key.

pub mod entity;
pub mod snapshot;
pub mod status;
