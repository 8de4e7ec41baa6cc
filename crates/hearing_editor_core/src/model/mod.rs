//! Editor domain model for hearings and their sections.
//!
//! # Responsibility
//! - Define the entity shapes the editor keeps in normalized slices.
//! - Keep server-provided fields the editor does not interpret intact.
//!
//! # Invariants
//! - Every entity is addressed by a string `EntityId` (server id or front id).
//! - Field merges go through serde so typed fields never hold malformed data.

pub mod fields;
pub mod hearing;
pub mod section;
pub mod taxonomy;

/// Identifier used as key in every normalized id map.
///
/// Server ids (numeric or string) and client-generated front ids share this
/// representation.
pub type EntityId = String;

/// Id-keyed entity map that iterates in insertion order.
///
/// Receive payloads list entities in server order and that order is kept.
pub type EntityMap<T> = indexmap::IndexMap<EntityId, T>;
