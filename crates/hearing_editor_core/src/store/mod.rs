//! Normalized editor state and its reducers.
//!
//! # Responsibility
//! - Define the action vocabulary that is the only mutation surface.
//! - Reduce actions into per-slice state and combine slices into `EditorState`.
//!
//! # Invariants
//! - Reducers are pure: `(state, &action) -> state`, no I/O, no panics.
//! - Unrecognized actions return the slice unchanged.
//! - Every id in an ordered id list has an entry in the matching id map.

pub mod action;
pub mod editor;
pub mod hearing;
pub mod languages;
pub mod sections;
pub mod selectors;
pub mod slice;
pub mod taxonomy;
pub mod ui;
