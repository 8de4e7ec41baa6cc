//! Editor use-case services.
//!
//! # Responsibility
//! - Gate persist actions behind hearing validation.
//! - Own the dispatch loop and the single in-flight save slot.

pub mod editor_store;
pub mod validation;
