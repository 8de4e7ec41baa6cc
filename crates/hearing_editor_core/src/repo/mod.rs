//! Persistence seam between the editor store and the hearing backend.
//!
//! # Responsibility
//! - Describe the save requests the store hands to a backend.
//! - Define the backend contract and an in-memory implementation used by the
//!   smoke CLI and tests.
//!
//! # Invariants
//! - A backend answers each request exactly once with an outcome or an error.
//! - Backends never touch editor state; results flow back as actions.

pub mod hearing_repo;
