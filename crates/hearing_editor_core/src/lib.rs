//! Hearing editor state core.
//! Normalized editor state, pure reducers and the pre-save gate live here;
//! presentation and HTTP transport stay outside this crate.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use config::{ConfigError, EditorConfig};
pub use logging::{default_log_level, init_from_config, init_logging, logging_status, LoggingError};
pub use model::hearing::{Hearing, HearingDraft, PublicationStatus};
pub use model::section::{Section, SectionImage};
pub use model::taxonomy::{ContactPerson, Label};
pub use model::{EntityId, EntityMap};
pub use repo::hearing_repo::{
    HearingPersistence, InMemoryHearingRepository, PersistError, PersistOutcome, SaveRequest,
};
pub use service::editor_store::{EditorStore, PendingSave, SaveTicket, StoreError, StoreResult};
pub use service::validation::{gate_persist, validate_hearing, HearingValidationError};
pub use store::action::{EditorAction, Entities, SaveKind};
pub use store::editor::{reduce_editor, EditorState};
pub use store::ui::{EditorPhase, EditorUi};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
