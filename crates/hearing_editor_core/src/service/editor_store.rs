//! Editor store: dispatch loop and save orchestration.
//!
//! # Responsibility
//! - Own `EditorState` and run every action through `reduce_editor`.
//! - Expose the form's bound handlers, gating saves behind validation.
//! - Hand at most one save request at a time to a persistence backend and
//!   feed its result back as an action.
//!
//! # Invariants
//! - While a save is pending or in flight, every further persist action is
//!   rejected with `StoreError::SaveInFlight` and leaves state untouched.
//! - A failed save keeps hearing and section entities as they were; only the
//!   UI slice records the failure.
//! - `ClearEditor` drops any pending save request.
//! - A backend result is applied only when its ticket matches the request
//!   currently in flight; any other result is logged and dropped.

use crate::config::EditorConfig;
use crate::model::hearing::HearingDraft;
use crate::model::section::{new_front_id, Section};
use crate::model::EntityId;
use crate::repo::hearing_repo::{HearingPersistence, PersistError, PersistOutcome, SaveRequest};
use crate::service::validation::{gate_persist, HearingValidationError};
use crate::store::action::{EditorAction, SaveKind};
use crate::store::editor::{reduce_editor, EditorState};
use crate::store::selectors::{current_hearing, populated_hearing};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-level failure of a dispatch or handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Draft failed the pre-save gate; nothing was dispatched.
    Validation(HearingValidationError),
    /// Another save has not finished yet.
    SaveInFlight(SaveKind),
    /// No hearing is loaded.
    NoHearing,
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::SaveInFlight(kind) => {
                write!(f, "save already in progress: {}", kind.as_str())
            }
            Self::NoHearing => write!(f, "no hearing loaded in editor"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<HearingValidationError> for StoreError {
    fn from(value: HearingValidationError) -> Self {
        Self::Validation(value)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Identifies one queued save request.
///
/// Issued when the persist action is dispatched; never reused by the same
/// store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SaveTicket(u64);

impl Display for SaveTicket {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Request handed to a backend together with the ticket its result must
/// carry back.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSave {
    pub ticket: SaveTicket,
    pub request: SaveRequest,
}

#[derive(Debug, Clone, PartialEq, Default)]
enum SaveSlot {
    #[default]
    Idle,
    /// Dispatched, not yet taken by a backend.
    Pending(PendingSave),
    /// Taken by a backend, awaiting `complete_save`.
    InFlight { ticket: SaveTicket, kind: SaveKind },
}

impl SaveSlot {
    fn busy_kind(&self) -> Option<SaveKind> {
        match self {
            Self::Idle => None,
            Self::Pending(pending) => Some(pending.request.kind()),
            Self::InFlight { kind, .. } => Some(*kind),
        }
    }
}

/// Single-threaded hearing editor store.
#[derive(Debug, Default)]
pub struct EditorStore {
    state: EditorState,
    save: SaveSlot,
    last_ticket: u64,
}

impl EditorStore {
    pub fn new(config: &EditorConfig) -> Self {
        Self::with_state(EditorState::from_config(config))
    }

    pub fn with_state(state: EditorState) -> Self {
        Self {
            state,
            ..Self::default()
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Kind of the save that is pending or in flight.
    pub fn save_in_flight(&self) -> Option<SaveKind> {
        self.save.busy_kind()
    }

    /// Reduces `action` into the state.
    ///
    /// Persist actions additionally queue a `SaveRequest` for
    /// `take_pending_save`.
    pub fn dispatch(&mut self, action: EditorAction) -> StoreResult<()> {
        if let Some(kind) = action.save_kind() {
            if let Some(busy) = self.save.busy_kind() {
                warn!(
                    "event=save_rejected module=store status=busy requested={} in_flight={}",
                    kind.as_str(),
                    busy.as_str()
                );
                return Err(StoreError::SaveInFlight(busy));
            }
        }

        debug!(
            "event=dispatch module=store status=ok action={}",
            action.name()
        );
        let request = SaveRequest::from_action(&action);
        let state = std::mem::take(&mut self.state);
        self.state = reduce_editor(state, &action);

        if let Some(request) = request {
            self.last_ticket += 1;
            let ticket = SaveTicket(self.last_ticket);
            info!(
                "event=save_queued module=store status=pending kind={} ticket={}",
                request.kind().as_str(),
                ticket
            );
            self.save = SaveSlot::Pending(PendingSave { ticket, request });
        } else if matches!(action, EditorAction::ClearEditor) {
            if let Some(kind) = self.save.busy_kind() {
                info!(
                    "event=save_dropped module=store status=cleared kind={}",
                    kind.as_str()
                );
            }
            self.save = SaveSlot::Idle;
        }
        Ok(())
    }

    /// Adds an empty section keyed by a fresh front id and returns that id.
    pub fn add_section(&mut self) -> StoreResult<EntityId> {
        let front_id = new_front_id();
        self.dispatch(EditorAction::AddSection {
            section: Section::with_front_id(front_id.clone()),
        })?;
        Ok(front_id)
    }

    /// Validated save of the current draft.
    pub fn save_changes(&mut self) -> StoreResult<()> {
        self.gated(|hearing| EditorAction::SaveHearingChanges { hearing })
    }

    /// Validated save followed by preview; new drafts use the create path.
    pub fn save_and_preview(&mut self) -> StoreResult<()> {
        let is_new = current_hearing(&self.state)
            .ok_or(StoreError::NoHearing)?
            .is_new;
        if is_new {
            self.gated(|hearing| EditorAction::SaveAndPreviewNewHearing { hearing })
        } else {
            self.gated(|hearing| EditorAction::SaveAndPreviewHearingChanges { hearing })
        }
    }

    pub fn publish(&mut self) -> StoreResult<()> {
        self.ungated(|hearing| EditorAction::PublishHearing { hearing })
    }

    pub fn unpublish(&mut self) -> StoreResult<()> {
        self.ungated(|hearing| EditorAction::UnpublishHearing { hearing })
    }

    pub fn close_hearing(&mut self) -> StoreResult<()> {
        self.ungated(|hearing| EditorAction::CloseHearing { hearing })
    }

    /// Deletes the current draft.
    ///
    /// A draft the server never saw is dropped locally without a request.
    pub fn delete_draft(&mut self) -> StoreResult<()> {
        let hearing = current_hearing(&self.state).ok_or(StoreError::NoHearing)?;
        let action = match hearing.id.clone() {
            Some(hearing_id) => EditorAction::DeleteHearingDraft {
                hearing_id,
                slug: hearing.slug.clone(),
            },
            None => EditorAction::HearingDraftDeleted,
        };
        self.dispatch(action)
    }

    /// Moves the pending request to in-flight and returns it.
    pub fn take_pending_save(&mut self) -> Option<PendingSave> {
        match std::mem::take(&mut self.save) {
            SaveSlot::Pending(pending) => {
                self.save = SaveSlot::InFlight {
                    ticket: pending.ticket,
                    kind: pending.request.kind(),
                };
                Some(pending)
            }
            other => {
                self.save = other;
                None
            }
        }
    }

    /// Feeds the backend result for `ticket` back into the state and frees
    /// the save slot.
    ///
    /// Returns whether the result was applied. A result whose ticket is not
    /// the one in flight is ignored and leaves state and slot untouched.
    pub fn complete_save(
        &mut self,
        ticket: SaveTicket,
        result: Result<PersistOutcome, PersistError>,
    ) -> bool {
        let kind = match &self.save {
            SaveSlot::InFlight {
                ticket: current,
                kind,
            } if *current == ticket => *kind,
            _ => {
                warn!("event=save_result_ignored module=store status=stale ticket={ticket}");
                return false;
            }
        };
        self.save = SaveSlot::Idle;

        let action = match result {
            Ok(PersistOutcome::Saved(entities)) => {
                info!(
                    "event=save_completed module=store status=ok kind={}",
                    kind.as_str()
                );
                EditorAction::UpdateHearingAfterSave { entities }
            }
            Ok(PersistOutcome::Deleted) => {
                info!("event=draft_deleted module=store status=ok");
                EditorAction::HearingDraftDeleted
            }
            Err(err) => {
                warn!(
                    "event=save_failed module=store status=error kind={} error={}",
                    kind.as_str(),
                    err
                );
                EditorAction::SaveFailed {
                    message: err.to_string(),
                }
            }
        };
        self.reduce(&action);
        true
    }

    /// Runs the pending request against `backend`.
    ///
    /// Returns whether a request was sent.
    pub fn flush_pending_save<P: HearingPersistence>(&mut self, backend: &P) -> bool {
        let Some(PendingSave { ticket, request }) = self.take_pending_save() else {
            return false;
        };
        let result = backend.persist(&request);
        self.complete_save(ticket, result)
    }

    fn reduce(&mut self, action: &EditorAction) {
        debug!(
            "event=dispatch module=store status=ok action={}",
            action.name()
        );
        let state = std::mem::take(&mut self.state);
        self.state = reduce_editor(state, action);
    }

    fn gated(&mut self, build: fn(HearingDraft) -> EditorAction) -> StoreResult<()> {
        if let Some(busy) = self.save.busy_kind() {
            return Err(StoreError::SaveInFlight(busy));
        }
        let draft = populated_hearing(&self.state).ok_or(StoreError::NoHearing)?;
        gate_persist(draft, build, |action| self.dispatch(action))?
    }

    fn ungated(&mut self, build: fn(HearingDraft) -> EditorAction) -> StoreResult<()> {
        let draft = populated_hearing(&self.state).ok_or(StoreError::NoHearing)?;
        self.dispatch(build(draft))
    }
}

#[cfg(test)]
mod tests {
    use super::{EditorStore, StoreError};
    use crate::config::EditorConfig;
    use crate::model::hearing::Hearing;
    use crate::model::EntityMap;
    use crate::repo::hearing_repo::{InMemoryHearingRepository, PersistError};
    use crate::service::validation::HearingValidationError;
    use crate::store::action::{EditorAction, Entities, SaveKind};
    use crate::store::ui::EditorPhase;
    use std::collections::BTreeMap;

    fn store_with(hearing: Hearing) -> EditorStore {
        let mut store = EditorStore::new(&EditorConfig::default());
        store
            .dispatch(EditorAction::ReceiveHearing {
                entities: Entities {
                    hearing: EntityMap::from([(hearing.key(), hearing)]),
                    ..Entities::default()
                },
            })
            .expect("receive");
        store
    }

    fn saved_hearing() -> Hearing {
        Hearing {
            id: Some("h1".to_string()),
            title: BTreeMap::from([("fi".to_string(), "Tori".to_string())]),
            slug: "tori".to_string(),
            labels: ["l1".to_string()].into_iter().collect(),
            contact_persons: vec!["c1".to_string()],
            open_at: Some("2026-11-01T08:00:00Z".to_string()),
            close_at: Some("2026-11-30T16:00:00Z".to_string()),
            ..Hearing::default()
        }
    }

    #[test]
    fn gated_save_rejects_invalid_draft_without_dispatch() {
        let mut hearing = saved_hearing();
        hearing.close_at = None;
        let mut store = store_with(hearing);
        store.dispatch(EditorAction::StartHearingEdit).expect("edit");

        let err = store.save_changes().expect_err("missing close time");
        assert_eq!(
            err,
            StoreError::Validation(HearingValidationError::MissingCloseAt)
        );
        assert_eq!(store.state().ui.phase, EditorPhase::Editing);
        assert!(store.take_pending_save().is_none());
    }

    #[test]
    fn second_save_while_pending_is_rejected() {
        let mut store = store_with(saved_hearing());
        store.save_changes().expect("first save");
        assert_eq!(
            store.publish(),
            Err(StoreError::SaveInFlight(SaveKind::SaveChanges))
        );
        assert_eq!(store.state().ui.in_flight, Some(SaveKind::SaveChanges));
    }

    #[test]
    fn flush_applies_backend_result() {
        let repo = InMemoryHearingRepository::new();
        let mut store = store_with(saved_hearing());
        store.publish().expect("publish");

        assert!(store.flush_pending_save(&repo));
        assert!(!store.flush_pending_save(&repo));
        assert_eq!(store.state().ui.phase, EditorPhase::Saved);
        assert!(store.state().hearing.get("h1").expect("hearing").published);
        assert_eq!(store.save_in_flight(), None);
    }

    #[test]
    fn failed_save_records_message_and_frees_slot() {
        let repo = InMemoryHearingRepository::new();
        repo.fail_next(PersistError::Rejected {
            status: 400,
            message: "slug taken".to_string(),
        });
        let mut store = store_with(saved_hearing());
        store.save_changes().expect("save");
        store.flush_pending_save(&repo);

        let ui = &store.state().ui;
        assert_eq!(ui.phase, EditorPhase::Editing);
        assert!(ui
            .save_error
            .as_deref()
            .is_some_and(|message| message.contains("slug taken")));
        assert!(store.save_changes().is_ok());
    }

    #[test]
    fn unsaved_draft_is_deleted_locally() {
        let mut store = store_with(Hearing::new_draft());
        store.delete_draft().expect("delete");
        assert!(store.state().hearing.is_empty());
        assert!(store.take_pending_save().is_none());
    }

    #[test]
    fn handlers_need_a_hearing() {
        let mut store = EditorStore::default();
        assert_eq!(store.save_changes(), Err(StoreError::NoHearing));
        assert_eq!(store.publish(), Err(StoreError::NoHearing));
        assert_eq!(store.delete_draft(), Err(StoreError::NoHearing));
    }
}
