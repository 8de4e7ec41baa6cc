//! Hearing persistence contract and in-memory backend.
//!
//! # Responsibility
//! - Turn persist actions into backend-facing `SaveRequest`s.
//! - Report backend results as `PersistOutcome` / `PersistError`.
//!
//! # Invariants
//! - A saved draft comes back with server ids on the hearing and every
//!   section, `is_new` cleared and front ids dropped.
//! - Deleting an unknown hearing is `PersistError::NotFound`.
//! - Saved entities list sections in draft order, whatever their ids.

use crate::model::hearing::HearingDraft;
use crate::model::EntityId;
use crate::store::action::{EditorAction, Entities, SaveKind};
use log::{debug, info};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One request handed to a persistence backend.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveRequest {
    /// Save, preview, publish, unpublish or close a populated draft.
    Draft { kind: SaveKind, draft: HearingDraft },
    /// Delete an unpublished draft.
    DeleteDraft { hearing_id: EntityId, slug: String },
}

impl SaveRequest {
    /// Extracts the backend request carried by a persist action.
    pub fn from_action(action: &EditorAction) -> Option<Self> {
        match action {
            EditorAction::DeleteHearingDraft { hearing_id, slug } => Some(Self::DeleteDraft {
                hearing_id: hearing_id.clone(),
                slug: slug.clone(),
            }),
            EditorAction::SaveHearingChanges { hearing }
            | EditorAction::SaveAndPreviewHearingChanges { hearing }
            | EditorAction::SaveAndPreviewNewHearing { hearing }
            | EditorAction::PublishHearing { hearing }
            | EditorAction::UnpublishHearing { hearing }
            | EditorAction::CloseHearing { hearing } => Some(Self::Draft {
                kind: action.save_kind()?,
                draft: hearing.clone(),
            }),
            _ => None,
        }
    }

    pub fn kind(&self) -> SaveKind {
        match self {
            Self::Draft { kind, .. } => *kind,
            Self::DeleteDraft { .. } => SaveKind::DeleteDraft,
        }
    }
}

/// Successful backend answer.
#[derive(Debug, Clone, PartialEq)]
pub enum PersistOutcome {
    /// Server state of the saved hearing, normalized.
    Saved(Entities),
    /// Draft removed.
    Deleted,
}

/// Backend failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistError {
    /// Request never got an answer.
    Transport(String),
    /// Backend answered with an error status.
    Rejected { status: u16, message: String },
    /// Referenced hearing does not exist.
    NotFound(EntityId),
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(details) => write!(f, "hearing backend unreachable: {details}"),
            Self::Rejected { status, message } => {
                write!(f, "hearing backend rejected request ({status}): {message}")
            }
            Self::NotFound(id) => write!(f, "hearing not found: {id}"),
        }
    }
}

impl Error for PersistError {}

/// Backend contract for hearing persistence.
pub trait HearingPersistence {
    /// Executes one request and returns the backend's answer.
    fn persist(&self, request: &SaveRequest) -> Result<PersistOutcome, PersistError>;
}

/// Process-local backend keeping saved drafts in a map.
#[derive(Debug, Default)]
pub struct InMemoryHearingRepository {
    hearings: RefCell<BTreeMap<EntityId, HearingDraft>>,
    next_id: Cell<u64>,
    fail_next: RefCell<Option<PersistError>>,
    requests: Cell<usize>,
}

impl InMemoryHearingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next request fail with `error`.
    pub fn fail_next(&self, error: PersistError) {
        self.fail_next.replace(Some(error));
    }

    /// Returns the stored draft for `hearing_id`.
    pub fn saved(&self, hearing_id: &str) -> Option<HearingDraft> {
        self.hearings.borrow().get(hearing_id).cloned()
    }

    /// Number of stored hearings.
    pub fn len(&self) -> usize {
        self.hearings.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.hearings.borrow().is_empty()
    }

    /// Number of requests received, failed ones included.
    pub fn request_count(&self) -> usize {
        self.requests.get()
    }

    fn allocate_id(&self, prefix: &str) -> EntityId {
        let next = self.next_id.get() + 1;
        self.next_id.set(next);
        format!("{prefix}-{next}")
    }

    fn store_draft(&self, kind: SaveKind, draft: &HearingDraft) -> HearingDraft {
        let mut stored = draft.clone();
        let hearing_id = stored
            .hearing
            .id
            .clone()
            .unwrap_or_else(|| self.allocate_id("hearing"));

        for section in &mut stored.sections {
            if section.id.is_none() {
                section.id = Some(self.allocate_id("section"));
            }
            section.front_id = None;
        }
        stored.hearing.id = Some(hearing_id.clone());
        stored.hearing.is_new = false;
        stored.hearing.sections = stored
            .sections
            .iter()
            .filter_map(|section| section.id.clone())
            .collect();

        match kind {
            SaveKind::Publish => stored.hearing.published = true,
            SaveKind::Unpublish => stored.hearing.published = false,
            SaveKind::Close => stored.hearing.closed = true,
            _ => {}
        }

        self.hearings
            .borrow_mut()
            .insert(hearing_id.clone(), stored.clone());
        debug!(
            "event=hearing_stored module=repo status=ok kind={} hearing_id={} sections={}",
            kind.as_str(),
            hearing_id,
            stored.sections.len()
        );
        stored
    }
}

impl HearingPersistence for InMemoryHearingRepository {
    fn persist(&self, request: &SaveRequest) -> Result<PersistOutcome, PersistError> {
        self.requests.set(self.requests.get() + 1);
        if let Some(error) = self.fail_next.take() {
            info!(
                "event=persist_failed module=repo status=error kind={} error={}",
                request.kind().as_str(),
                error
            );
            return Err(error);
        }

        match request {
            SaveRequest::Draft { kind, draft } => {
                let stored = self.store_draft(*kind, draft);
                Ok(PersistOutcome::Saved(Entities::from_draft(&stored)))
            }
            SaveRequest::DeleteDraft { hearing_id, slug } => {
                if self.hearings.borrow_mut().remove(hearing_id).is_none() {
                    return Err(PersistError::NotFound(hearing_id.clone()));
                }
                debug!(
                    "event=hearing_deleted module=repo status=ok hearing_id={} slug={}",
                    hearing_id, slug
                );
                Ok(PersistOutcome::Deleted)
            }
        }
    }
}
