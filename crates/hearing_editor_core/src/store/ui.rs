//! Editor draft state machine.
//!
//! # Responsibility
//! - Track where the draft is in `Viewing -> Editing -> Saving -> Saved`.
//! - Keep the last persistence failure message for the form to show.
//!
//! # Invariants
//! - Validation happens before dispatch, so a rejected draft never reaches
//!   this reducer and the phase stays `Editing`.
//! - Content edits during `Saving` do not leave `Saving`; the terminal
//!   save action decides the next phase.

use crate::store::action::{EditorAction, SaveKind};

/// Editor-visible draft phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorPhase {
    /// Hearing shown read-only; form hidden.
    #[default]
    Viewing,
    /// Form open with unsaved changes or none yet.
    Editing,
    /// Persist request handed to the server, awaiting its result.
    Saving,
    /// Last persist request succeeded and nothing was edited since.
    Saved,
}

/// Editor UI state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorUi {
    pub phase: EditorPhase,
    /// Persist request currently in flight.
    pub in_flight: Option<SaveKind>,
    /// Kind of the last persist request that succeeded.
    pub last_saved: Option<SaveKind>,
    /// Message of the last failed persist request.
    pub save_error: Option<String>,
}

impl EditorUi {
    /// Returns whether the hearing form is open.
    pub fn show_form(&self) -> bool {
        self.phase != EditorPhase::Viewing
    }
}

/// Reduces editor UI state.
pub fn reduce_ui(state: EditorUi, action: &EditorAction) -> EditorUi {
    if let Some(kind) = action.save_kind() {
        return EditorUi {
            phase: EditorPhase::Saving,
            in_flight: Some(kind),
            save_error: None,
            ..state
        };
    }
    if action.is_content_edit() {
        return match state.phase {
            EditorPhase::Saving | EditorPhase::Editing => state,
            EditorPhase::Viewing | EditorPhase::Saved => EditorUi {
                phase: EditorPhase::Editing,
                ..state
            },
        };
    }

    match action {
        EditorAction::ReceiveHearing { .. } => EditorUi::default(),
        EditorAction::InitNewHearing { .. } => EditorUi {
            phase: EditorPhase::Editing,
            ..EditorUi::default()
        },
        EditorAction::StartHearingEdit => EditorUi {
            phase: EditorPhase::Editing,
            save_error: None,
            ..state
        },
        EditorAction::CloseHearingForm => EditorUi {
            phase: EditorPhase::Viewing,
            ..state
        },
        EditorAction::UpdateHearingAfterSave { .. } => EditorUi {
            phase: EditorPhase::Saved,
            last_saved: state.in_flight.or(state.last_saved),
            in_flight: None,
            save_error: None,
        },
        EditorAction::SaveFailed { message } => EditorUi {
            phase: EditorPhase::Editing,
            in_flight: None,
            save_error: Some(message.clone()),
            ..state
        },
        EditorAction::HearingDraftDeleted | EditorAction::ClearEditor => EditorUi::default(),
        _ => state,
    }
}
