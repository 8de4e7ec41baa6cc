//! `hearing` slice reducers.
//!
//! # Invariants
//! - The editor works on one hearing: the first id of `all`.
//! - Label and contact attachments only ever add ids, never duplicate them.

use crate::model::fields::merge_field;
use crate::model::hearing::Hearing;
use crate::model::{EntityId, EntityMap};
use crate::store::action::EditorAction;
use crate::store::slice::{ids_of, NormalizedSlice};
use log::warn;

/// Slice name used in payloads and log lines.
pub const HEARING: &str = "hearing";

/// Normalized hearing storage.
pub type HearingState = NormalizedSlice<Hearing>;

/// Reduces the hearing id map.
///
/// `current_id` is the id the editor is working on; edits without one are
/// dropped.
pub fn hearing_by_id(
    mut state: EntityMap<Hearing>,
    current_id: Option<&str>,
    action: &EditorAction,
) -> EntityMap<Hearing> {
    match action {
        EditorAction::ReceiveHearing { entities }
        | EditorAction::InitNewHearing { entities }
        | EditorAction::UpdateHearingAfterSave { entities } => entities.hearing.clone(),
        EditorAction::EditHearing { field, value } => {
            let Some((id, hearing)) = current_entry(&state, current_id, action) else {
                return state;
            };
            match merge_field(hearing, field, value.clone()) {
                Ok(edited) => {
                    state.insert(id, edited);
                }
                Err(err) => warn!(
                    "event=edit_rejected module=store slice={HEARING} action={} id={id} error={err}",
                    action.name()
                ),
            }
            state
        }
        EditorAction::AddLabel { label } => {
            let Some((id, hearing)) = current_entry(&state, current_id, action) else {
                return state;
            };
            let mut edited = hearing.clone();
            edited.labels.insert(label.id.clone());
            state.insert(id, edited);
            state
        }
        EditorAction::AddContact { contact } => {
            let Some((id, hearing)) = current_entry(&state, current_id, action) else {
                return state;
            };
            let mut edited = hearing.clone();
            if !edited.contact_persons.contains(&contact.id) {
                edited.contact_persons.push(contact.id.clone());
            }
            state.insert(id, edited);
            state
        }
        EditorAction::HearingDraftDeleted | EditorAction::ClearEditor => EntityMap::new(),
        _ => state,
    }
}

/// Reduces the hearing id order.
pub fn hearing_all(state: Vec<EntityId>, action: &EditorAction) -> Vec<EntityId> {
    match action.entities() {
        Some(entities) => ids_of(&entities.hearing),
        None => match action {
            EditorAction::HearingDraftDeleted | EditorAction::ClearEditor => Vec::new(),
            _ => state,
        },
    }
}

/// Combined `hearing` reducer.
pub fn reduce_hearing(state: HearingState, action: &EditorAction) -> HearingState {
    let NormalizedSlice { by_id, all } = state;
    let current_id = all.first().cloned();
    NormalizedSlice {
        by_id: hearing_by_id(by_id, current_id.as_deref(), action),
        all: hearing_all(all, action),
    }
}

fn current_entry<'a>(
    state: &'a EntityMap<Hearing>,
    current_id: Option<&str>,
    action: &EditorAction,
) -> Option<(EntityId, &'a Hearing)> {
    let found = current_id.and_then(|id| state.get(id).map(|hearing| (id.to_string(), hearing)));
    if found.is_none() {
        warn!(
            "event=edit_missing_entity module=store slice={HEARING} action={} id={}",
            action.name(),
            current_id.unwrap_or("none")
        );
    }
    found
}
