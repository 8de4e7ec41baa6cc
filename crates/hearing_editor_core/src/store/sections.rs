//! `sections` slice reducers.
//!
//! # Responsibility
//! - Keep section content (`by_id`) and section order (`all`) in step.
//!
//! # Invariants
//! - `sections_by_id` and `sections_all` co-own removal: both react to
//!   `REMOVE_SECTION` in the same dispatch, so neither structure keeps an id
//!   the other dropped.
//! - Edits addressed to an unknown id are no-ops and log a warning.
//! - An edit whose value has the wrong shape leaves the section unchanged.

use crate::model::fields::{merge_field, FieldMergeError};
use crate::model::section::Section;
use crate::model::{EntityId, EntityMap};
use crate::store::action::EditorAction;
use crate::store::slice::{
    append_id, ids_of, insert_entity, move_id, remove_entity, remove_id, MoveDirection,
    NormalizedSlice,
};
use log::warn;

/// Slice name used in payloads and log lines.
pub const SECTIONS: &str = "sections";

/// Normalized section storage.
pub type SectionsState = NormalizedSlice<Section>;

/// Reduces the section id map.
pub fn sections_by_id(
    state: EntityMap<Section>,
    action: &EditorAction,
) -> EntityMap<Section> {
    match action {
        EditorAction::ReceiveHearing { entities }
        | EditorAction::InitNewHearing { entities }
        | EditorAction::UpdateHearingAfterSave { entities } => entities.sections.clone(),
        EditorAction::EditSection {
            section_id,
            field,
            value,
        } => edit_section(state, section_id, action.name(), |section| {
            merge_field(section, field, value.clone())
        }),
        EditorAction::AddSection { section } => match section.front_id.clone() {
            Some(front_id) => insert_entity(state, front_id, section.clone()),
            None => {
                warn!("event=add_section_rejected module=store slice={SECTIONS} reason=missing_front_id");
                state
            }
        },
        EditorAction::RemoveSection { section_id } => remove_entity(state, section_id),
        EditorAction::EditSectionMainImage {
            section_id,
            field,
            value,
        } => edit_section(state, section_id, action.name(), |section| {
            section.with_main_image_field(field, value.clone())
        }),
        EditorAction::HearingDraftDeleted | EditorAction::ClearEditor => EntityMap::new(),
        _ => state,
    }
}

/// Reduces the section order.
pub fn sections_all(state: Vec<EntityId>, action: &EditorAction) -> Vec<EntityId> {
    match action {
        EditorAction::ReceiveHearing { entities }
        | EditorAction::InitNewHearing { entities }
        | EditorAction::UpdateHearingAfterSave { entities } => ids_of(&entities.sections),
        EditorAction::AddSection { section } => match section.front_id.as_deref() {
            Some(front_id) => append_id(state, front_id),
            None => state,
        },
        EditorAction::RemoveSection { section_id } => remove_id(state, section_id),
        EditorAction::SectionMoveUp { section_id } => {
            move_id(state, section_id, MoveDirection::Up)
        }
        EditorAction::SectionMoveDown { section_id } => {
            move_id(state, section_id, MoveDirection::Down)
        }
        EditorAction::HearingDraftDeleted | EditorAction::ClearEditor => Vec::new(),
        _ => state,
    }
}

/// Combined `sections` reducer.
pub fn reduce_sections(state: SectionsState, action: &EditorAction) -> SectionsState {
    let NormalizedSlice { by_id, all } = state;
    NormalizedSlice {
        by_id: sections_by_id(by_id, action),
        all: sections_all(all, action),
    }
}

fn edit_section<F>(
    mut state: EntityMap<Section>,
    section_id: &str,
    action_name: &str,
    edit: F,
) -> EntityMap<Section>
where
    F: FnOnce(&Section) -> Result<Section, FieldMergeError>,
{
    let edited = match state.get(section_id) {
        Some(section) => edit(section),
        None => {
            warn!(
                "event=edit_missing_entity module=store slice={SECTIONS} action={action_name} id={section_id}"
            );
            return state;
        }
    };

    match edited {
        Ok(section) => {
            state.insert(section_id.to_string(), section);
        }
        Err(err) => {
            warn!(
                "event=edit_rejected module=store slice={SECTIONS} action={action_name} id={section_id} error={err}"
            );
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::{reduce_sections, sections_all, sections_by_id, SectionsState};
    use crate::model::section::Section;
    use crate::store::action::EditorAction;
    use serde_json::json;

    fn add(front_id: &str) -> EditorAction {
        EditorAction::AddSection {
            section: Section::with_front_id(front_id),
        }
    }

    #[test]
    fn unrelated_actions_return_state_unchanged() {
        let state = reduce_sections(SectionsState::default(), &add("f1"));
        let next = reduce_sections(state.clone(), &EditorAction::StartHearingEdit);
        assert_eq!(next, state);
    }

    #[test]
    fn by_id_ignores_reorder_and_all_ignores_content_edits() {
        let state = reduce_sections(SectionsState::default(), &add("f1"));
        let by_id = sections_by_id(
            state.by_id.clone(),
            &EditorAction::SectionMoveUp {
                section_id: "f1".to_string(),
            },
        );
        assert_eq!(by_id, state.by_id);

        let all = sections_all(
            state.all.clone(),
            &EditorAction::EditSection {
                section_id: "f1".to_string(),
                field: "title".to_string(),
                value: json!({"fi": "Osio"}),
            },
        );
        assert_eq!(all, state.all);
    }

    #[test]
    fn add_without_front_id_is_rejected_by_both_reducers() {
        let state = reduce_sections(
            SectionsState::default(),
            &EditorAction::AddSection {
                section: Section::default(),
            },
        );
        assert!(state.is_empty());
        assert!(state.by_id.is_empty());
    }

    #[test]
    fn edit_with_bad_images_value_keeps_section() {
        let state = reduce_sections(SectionsState::default(), &add("f1"));
        let next = reduce_sections(
            state.clone(),
            &EditorAction::EditSection {
                section_id: "f1".to_string(),
                field: "images".to_string(),
                value: json!("not-a-list"),
            },
        );
        assert_eq!(next, state);
    }
}
