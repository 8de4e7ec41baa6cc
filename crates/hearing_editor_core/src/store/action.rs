//! Editor action vocabulary.
//!
//! # Responsibility
//! - Enumerate every intent the editor state accepts.
//! - Keep the Redux-style wire shape `{ "type": KIND, "payload": {...} }` so
//!   recorded sessions and API payloads replay unchanged.
//!
//! # Invariants
//! - Actions are immutable descriptions; reducers never mutate them.
//! - Persist actions carry the populated draft exactly as validated.

use crate::model::hearing::{Hearing, HearingDraft};
use crate::model::section::Section;
use crate::model::taxonomy::{ContactPerson, Label};
use crate::model::{EntityId, EntityMap};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Normalized entity maps keyed by slice name.
///
/// Slices absent from a payload deserialize as empty maps. Each map keeps
/// the entity order of the payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entities {
    #[serde(default)]
    pub hearing: EntityMap<Hearing>,
    #[serde(default)]
    pub sections: EntityMap<Section>,
    #[serde(default)]
    pub labels: EntityMap<Label>,
    #[serde(default)]
    pub contact_persons: EntityMap<ContactPerson>,
}

impl Entities {
    /// Normalizes a populated draft into entity maps.
    ///
    /// Sections without server id are keyed by front id; sections with
    /// neither are skipped.
    pub fn from_draft(draft: &HearingDraft) -> Self {
        let mut hearing = draft.hearing.clone();
        let mut sections = EntityMap::new();
        let mut order = Vec::with_capacity(draft.sections.len());
        for section in &draft.sections {
            if let Some(key) = section.key() {
                order.push(key.to_string());
                sections.insert(key.to_string(), section.clone());
            }
        }
        hearing.sections = order;

        Self {
            hearing: EntityMap::from([(hearing.key(), hearing)]),
            sections,
            ..Self::default()
        }
    }
}

/// Persist request kinds; each maps to one persist action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveKind {
    SaveChanges,
    SaveAndPreviewChanges,
    SaveAndPreviewNew,
    Publish,
    Unpublish,
    Close,
    DeleteDraft,
}

impl SaveKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SaveChanges => "save_changes",
            Self::SaveAndPreviewChanges => "save_and_preview_changes",
            Self::SaveAndPreviewNew => "save_and_preview_new",
            Self::Publish => "publish",
            Self::Unpublish => "unpublish",
            Self::Close => "close",
            Self::DeleteDraft => "delete_draft",
        }
    }
}

/// Every mutation the editor state accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EditorAction {
    /// Existing hearing fetched for viewing/editing.
    ReceiveHearing { entities: Entities },
    /// Blank draft prepared for the "new hearing" form.
    InitNewHearing { entities: Entities },
    /// Server state returned by a successful persist request.
    UpdateHearingAfterSave { entities: Entities },

    EditSection {
        #[serde(rename = "sectionID")]
        section_id: EntityId,
        field: String,
        value: Value,
    },
    AddSection { section: Section },
    RemoveSection {
        #[serde(rename = "sectionID")]
        section_id: EntityId,
    },
    EditSectionMainImage {
        #[serde(rename = "sectionID")]
        section_id: EntityId,
        field: String,
        value: Value,
    },
    SectionMoveUp {
        #[serde(rename = "sectionID")]
        section_id: EntityId,
    },
    SectionMoveDown {
        #[serde(rename = "sectionID")]
        section_id: EntityId,
    },

    EditHearing { field: String, value: Value },
    ChangeLanguages { languages: Vec<String> },
    ReceiveLabels { labels: Vec<Label> },
    ReceiveContactPersons { contacts: Vec<ContactPerson> },
    AddLabel { label: Label },
    AddContact { contact: ContactPerson },

    StartHearingEdit,
    CloseHearingForm,

    SaveHearingChanges { hearing: HearingDraft },
    SaveAndPreviewHearingChanges { hearing: HearingDraft },
    SaveAndPreviewNewHearing { hearing: HearingDraft },
    PublishHearing { hearing: HearingDraft },
    UnpublishHearing { hearing: HearingDraft },
    CloseHearing { hearing: HearingDraft },
    DeleteHearingDraft {
        #[serde(rename = "hearingID")]
        hearing_id: EntityId,
        slug: String,
    },

    /// Persist request failed; entities stay at their last saved state.
    SaveFailed { message: String },
    /// Draft deletion confirmed by the server.
    HearingDraftDeleted,
    /// Editor left; drop all hearing state.
    ClearEditor,
}

impl EditorAction {
    /// Builds the persist action for `kind` around a validated draft.
    ///
    /// Returns `None` for `SaveKind::DeleteDraft`, which carries ids instead
    /// of a draft.
    pub fn persist(kind: SaveKind, hearing: HearingDraft) -> Option<Self> {
        match kind {
            SaveKind::SaveChanges => Some(Self::SaveHearingChanges { hearing }),
            SaveKind::SaveAndPreviewChanges => Some(Self::SaveAndPreviewHearingChanges { hearing }),
            SaveKind::SaveAndPreviewNew => Some(Self::SaveAndPreviewNewHearing { hearing }),
            SaveKind::Publish => Some(Self::PublishHearing { hearing }),
            SaveKind::Unpublish => Some(Self::UnpublishHearing { hearing }),
            SaveKind::Close => Some(Self::CloseHearing { hearing }),
            SaveKind::DeleteDraft => None,
        }
    }

    /// Wire name of this action kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ReceiveHearing { .. } => "RECEIVE_HEARING",
            Self::InitNewHearing { .. } => "INIT_NEW_HEARING",
            Self::UpdateHearingAfterSave { .. } => "UPDATE_HEARING_AFTER_SAVE",
            Self::EditSection { .. } => "EDIT_SECTION",
            Self::AddSection { .. } => "ADD_SECTION",
            Self::RemoveSection { .. } => "REMOVE_SECTION",
            Self::EditSectionMainImage { .. } => "EDIT_SECTION_MAIN_IMAGE",
            Self::SectionMoveUp { .. } => "SECTION_MOVE_UP",
            Self::SectionMoveDown { .. } => "SECTION_MOVE_DOWN",
            Self::EditHearing { .. } => "EDIT_HEARING",
            Self::ChangeLanguages { .. } => "CHANGE_LANGUAGES",
            Self::ReceiveLabels { .. } => "RECEIVE_LABELS",
            Self::ReceiveContactPersons { .. } => "RECEIVE_CONTACT_PERSONS",
            Self::AddLabel { .. } => "ADD_LABEL",
            Self::AddContact { .. } => "ADD_CONTACT",
            Self::StartHearingEdit => "START_HEARING_EDIT",
            Self::CloseHearingForm => "CLOSE_HEARING_FORM",
            Self::SaveHearingChanges { .. } => "SAVE_HEARING_CHANGES",
            Self::SaveAndPreviewHearingChanges { .. } => "SAVE_AND_PREVIEW_HEARING_CHANGES",
            Self::SaveAndPreviewNewHearing { .. } => "SAVE_AND_PREVIEW_NEW_HEARING",
            Self::PublishHearing { .. } => "PUBLISH_HEARING",
            Self::UnpublishHearing { .. } => "UNPUBLISH_HEARING",
            Self::CloseHearing { .. } => "CLOSE_HEARING",
            Self::DeleteHearingDraft { .. } => "DELETE_HEARING_DRAFT",
            Self::SaveFailed { .. } => "SAVE_FAILED",
            Self::HearingDraftDeleted => "HEARING_DRAFT_DELETED",
            Self::ClearEditor => "CLEAR_EDITOR",
        }
    }

    /// Returns the persist kind when this action asks the server to save.
    pub fn save_kind(&self) -> Option<SaveKind> {
        match self {
            Self::SaveHearingChanges { .. } => Some(SaveKind::SaveChanges),
            Self::SaveAndPreviewHearingChanges { .. } => Some(SaveKind::SaveAndPreviewChanges),
            Self::SaveAndPreviewNewHearing { .. } => Some(SaveKind::SaveAndPreviewNew),
            Self::PublishHearing { .. } => Some(SaveKind::Publish),
            Self::UnpublishHearing { .. } => Some(SaveKind::Unpublish),
            Self::CloseHearing { .. } => Some(SaveKind::Close),
            Self::DeleteHearingDraft { .. } => Some(SaveKind::DeleteDraft),
            _ => None,
        }
    }

    /// Returns whether this action edits draft content in the form.
    pub fn is_content_edit(&self) -> bool {
        matches!(
            self,
            Self::EditSection { .. }
                | Self::AddSection { .. }
                | Self::RemoveSection { .. }
                | Self::EditSectionMainImage { .. }
                | Self::SectionMoveUp { .. }
                | Self::SectionMoveDown { .. }
                | Self::EditHearing { .. }
                | Self::ChangeLanguages { .. }
                | Self::AddLabel { .. }
                | Self::AddContact { .. }
        )
    }

    /// Entities carried by receive/init/update actions.
    pub fn entities(&self) -> Option<&Entities> {
        match self {
            Self::ReceiveHearing { entities }
            | Self::InitNewHearing { entities }
            | Self::UpdateHearingAfterSave { entities } => Some(entities),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{EditorAction, Entities, SaveKind};
    use crate::model::hearing::{Hearing, HearingDraft};
    use crate::model::section::Section;
    use serde_json::json;

    #[test]
    fn wire_shape_uses_type_and_payload() {
        let action = EditorAction::EditSectionMainImage {
            section_id: "f1".to_string(),
            field: "image".to_string(),
            value: json!("img.png"),
        };
        let value = serde_json::to_value(&action).expect("serialize");
        assert_eq!(
            value,
            json!({
                "type": "EDIT_SECTION_MAIN_IMAGE",
                "payload": {"sectionID": "f1", "field": "image", "value": "img.png"}
            })
        );
        assert_eq!(action.name(), "EDIT_SECTION_MAIN_IMAGE");
    }

    #[test]
    fn unit_actions_parse_without_payload() {
        let action: EditorAction =
            serde_json::from_value(json!({"type": "START_HEARING_EDIT"})).expect("parse");
        assert_eq!(action, EditorAction::StartHearingEdit);
    }

    #[test]
    fn receive_payload_defaults_missing_slices() {
        let action: EditorAction = serde_json::from_value(json!({
            "type": "RECEIVE_HEARING",
            "payload": {"entities": {"hearing": {"h1": {"id": "h1"}}}}
        }))
        .expect("parse");
        let entities = action.entities().expect("entities");
        assert_eq!(entities.hearing.len(), 1);
        assert!(entities.sections.is_empty());
    }

    #[test]
    fn persist_builder_and_save_kind_agree() {
        for kind in [
            SaveKind::SaveChanges,
            SaveKind::SaveAndPreviewChanges,
            SaveKind::SaveAndPreviewNew,
            SaveKind::Publish,
            SaveKind::Unpublish,
            SaveKind::Close,
        ] {
            let action = EditorAction::persist(kind, HearingDraft::default()).expect("draft kind");
            assert_eq!(action.save_kind(), Some(kind));
        }
        assert!(EditorAction::persist(SaveKind::DeleteDraft, HearingDraft::default()).is_none());
    }

    #[test]
    fn from_draft_keys_sections_in_order() {
        let saved = Section {
            id: Some("10".to_string()),
            ..Section::default()
        };
        let draft = HearingDraft {
            hearing: Hearing::new_draft(),
            sections: vec![Section::with_front_id("f2"), saved, Section::default()],
        };

        let entities = Entities::from_draft(&draft);
        let hearing = entities.hearing.get("new").expect("draft hearing");
        assert_eq!(hearing.sections, vec!["f2", "10"]);
        assert_eq!(entities.sections.len(), 2);
    }
}
