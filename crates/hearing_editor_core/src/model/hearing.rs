//! Hearing aggregate as held by the editor.
//!
//! # Responsibility
//! - Define the hearing entity stored in the `hearing` slice.
//! - Define `HearingDraft`, the populated shape handed to persistence.
//!
//! # Invariants
//! - `labels` is a set; `contact_persons` and `sections` keep first-seen order.
//! - `sections` holds ids only; section content lives in the `sections` slice.
//! - `is_new` is a client flag and is only serialized when set.

use crate::model::fields::{
    deserialize_id_list, deserialize_id_set, deserialize_localized, deserialize_optional_id,
    deserialize_text, deserialize_timestamp, is_false, ExtraFields, LocalizedText,
};
use crate::model::section::Section;
use crate::model::EntityId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Publication state derived from hearing flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublicationStatus {
    /// Not yet visible to citizens.
    Draft,
    /// Visible and open for the configured window.
    Published,
    /// Closed for comments.
    Closed,
}

/// Hearing entity from the normalized `hearing` slice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hearing {
    /// Server id; absent for drafts that were never saved.
    #[serde(
        default,
        deserialize_with = "deserialize_optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<EntityId>,
    #[serde(default, deserialize_with = "deserialize_localized")]
    pub title: LocalizedText,
    /// URL slug; empty string means unset.
    #[serde(default, deserialize_with = "deserialize_text")]
    pub slug: String,
    /// ISO-8601 opening time.
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub open_at: Option<String>,
    /// ISO-8601 closing time.
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub close_at: Option<String>,
    #[serde(default, deserialize_with = "deserialize_id_list")]
    pub contact_persons: Vec<EntityId>,
    #[serde(default, deserialize_with = "deserialize_id_set")]
    pub labels: BTreeSet<EntityId>,
    #[serde(default, deserialize_with = "deserialize_id_list")]
    pub sections: Vec<EntityId>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub closed: bool,
    #[serde(rename = "isNew", default, skip_serializing_if = "is_false")]
    pub is_new: bool,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Hearing {
    /// Creates an empty unsaved draft.
    pub fn new_draft() -> Self {
        Self {
            is_new: true,
            ..Self::default()
        }
    }

    /// Returns the normalized-map key for this hearing.
    ///
    /// Unsaved drafts are keyed by a stable placeholder until the server
    /// assigns an id.
    pub fn key(&self) -> EntityId {
        self.id
            .clone()
            .unwrap_or_else(|| NEW_HEARING_KEY.to_string())
    }

    /// Returns whether at least one translation of the title is non-empty.
    pub fn has_title(&self) -> bool {
        self.title.values().any(|text| !text.is_empty())
    }

    /// Languages that carry a non-empty title, in language-code order.
    pub fn title_languages(&self) -> Vec<String> {
        self.title
            .iter()
            .filter(|(_, text)| !text.is_empty())
            .map(|(language, _)| language.clone())
            .collect()
    }

    pub fn publication_status(&self) -> PublicationStatus {
        if self.closed {
            PublicationStatus::Closed
        } else if self.published {
            PublicationStatus::Published
        } else {
            PublicationStatus::Draft
        }
    }
}

/// Map key used for a hearing that has no server id yet.
pub const NEW_HEARING_KEY: &str = "new";

/// Populated hearing: the hearing plus its sections in editor order.
///
/// This is the payload of every persist action; `hearing.sections` mirrors the
/// ids of `sections` in the same order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HearingDraft {
    pub hearing: Hearing,
    #[serde(default)]
    pub sections: Vec<Section>,
}
