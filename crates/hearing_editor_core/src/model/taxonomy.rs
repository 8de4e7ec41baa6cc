//! Labels and contact persons referenced by hearings.

use crate::model::fields::{deserialize_id, deserialize_localized, ExtraFields, LocalizedText};
use crate::model::EntityId;
use serde::{Deserialize, Serialize};

/// Keyword label ("asiasana") attachable to hearings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Label {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: EntityId,
    #[serde(default, deserialize_with = "deserialize_localized")]
    pub label: LocalizedText,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Contact person shown on a hearing page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactPerson {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub extra: ExtraFields,
}
