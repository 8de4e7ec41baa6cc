//! Field-level helpers shared by editor entities.
//!
//! # Responsibility
//! - Apply single-field edits (`{[field]: value}` merges) through serde.
//! - Tolerate the loose shapes the hearings API sends (numeric ids, `null`
//!   strings, label objects in place of label ids).
//!
//! # Invariants
//! - A failed merge never yields a partially edited entity.

use crate::model::EntityId;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Server fields the editor keeps verbatim but does not interpret.
pub type ExtraFields = BTreeMap<String, Value>;

/// Per-language text, keyed by language code (`fi`, `sv`, `en`, ...).
pub type LocalizedText = BTreeMap<String, String>;

/// Error from applying one field edit to an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldMergeError {
    /// Field name is blank.
    EmptyField,
    /// Entity did not serialize to a JSON object.
    NotAnObject(&'static str),
    /// Value has the wrong shape for a typed field.
    InvalidValue { field: String, reason: String },
}

impl Display for FieldMergeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField => write!(f, "field name must not be empty"),
            Self::NotAnObject(kind) => write!(f, "{kind} does not serialize to an object"),
            Self::InvalidValue { field, reason } => {
                write!(f, "invalid value for field `{field}`: {reason}")
            }
        }
    }
}

impl Error for FieldMergeError {}

/// Returns a copy of `entity` with `field` set to `value`.
///
/// Known fields are re-parsed into their typed representation; unknown ones
/// land in the entity's flattened extra-field map.
pub fn merge_field<T>(entity: &T, field: &str, value: Value) -> Result<T, FieldMergeError>
where
    T: Serialize + DeserializeOwned,
{
    if field.trim().is_empty() {
        return Err(FieldMergeError::EmptyField);
    }

    let mut object = match serde_json::to_value(entity) {
        Ok(Value::Object(object)) => object,
        _ => return Err(FieldMergeError::NotAnObject(std::any::type_name::<T>())),
    };
    object.insert(field.to_string(), value);

    serde_json::from_value(Value::Object(object)).map_err(|err| FieldMergeError::InvalidValue {
        field: field.to_string(),
        reason: err.to_string(),
    })
}

/// Extracts an id from a string, number, or `{ "id": ... }` object.
pub fn id_from_value(value: &Value) -> Option<EntityId> {
    match value {
        Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
        Value::Number(number) => Some(number.to_string()),
        Value::Object(object) => object.get("id").and_then(id_from_value),
        _ => None,
    }
}

/// Deserializes a required id.
pub fn deserialize_id<'de, D>(deserializer: D) -> Result<EntityId, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    id_from_value(&value).ok_or_else(|| serde::de::Error::custom(format!("invalid id: {value}")))
}

/// Deserializes an optional id; `null` maps to `None`.
pub fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<EntityId>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    id_from_value(&value)
        .map(Some)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid id: {value}")))
}

/// Deserializes an ordered id list, keeping first occurrences only.
pub fn deserialize_id_list<'de, D>(deserializer: D) -> Result<Vec<EntityId>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    let mut seen = BTreeSet::new();
    let mut ids = Vec::with_capacity(values.len());
    for value in &values {
        let id = id_from_value(value)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid id: {value}")))?;
        if seen.insert(id.clone()) {
            ids.push(id);
        }
    }
    Ok(ids)
}

/// Deserializes an unordered id set.
pub fn deserialize_id_set<'de, D>(deserializer: D) -> Result<BTreeSet<EntityId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserialize_id_list(deserializer)?.into_iter().collect())
}

/// Deserializes per-language text, dropping `null` translations.
pub fn deserialize_localized<'de, D>(deserializer: D) -> Result<LocalizedText, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, Option<String>>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(language, text)| text.map(|text| (language, text)))
        .collect())
}

/// Deserializes a string field where `null` means empty.
pub fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserializes an optional timestamp; `null` and `""` both map to `None`.
pub fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|value| !value.trim().is_empty()))
}

pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}
