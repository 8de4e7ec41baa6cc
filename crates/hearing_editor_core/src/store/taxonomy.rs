//! `labels` and `contact_persons` catalog slices.
//!
//! Catalogs list what the editor can attach to a hearing. They are filled by
//! their own receive actions and by whatever a hearing payload carries, and
//! survive `CLEAR_EDITOR`.

use crate::model::taxonomy::{ContactPerson, Label};
use crate::model::{EntityId, EntityMap};
use crate::store::action::{EditorAction, Entities};
use crate::store::slice::{append_id, insert_entity, merge_entities, NormalizedSlice};

/// Entity kinds that live in a catalog slice.
pub trait CatalogEntity: Clone {
    fn entity_id(&self) -> &str;

    /// Full catalog replacement carried by `action`, if any.
    fn received(action: &EditorAction) -> Option<&[Self]>;

    /// Single entity added by `action`, if any.
    fn added(action: &EditorAction) -> Option<&Self>;

    /// This catalog's map inside a normalized hearing payload.
    fn normalized(entities: &Entities) -> &EntityMap<Self>;
}

impl CatalogEntity for Label {
    fn entity_id(&self) -> &str {
        self.id.as_str()
    }

    fn received(action: &EditorAction) -> Option<&[Self]> {
        match action {
            EditorAction::ReceiveLabels { labels } => Some(labels.as_slice()),
            _ => None,
        }
    }

    fn added(action: &EditorAction) -> Option<&Self> {
        match action {
            EditorAction::AddLabel { label } => Some(label),
            _ => None,
        }
    }

    fn normalized(entities: &Entities) -> &EntityMap<Self> {
        &entities.labels
    }
}

impl CatalogEntity for ContactPerson {
    fn entity_id(&self) -> &str {
        self.id.as_str()
    }

    fn received(action: &EditorAction) -> Option<&[Self]> {
        match action {
            EditorAction::ReceiveContactPersons { contacts } => Some(contacts.as_slice()),
            _ => None,
        }
    }

    fn added(action: &EditorAction) -> Option<&Self> {
        match action {
            EditorAction::AddContact { contact } => Some(contact),
            _ => None,
        }
    }

    fn normalized(entities: &Entities) -> &EntityMap<Self> {
        &entities.contact_persons
    }
}

/// Reduces a catalog id map.
pub fn catalog_by_id<T: CatalogEntity>(
    state: EntityMap<T>,
    action: &EditorAction,
) -> EntityMap<T> {
    if let Some(received) = T::received(action) {
        return received
            .iter()
            .map(|entity| (entity.entity_id().to_string(), entity.clone()))
            .collect();
    }
    if let Some(entity) = T::added(action) {
        return insert_entity(state, entity.entity_id().to_string(), entity.clone());
    }
    match action.entities() {
        Some(entities) => merge_entities(state, T::normalized(entities)),
        None => state,
    }
}

/// Reduces a catalog order.
pub fn catalog_all<T: CatalogEntity>(state: Vec<EntityId>, action: &EditorAction) -> Vec<EntityId> {
    if let Some(received) = T::received(action) {
        return received
            .iter()
            .map(|entity| entity.entity_id().to_string())
            .fold(Vec::with_capacity(received.len()), |all, id| append_id(all, &id));
    }
    if let Some(entity) = T::added(action) {
        return append_id(state, entity.entity_id());
    }
    match action.entities() {
        Some(entities) => T::normalized(entities)
            .keys()
            .fold(state, |all, id| append_id(all, id)),
        None => state,
    }
}

/// Combined catalog reducer.
pub fn reduce_catalog<T: CatalogEntity>(
    state: NormalizedSlice<T>,
    action: &EditorAction,
) -> NormalizedSlice<T> {
    let NormalizedSlice { by_id, all } = state;
    NormalizedSlice {
        by_id: catalog_by_id(by_id, action),
        all: catalog_all::<T>(all, action),
    }
}
