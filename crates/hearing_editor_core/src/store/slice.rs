//! Generic normalized slice: id map plus ordered id list.
//!
//! # Responsibility
//! - Provide the building blocks the per-slice reducers are composed from.
//!
//! # Invariants
//! - Helpers take their input by value and return the next value; a caller
//!   holding an earlier snapshot never observes the change.
//! - `all` never contains duplicates.

use crate::model::{EntityId, EntityMap};

/// Normalized entity storage for one slice.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSlice<T> {
    pub by_id: EntityMap<T>,
    pub all: Vec<EntityId>,
}

impl<T> Default for NormalizedSlice<T> {
    fn default() -> Self {
        Self {
            by_id: EntityMap::new(),
            all: Vec::new(),
        }
    }
}

impl<T> NormalizedSlice<T> {
    pub fn get(&self, id: &str) -> Option<&T> {
        self.by_id.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    /// Entities in `all` order.
    pub fn ordered(&self) -> impl Iterator<Item = &T> + '_ {
        self.all.iter().filter_map(|id| self.by_id.get(id))
    }

    /// Returns whether `all` and `by_id` describe the same id set.
    pub fn is_consistent(&self) -> bool {
        self.all.len() == self.by_id.len() && self.all.iter().all(|id| self.by_id.contains_key(id))
    }
}

/// Neighbour direction for reordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// Ordered id list for a freshly received id map (payload order).
pub fn ids_of<T>(by_id: &EntityMap<T>) -> Vec<EntityId> {
    by_id.keys().cloned().collect()
}

/// Inserts or replaces one entity.
pub fn insert_entity<T>(
    mut by_id: EntityMap<T>,
    id: EntityId,
    entity: T,
) -> EntityMap<T> {
    by_id.insert(id, entity);
    by_id
}

/// Removes one entity; absent ids leave the map unchanged.
pub fn remove_entity<T>(mut by_id: EntityMap<T>, id: &str) -> EntityMap<T> {
    by_id.shift_remove(id);
    by_id
}

/// Adds every entity of `incoming`, replacing entries with the same id.
pub fn merge_entities<T: Clone>(
    mut by_id: EntityMap<T>,
    incoming: &EntityMap<T>,
) -> EntityMap<T> {
    for (id, entity) in incoming {
        by_id.insert(id.clone(), entity.clone());
    }
    by_id
}

/// Appends `id` unless already present.
pub fn append_id(mut all: Vec<EntityId>, id: &str) -> Vec<EntityId> {
    if !all.iter().any(|existing| existing == id) {
        all.push(id.to_string());
    }
    all
}

/// Drops `id` from the ordered list.
pub fn remove_id(mut all: Vec<EntityId>, id: &str) -> Vec<EntityId> {
    all.retain(|existing| existing != id);
    all
}

/// Swaps `id` with its neighbour; no-op at the boundaries or for unknown ids.
pub fn move_id(mut all: Vec<EntityId>, id: &str, direction: MoveDirection) -> Vec<EntityId> {
    let Some(index) = all.iter().position(|existing| existing == id) else {
        return all;
    };
    let neighbour = match direction {
        MoveDirection::Up => index.checked_sub(1),
        MoveDirection::Down => Some(index + 1).filter(|next| *next < all.len()),
    };
    if let Some(neighbour) = neighbour {
        all.swap(index, neighbour);
    }
    all
}
