//! In-memory world with a deferred removal queue.

use std::collections::BTreeSet;

use tracing::debug;

use super::World;
use crate::entity::{Entity, EntityId};
use crate::error::{ErrorSeverity, GameError};

/// Entities kept in spawn order plus the ids waiting to be removed.
///
/// Traversal order is spawn order, which keeps every tick deterministic.
#[derive(Default)]
pub struct EntityArena {
    entities: Vec<Box<dyn Entity>>,
    pending_removal: BTreeSet<EntityId>,
    next_entity_id: u32,
}

impl EntityArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a new unique EntityId.
    ///
    /// Ids are never reused, even after the entity holding them is drained.
    pub fn allocate_id(&mut self) -> Result<EntityId, WorldError> {
        let id = EntityId(self.next_entity_id);
        self.next_entity_id = self
            .next_entity_id
            .checked_add(1)
            .ok_or(WorldError::EntityIdOverflow {
                current: self.next_entity_id,
            })?;
        Ok(id)
    }

    /// Adds an entity at the end of the traversal order.
    pub fn spawn(&mut self, entity: Box<dyn Entity>) -> Result<EntityId, WorldError> {
        let id = entity.id();
        if self.contains(id) {
            return Err(WorldError::DuplicateEntity { id });
        }
        // Keep the allocator ahead of externally chosen ids.
        if id.0 >= self.next_entity_id {
            self.next_entity_id = id.0.saturating_add(1);
        }
        self.entities.push(entity);
        debug!(target: "combat::world", %id, population = self.entities.len(), "spawned");
        Ok(id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.index_of(id).is_some()
    }

    /// Number of stored entities, including ones pending removal.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn pending_removals(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.pending_removal.iter().copied()
    }

    fn index_of(&self, id: EntityId) -> Option<usize> {
        self.entities.iter().position(|entity| entity.id() == id)
    }
}

impl World for EntityArena {
    fn entities(&self) -> impl Iterator<Item = &dyn Entity> {
        self.entities
            .iter()
            .filter(|entity| !self.pending_removal.contains(&entity.id()))
            .map(|entity| -> &dyn Entity { entity.as_ref() })
    }

    fn entity(&self, id: EntityId) -> Option<&dyn Entity> {
        let index = self.index_of(id)?;
        let entity: &dyn Entity = self.entities[index].as_ref();
        Some(entity)
    }

    fn entity_mut(&mut self, id: EntityId) -> Option<&mut dyn Entity> {
        let index = self.index_of(id)?;
        let entity: &mut dyn Entity = self.entities[index].as_mut();
        Some(entity)
    }

    fn request_removal(&mut self, id: EntityId) -> bool {
        if !self.contains(id) {
            debug!(target: "combat::world", %id, "removal requested for unknown entity");
            return false;
        }
        let queued = self.pending_removal.insert(id);
        if queued {
            debug!(target: "combat::world", %id, "removal deferred");
        }
        queued
    }

    fn is_pending_removal(&self, id: EntityId) -> bool {
        self.pending_removal.contains(&id)
    }

    fn drain_removals(&mut self) -> Vec<EntityId> {
        if self.pending_removal.is_empty() {
            return Vec::new();
        }
        let drained = std::mem::take(&mut self.pending_removal);
        self.entities.retain(|entity| !drained.contains(&entity.id()));
        debug!(
            target: "combat::world",
            removed = drained.len(),
            population = self.entities.len(),
            "drained removals"
        );
        drained.into_iter().collect()
    }
}

/// Errors raised by [`EntityArena`] bookkeeping.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    #[error("entity {id} already exists")]
    DuplicateEntity { id: EntityId },

    #[error("entity id overflow (current: {current})")]
    EntityIdOverflow { current: u32 },
}

impl GameError for WorldError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::DuplicateEntity { .. } => ErrorSeverity::Validation,
            Self::EntityIdOverflow { .. } => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateEntity { .. } => "WORLD_DUPLICATE_ENTITY",
            Self::EntityIdOverflow { .. } => "WORLD_ENTITY_ID_OVERFLOW",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Bounds;
    use crate::team::Team;
    use crate::units::Prop;

    fn prop(id: u32) -> Box<dyn Entity> {
        Box::new(Prop::new(
            EntityId(id),
            Team::Left,
            Bounds::new(id as f64, 0.0, 1.0, 1.0).unwrap(),
        ))
    }

    fn ids(arena: &EntityArena) -> Vec<EntityId> {
        arena.entities().map(|entity| entity.id()).collect()
    }

    #[test]
    fn traversal_follows_spawn_order() {
        let mut arena = EntityArena::new();
        for id in [3, 1, 2] {
            arena.spawn(prop(id)).unwrap();
        }

        assert_eq!(ids(&arena), vec![EntityId(3), EntityId(1), EntityId(2)]);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut arena = EntityArena::new();
        arena.spawn(prop(7)).unwrap();

        let err = arena.spawn(prop(7)).unwrap_err();
        assert_eq!(err, WorldError::DuplicateEntity { id: EntityId(7) });
        assert_eq!(err.severity(), ErrorSeverity::Validation);
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn allocated_ids_skip_spawned_ones() {
        let mut arena = EntityArena::new();
        assert_eq!(arena.allocate_id().unwrap(), EntityId(0));
        arena.spawn(prop(5)).unwrap();
        assert_eq!(arena.allocate_id().unwrap(), EntityId(6));
    }

    #[test]
    fn pending_entities_are_hidden_but_not_removed() {
        let mut arena = EntityArena::new();
        for id in 0..3 {
            arena.spawn(prop(id)).unwrap();
        }

        assert!(arena.request_removal(EntityId(1)));

        assert_eq!(ids(&arena), vec![EntityId(0), EntityId(2)]);
        assert_eq!(arena.len(), 3);
        assert!(arena.entity(EntityId(1)).is_some());
        assert!(arena.is_pending_removal(EntityId(1)));
    }

    #[test]
    fn removal_requests_are_idempotent() {
        let mut arena = EntityArena::new();
        arena.spawn(prop(0)).unwrap();

        assert!(arena.request_removal(EntityId(0)));
        assert!(!arena.request_removal(EntityId(0)));
        assert_eq!(arena.pending_removals().count(), 1);

        assert_eq!(arena.drain_removals(), vec![EntityId(0)]);
        assert!(arena.is_empty());
    }

    #[test]
    fn unknown_ids_are_not_queued() {
        let mut arena = EntityArena::new();
        assert!(!arena.request_removal(EntityId(9)));
        assert!(arena.drain_removals().is_empty());
    }

    #[test]
    fn drain_returns_ids_in_ascending_order() {
        let mut arena = EntityArena::new();
        for id in 0..5 {
            arena.spawn(prop(id)).unwrap();
        }
        arena.request_removal(EntityId(4));
        arena.request_removal(EntityId(1));

        assert_eq!(arena.drain_removals(), vec![EntityId(1), EntityId(4)]);
        assert_eq!(ids(&arena), vec![EntityId(0), EntityId(2), EntityId(3)]);
        assert!(!arena.is_pending_removal(EntityId(1)));
    }
}
