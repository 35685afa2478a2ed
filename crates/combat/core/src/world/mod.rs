//! The entity collection combat code queries and mutates.
//!
//! Structural changes are two-phase: [`World::request_removal`] only queues an
//! id, and [`World::drain_removals`] applies the queue at a tick boundary.
//! Traversals borrow the world immutably, so nothing can be removed while one
//! is in progress.
mod arena;

pub use arena::{EntityArena, WorldError};

use crate::entity::{Entity, EntityId};

/// Entity storage contract required by the combat core.
pub trait World {
    /// Traverses the current population in a stable order.
    ///
    /// Entities with a pending removal request are skipped.
    fn entities(&self) -> impl Iterator<Item = &dyn Entity>;

    /// Looks up an entity by id, including ones pending removal.
    fn entity(&self, id: EntityId) -> Option<&dyn Entity>;

    fn entity_mut(&mut self, id: EntityId) -> Option<&mut dyn Entity>;

    /// Queues `id` for removal at the next drain.
    ///
    /// Idempotent: returns true only when the request was newly queued.
    fn request_removal(&mut self, id: EntityId) -> bool;

    fn is_pending_removal(&self, id: EntityId) -> bool;

    /// Removes every queued entity and returns their ids.
    fn drain_removals(&mut self) -> Vec<EntityId>;
}
