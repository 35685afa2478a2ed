//! Capability contracts every world entity can opt into.
//!
//! The world stores entities as trait objects. Combat code never assumes a
//! concrete type: it asks an [`Entity`] for the capability it needs
//! (`as_damageable`, `as_ranged`, ...) and treats `None` as "does not apply".

use std::fmt;

use crate::combat::OneShot;
use crate::geometry::Bounds;
use crate::stats::{Health, HealthError};
use crate::team::Team;

/// Unique identifier for any entity tracked by a world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Capability names used in error reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Capability {
    Damageable,
    Attacker,
    Ranged,
    OneShot,
}

/// Anything positioned in the world.
///
/// Capability accessors are independent overrides. An entity returning
/// `Some` from [`Entity::as_ranged`] should also return `Some` from
/// [`Entity::as_attacker`]; [`strike`](crate::combat::strike) tolerates the
/// omission by reading attack power through the ranged view.
pub trait Entity {
    fn id(&self) -> EntityId;

    /// Current spatial footprint.
    fn bounds(&self) -> Bounds;

    fn team(&self) -> Team;

    fn as_damageable(&self) -> Option<&dyn Damageable> {
        None
    }

    fn as_damageable_mut(&mut self) -> Option<&mut dyn Damageable> {
        None
    }

    fn as_attacker(&self) -> Option<&dyn Attacker> {
        None
    }

    fn as_ranged(&self) -> Option<&dyn Ranged> {
        None
    }

    /// Self-destruct controller of kamikaze attackers.
    fn as_one_shot(&self) -> Option<&OneShot> {
        None
    }

    fn as_one_shot_mut(&mut self) -> Option<&mut OneShot> {
        None
    }
}

/// Combat target: an entity with hit points.
///
/// Implementors expose their [`Health`] meter; the hp accessors and the
/// death predicate are derived from it so every target follows the same
/// lifecycle.
pub trait Damageable: Entity {
    fn health(&self) -> &Health;

    fn health_mut(&mut self) -> &mut Health;

    fn defense(&self) -> u32;

    /// Money granted to the killer's team when this entity dies.
    fn bounty(&self) -> u32;

    fn hp(&self) -> i32 {
        self.health().current()
    }

    fn max_hp(&self) -> i32 {
        self.health().maximum()
    }

    /// Scripted override of the current hp. Must not exceed [`Damageable::max_hp`].
    fn set_hp(&mut self, hp: i32) -> Result<(), HealthError> {
        self.health_mut().set(hp)
    }

    /// Applies `damage`; returns true only for the hit that caused death.
    fn inflict_damage(&mut self, damage: u32) -> bool {
        self.health_mut().inflict(damage)
    }

    fn is_dead(&self) -> bool {
        self.health().is_depleted()
    }
}

/// Entity that deals damage.
pub trait Attacker {
    fn attack(&self) -> u32;
}

/// Attacker with a reach, positioned and affiliated with a team.
pub trait Ranged: Attacker + Entity {
    /// Maximum center taxicab distance for non-touching targets.
    fn range(&self) -> f64;
}
