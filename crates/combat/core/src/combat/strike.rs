//! Applying one attack to one target.

use tracing::debug;

use super::damage::compute_damage;
use crate::entity::{Capability, EntityId};
use crate::error::{ErrorSeverity, GameError};
use crate::world::World;

/// Result of a resolved attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hit {
    pub attacker: EntityId,
    pub target: EntityId,
    /// Damage applied to the target.
    pub damage: u32,
    /// Target hp after the hit; may be negative.
    pub remaining_hp: i32,
    /// True only when this hit moved the target from alive to dead.
    pub killed: bool,
}

/// Resolve a repeatable attack from `attacker` against `target`.
///
/// Damage comes from [`compute_damage`] with the attacker's attack and the
/// target's defense. The core does not remove the dead or pay bounties; the
/// caller reacts to [`Hit::killed`].
///
/// # Errors
///
/// Either id missing from the world, an attacker without the attacker
/// capability, or a target that cannot take damage.
pub fn strike<W>(world: &mut W, attacker: EntityId, target: EntityId) -> Result<Hit, StrikeError>
where
    W: World + ?Sized,
{
    let attack = attack_power(world, attacker)?;

    let victim = world
        .entity_mut(target)
        .ok_or(StrikeError::UnknownEntity { id: target })?
        .as_damageable_mut()
        .ok_or(StrikeError::MissingCapability {
            id: target,
            capability: Capability::Damageable,
        })?;

    let damage = compute_damage(attack, victim.defense());
    let killed = victim.inflict_damage(damage);
    let hit = Hit {
        attacker,
        target,
        damage,
        remaining_hp: victim.hp(),
        killed,
    };

    debug!(
        target: "combat::strike",
        %attacker,
        %target,
        damage,
        remaining_hp = hit.remaining_hp,
        killed,
        "strike resolved"
    );
    Ok(hit)
}

fn attack_power<W>(world: &W, attacker: EntityId) -> Result<u32, StrikeError>
where
    W: World + ?Sized,
{
    let entity = world
        .entity(attacker)
        .ok_or(StrikeError::UnknownEntity { id: attacker })?;
    // A ranged entity is an attacker even if it only overrides `as_ranged`.
    entity
        .as_attacker()
        .map(|capability| capability.attack())
        .or_else(|| entity.as_ranged().map(|capability| capability.attack()))
        .ok_or(StrikeError::MissingCapability {
            id: attacker,
            capability: Capability::Attacker,
        })
}

/// Contract violations detected while resolving an attack.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StrikeError {
    #[error("entity {id} is not in the world")]
    UnknownEntity { id: EntityId },

    #[error("entity {id} lacks the {capability} capability")]
    MissingCapability {
        id: EntityId,
        capability: Capability,
    },

    #[error("one-shot attacker {attacker} has already been spent")]
    AttackerSpent { attacker: EntityId },
}

impl GameError for StrikeError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownEntity { .. } => "STRIKE_UNKNOWN_ENTITY",
            Self::MissingCapability { .. } => "STRIKE_MISSING_CAPABILITY",
            Self::AttackerSpent { .. } => "STRIKE_ATTACKER_SPENT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Attacker, Damageable, Entity, Ranged};
    use crate::geometry::Bounds;
    use crate::team::Team;
    use crate::units::{Prop, UnitBuilder};
    use crate::world::EntityArena;

    fn arena_with(attack: u32, target_hp: i32, target_defense: u32) -> EntityArena {
        let footprint = Bounds::new(0.0, 0.0, 1.0, 1.0).unwrap();
        let mut arena = EntityArena::new();
        arena
            .spawn(Box::new(
                UnitBuilder::new(EntityId(1), Team::Left, footprint)
                    .attack(attack)
                    .build()
                    .unwrap(),
            ))
            .unwrap();
        arena
            .spawn(Box::new(
                UnitBuilder::new(EntityId(2), Team::Right, footprint)
                    .hp(target_hp)
                    .defense(target_defense)
                    .build()
                    .unwrap(),
            ))
            .unwrap();
        arena
    }

    fn hp_of(arena: &EntityArena, id: u32) -> i32 {
        arena
            .entity(EntityId(id))
            .and_then(|entity| entity.as_damageable())
            .map(|target| target.hp())
            .unwrap()
    }

    #[test]
    fn strike_applies_formula_damage() {
        let mut arena = arena_with(10, 20, 1);

        let hit = strike(&mut arena, EntityId(1), EntityId(2)).unwrap();

        assert_eq!(hit.damage, 5);
        assert_eq!(hit.remaining_hp, 15);
        assert!(!hit.killed);
        assert_eq!(hp_of(&arena, 2), 15);
    }

    #[test]
    fn killing_blow_is_reported_once() {
        let mut arena = arena_with(7, 5, 0);

        let first = strike(&mut arena, EntityId(1), EntityId(2)).unwrap();
        assert!(first.killed);
        assert_eq!(first.remaining_hp, -2);

        let second = strike(&mut arena, EntityId(1), EntityId(2)).unwrap();
        assert!(!second.killed);
        assert_eq!(second.remaining_hp, -9);
    }

    #[test]
    fn strike_does_not_remove_the_dead() {
        let mut arena = arena_with(50, 5, 0);

        strike(&mut arena, EntityId(1), EntityId(2)).unwrap();

        assert!(!arena.is_pending_removal(EntityId(2)));
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn missing_entities_are_contract_violations() {
        let mut arena = arena_with(1, 1, 0);

        let err = strike(&mut arena, EntityId(9), EntityId(2)).unwrap_err();
        assert_eq!(err, StrikeError::UnknownEntity { id: EntityId(9) });
        assert_eq!(err.severity(), ErrorSeverity::Internal);

        let err = strike(&mut arena, EntityId(1), EntityId(9)).unwrap_err();
        assert_eq!(err.error_code(), "STRIKE_UNKNOWN_ENTITY");
    }

    /// Ranged entity that only overrides `as_ranged`.
    struct Turret;

    impl Entity for Turret {
        fn id(&self) -> EntityId {
            EntityId(5)
        }

        fn bounds(&self) -> Bounds {
            Bounds::new(0.0, 0.0, 1.0, 1.0).unwrap()
        }

        fn team(&self) -> Team {
            Team::Left
        }

        fn as_ranged(&self) -> Option<&dyn Ranged> {
            Some(self)
        }
    }

    impl Attacker for Turret {
        fn attack(&self) -> u32 {
            9
        }
    }

    impl Ranged for Turret {
        fn range(&self) -> f64 {
            4.0
        }
    }

    #[test]
    fn ranged_capability_implies_attacker() {
        let mut arena = arena_with(1, 20, 2);
        arena.spawn(Box::new(Turret)).unwrap();
        assert!(arena.entity(EntityId(5)).unwrap().as_attacker().is_none());

        let hit = strike(&mut arena, EntityId(5), EntityId(2)).unwrap();

        assert_eq!(hit.damage, 3);
        assert_eq!(hp_of(&arena, 2), 17);
    }

    #[test]
    fn props_can_neither_attack_nor_be_hit() {
        let mut arena = arena_with(3, 10, 0);
        arena
            .spawn(Box::new(Prop::new(
                EntityId(3),
                Team::Right,
                Bounds::new(0.0, 0.0, 1.0, 1.0).unwrap(),
            )))
            .unwrap();

        assert_eq!(
            strike(&mut arena, EntityId(1), EntityId(3)),
            Err(StrikeError::MissingCapability {
                id: EntityId(3),
                capability: Capability::Damageable,
            })
        );
        assert_eq!(
            strike(&mut arena, EntityId(3), EntityId(2)),
            Err(StrikeError::MissingCapability {
                id: EntityId(3),
                capability: Capability::Attacker,
            })
        );
        assert_eq!(hp_of(&arena, 2), 10);
    }
}
