//! Kamikaze attackers: strike once, then leave the world.

use tracing::debug;

use super::strike::{Hit, StrikeError, strike};
use crate::entity::{Capability, EntityId};
use crate::world::World;

/// Lifecycle of a one-shot attacker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Charge {
    /// Ready to strike; the state every one-shot attacker spawns in.
    #[default]
    Armed,
    /// Has struck and is scheduled for removal. Terminal.
    Spent,
}

/// Controller carried by entities that are consumed by their single attack.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OneShot {
    charge: Charge,
}

impl OneShot {
    pub fn armed() -> Self {
        Self {
            charge: Charge::Armed,
        }
    }

    pub fn charge(&self) -> Charge {
        self.charge
    }

    pub fn is_armed(&self) -> bool {
        self.charge == Charge::Armed
    }

    fn expend(&mut self) {
        self.charge = Charge::Spent;
    }
}

/// Resolve the single attack of a one-shot attacker.
///
/// The attacker must be [`Charge::Armed`]. Damage is applied exactly as in
/// [`strike`], the controller moves to [`Charge::Spent`], and the attacker's
/// own removal is queued on the world. The removal is never applied here:
/// callers are usually in the middle of a combat pass, and the world drains
/// its queue at the tick boundary.
///
/// # Errors
///
/// - [`StrikeError::AttackerSpent`] when called again after the first attack.
/// - Any [`strike`] error; the controller stays armed in that case.
pub fn one_shot_attack<W>(
    world: &mut W,
    attacker: EntityId,
    target: EntityId,
) -> Result<Hit, StrikeError>
where
    W: World + ?Sized,
{
    let charge = world
        .entity(attacker)
        .ok_or(StrikeError::UnknownEntity { id: attacker })?
        .as_one_shot()
        .ok_or(StrikeError::MissingCapability {
            id: attacker,
            capability: Capability::OneShot,
        })?
        .charge();
    if charge == Charge::Spent {
        return Err(StrikeError::AttackerSpent { attacker });
    }

    let hit = strike(world, attacker, target)?;

    world
        .entity_mut(attacker)
        .and_then(|entity| entity.as_one_shot_mut())
        .ok_or(StrikeError::MissingCapability {
            id: attacker,
            capability: Capability::OneShot,
        })?
        .expend();
    world.request_removal(attacker);

    debug!(target: "combat::one_shot", %attacker, %target, "one-shot attacker spent");
    Ok(hit)
}
