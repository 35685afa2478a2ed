//! Generic combatants and inert scenery.
//!
//! Concrete species (walkers, archers, ...) are just differently configured
//! [`Unit`]s; nothing in the combat core depends on which one it is looking at.

use crate::combat::OneShot;
use crate::entity::{Attacker, Damageable, Entity, EntityId, Ranged};
use crate::geometry::Bounds;
use crate::stats::{CombatStats, Health, StatsError};
use crate::team::Team;

// ============================================================================
// Unit
// ============================================================================

/// A combatant with every capability: it can be hit, attack, and reach.
///
/// Units carrying a [`OneShot`] controller are consumed by their first attack.
#[derive(Clone, Debug, PartialEq)]
pub struct Unit {
    id: EntityId,
    team: Team,
    bounds: Bounds,
    health: Health,
    stats: CombatStats,
    one_shot: Option<OneShot>,
}

impl Unit {
    pub fn stats(&self) -> &CombatStats {
        &self.stats
    }

    /// Moves the unit's footprint; positions are driven by the host simulation.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    pub fn is_one_shot(&self) -> bool {
        self.one_shot.is_some()
    }
}

impl Entity for Unit {
    fn id(&self) -> EntityId {
        self.id
    }

    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn team(&self) -> Team {
        self.team
    }

    fn as_damageable(&self) -> Option<&dyn Damageable> {
        Some(self)
    }

    fn as_damageable_mut(&mut self) -> Option<&mut dyn Damageable> {
        Some(self)
    }

    fn as_attacker(&self) -> Option<&dyn Attacker> {
        Some(self)
    }

    fn as_ranged(&self) -> Option<&dyn Ranged> {
        Some(self)
    }

    fn as_one_shot(&self) -> Option<&OneShot> {
        self.one_shot.as_ref()
    }

    fn as_one_shot_mut(&mut self) -> Option<&mut OneShot> {
        self.one_shot.as_mut()
    }
}

impl Damageable for Unit {
    fn health(&self) -> &Health {
        &self.health
    }

    fn health_mut(&mut self) -> &mut Health {
        &mut self.health
    }

    fn defense(&self) -> u32 {
        self.stats.defense
    }

    fn bounty(&self) -> u32 {
        self.stats.bounty
    }
}

impl Attacker for Unit {
    fn attack(&self) -> u32 {
        self.stats.attack
    }
}

impl Ranged for Unit {
    fn range(&self) -> f64 {
        self.stats.range()
    }
}

// ============================================================================
// Unit Builder
// ============================================================================

/// Validating builder for [`Unit`].
///
/// Defaults: 1 max hp at full health, zero attack/defense/range/bounty, no
/// one-shot controller.
#[derive(Clone, Debug)]
pub struct UnitBuilder {
    id: EntityId,
    team: Team,
    bounds: Bounds,
    max_hp: i32,
    hp: Option<i32>,
    attack: u32,
    defense: u32,
    range: f64,
    bounty: u32,
    one_shot: bool,
}

impl UnitBuilder {
    pub fn new(id: EntityId, team: Team, bounds: Bounds) -> Self {
        Self {
            id,
            team,
            bounds,
            max_hp: 1,
            hp: None,
            attack: 0,
            defense: 0,
            range: 0.0,
            bounty: 0,
            one_shot: false,
        }
    }

    /// Sets the maximum hp; the unit spawns at full health unless
    /// [`UnitBuilder::current_hp`] says otherwise.
    pub fn hp(mut self, max_hp: i32) -> Self {
        self.max_hp = max_hp;
        self
    }

    pub fn current_hp(mut self, hp: i32) -> Self {
        self.hp = Some(hp);
        self
    }

    pub fn attack(mut self, attack: u32) -> Self {
        self.attack = attack;
        self
    }

    pub fn defense(mut self, defense: u32) -> Self {
        self.defense = defense;
        self
    }

    pub fn range(mut self, range: f64) -> Self {
        self.range = range;
        self
    }

    pub fn bounty(mut self, bounty: u32) -> Self {
        self.bounty = bounty;
        self
    }

    /// Arms a one-shot controller: the unit is consumed by its first attack.
    pub fn one_shot(mut self) -> Self {
        self.one_shot = true;
        self
    }

    pub fn build(self) -> Result<Unit, StatsError> {
        let health = Health::new(self.hp.unwrap_or(self.max_hp), self.max_hp)?;
        let stats = CombatStats::new(self.attack, self.defense, self.range, self.bounty)?;
        Ok(Unit {
            id: self.id,
            team: self.team,
            bounds: self.bounds,
            health,
            stats,
            one_shot: self.one_shot.then(OneShot::armed),
        })
    }
}

// ============================================================================
// Prop
// ============================================================================

/// Positioned, team-affiliated entity with no combat capability.
///
/// Examples: banners, obstacles, projectiles still in flight.
#[derive(Clone, Debug, PartialEq)]
pub struct Prop {
    id: EntityId,
    team: Team,
    bounds: Bounds,
}

impl Prop {
    pub fn new(id: EntityId, team: Team, bounds: Bounds) -> Self {
        Self { id, team, bounds }
    }
}

impl Entity for Prop {
    fn id(&self) -> EntityId {
        self.id
    }

    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn team(&self) -> Team {
        self.team
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::Charge;

    fn footprint() -> Bounds {
        Bounds::new(0.0, 0.0, 1.0, 1.0).unwrap()
    }

    #[test]
    fn builder_sets_every_stat() {
        let unit = UnitBuilder::new(EntityId(4), Team::Right, footprint())
            .hp(30)
            .current_hp(12)
            .attack(8)
            .defense(2)
            .range(6.5)
            .bounty(15)
            .build()
            .unwrap();

        assert_eq!(unit.hp(), 12);
        assert_eq!(unit.max_hp(), 30);
        assert_eq!(unit.attack(), 8);
        assert_eq!(unit.defense(), 2);
        assert_eq!(unit.range(), 6.5);
        assert_eq!(unit.bounty(), 15);
        assert_eq!(unit.team(), Team::Right);
        assert!(!unit.is_one_shot());
        assert!(unit.as_one_shot().is_none());
    }

    #[test]
    fn unit_exposes_all_capabilities() {
        let mut unit = UnitBuilder::new(EntityId(1), Team::Left, footprint())
            .build()
            .unwrap();

        assert!(unit.as_damageable().is_some());
        assert!(unit.as_attacker().is_some());
        assert!(unit.as_ranged().is_some());
        assert!(unit.as_damageable_mut().is_some());
    }

    #[test]
    fn one_shot_units_spawn_armed() {
        let unit = UnitBuilder::new(EntityId(1), Team::Left, footprint())
            .one_shot()
            .build()
            .unwrap();

        assert_eq!(unit.as_one_shot().map(OneShot::charge), Some(Charge::Armed));
    }

    #[test]
    fn builder_rejects_degenerate_stats() {
        let negative_range = UnitBuilder::new(EntityId(1), Team::Left, footprint())
            .range(-1.0)
            .build();
        assert!(matches!(negative_range, Err(StatsError::InvalidRange { .. })));

        let overfull = UnitBuilder::new(EntityId(1), Team::Left, footprint())
            .hp(10)
            .current_hp(11)
            .build();
        assert!(matches!(
            overfull,
            Err(StatsError::InitialHpOutOfBounds { .. })
        ));

        let no_health = UnitBuilder::new(EntityId(1), Team::Left, footprint())
            .hp(0)
            .build();
        assert!(matches!(no_health, Err(StatsError::InvalidMaxHp { .. })));
    }

    #[test]
    fn set_hp_goes_through_the_maximum_check() {
        let mut unit = UnitBuilder::new(EntityId(1), Team::Left, footprint())
            .hp(10)
            .build()
            .unwrap();

        assert!(unit.set_hp(11).is_err());
        assert_eq!(unit.hp(), 10);
        unit.set_hp(0).unwrap();
        assert!(unit.is_dead());
    }

    #[test]
    fn props_expose_no_combat_capability() {
        let mut prop = Prop::new(EntityId(3), Team::Left, footprint());

        assert!(prop.as_damageable().is_none());
        assert!(prop.as_damageable_mut().is_none());
        assert!(prop.as_attacker().is_none());
        assert!(prop.as_ranged().is_none());
        assert!(prop.as_one_shot_mut().is_none());
    }
}
