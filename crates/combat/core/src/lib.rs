//! Combat resolution for a real-time entity simulation.
//!
//! `combat-core` decides whether one entity can hit another and what happens
//! when it does: the collision-or-taxicab reach test, team-filtered target
//! search, the integer damage formula, the hit-point lifecycle, and one-shot
//! attackers that remove themselves after striking.
//!
//! Entities live in a [`World`] as trait objects and advertise what they can
//! do through capability accessors on [`Entity`]. Removals are always
//! deferred: combat code queues them, and the world drains the queue once per
//! tick (see [`CombatDriver::run_tick`]).
pub mod combat;
pub mod config;
pub mod driver;
pub mod entity;
pub mod error;
pub mod geometry;
pub mod stats;
pub mod team;
pub mod units;
pub mod world;

pub use combat::{
    Charge, Hit, OneShot, StrikeError, compute_damage, find_targets, is_in_range,
    one_shot_attack, reaches, strike,
};
pub use config::{CombatConfig, TargetPolicy};
pub use driver::{CombatDriver, Kill, Tick, TickReport, Treasury};
pub use entity::{Attacker, Capability, Damageable, Entity, EntityId, Ranged};
pub use error::{ErrorSeverity, GameError};
pub use geometry::{Bounds, GeometryError};
pub use stats::{CombatStats, Health, HealthError, StatsError};
pub use team::{SearchMode, Team};
pub use units::{Prop, Unit, UnitBuilder};
pub use world::{EntityArena, World, WorldError};
