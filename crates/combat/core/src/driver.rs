//! Per-tick combat pass over a world.
//!
//! The driver is the imperative shell around the pure combat functions: it
//! walks every ranged attacker once, resolves at most one attack each, pays
//! kill bounties, and drains the world's removal queue when the pass is over.

use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, info};

use crate::combat::{Hit, StrikeError, find_targets, one_shot_attack, strike};
use crate::config::{CombatConfig, TargetPolicy};
use crate::entity::{Damageable, EntityId};
use crate::team::Team;
use crate::world::World;

/// Discrete simulation step counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Self = Self(0);
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kill rewards accumulated per team.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Treasury {
    balances: BTreeMap<Team, u64>,
}

impl Treasury {
    pub fn credit(&mut self, team: Team, amount: u32) {
        *self.balances.entry(team).or_default() += u64::from(amount);
    }

    pub fn balance(&self, team: Team) -> u64 {
        self.balances.get(&team).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.balances.values().sum()
    }
}

/// A death caused during a pass, and who got paid for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Kill {
    pub killer: EntityId,
    pub victim: EntityId,
    /// Team credited with the bounty.
    pub team: Team,
    pub bounty: u32,
}

/// Everything that happened in one tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Tick this report belongs to.
    pub tick: Tick,
    pub hits: Vec<Hit>,
    pub kills: Vec<Kill>,
    /// Entities drained at the end of the pass, ascending by id.
    pub removed: Vec<EntityId>,
}

/// Runs combat passes and keeps the kill ledger.
#[derive(Clone, Debug, Default)]
pub struct CombatDriver {
    config: CombatConfig,
    tick: Tick,
    treasury: Treasury,
}

impl CombatDriver {
    pub fn new(config: CombatConfig) -> Self {
        Self {
            config,
            tick: Tick::ZERO,
            treasury: Treasury::default(),
        }
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    /// Tick the next pass will run as.
    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn treasury(&self) -> &Treasury {
        &self.treasury
    }

    /// Run one combat pass.
    ///
    /// # Pass
    ///
    /// 1. Snapshot ranged attacker ids in traversal order.
    /// 2. Skip attackers that were removed, died, or spent earlier in the pass.
    /// 3. Select a target ([`CombatConfig::target_policy`]) and attack it,
    ///    through the one-shot controller when the attacker carries one.
    /// 4. On a kill, credit the bounty to the killer's team and queue the
    ///    victim's removal.
    /// 5. Queue every other damageable entity that is dead by the end of the
    ///    pass (scripted `set_hp`, spawned depleted, struck outside the
    ///    driver). No bounty is paid for these.
    /// 6. Drain the removal queue once every attacker has acted.
    ///
    /// # Errors
    ///
    /// Propagates [`StrikeError`]s, which indicate an entity that breaks its
    /// capability contract. Removals queued before the error stay pending.
    pub fn run_tick<W>(&mut self, world: &mut W) -> Result<TickReport, StrikeError>
    where
        W: World + ?Sized,
    {
        let mut report = TickReport {
            tick: self.tick,
            ..TickReport::default()
        };

        let attackers: Vec<EntityId> = world
            .entities()
            .filter(|entity| entity.as_ranged().is_some())
            .map(|entity| entity.id())
            .collect();

        for attacker in attackers {
            if world.is_pending_removal(attacker) {
                continue;
            }
            let Some(entity) = world.entity(attacker) else {
                continue;
            };
            if entity.as_damageable().is_some_and(|unit| unit.is_dead()) {
                continue;
            }
            let armed = entity.as_one_shot().map(|controller| controller.is_armed());
            if armed == Some(false) {
                continue;
            }
            let team = entity.team();

            let Some(target) = self.select_target(world, attacker) else {
                continue;
            };

            let hit = match armed {
                Some(true) => one_shot_attack(world, attacker, target)?,
                _ => strike(world, attacker, target)?,
            };

            if hit.killed {
                let bounty = world
                    .entity(target)
                    .and_then(|victim| victim.as_damageable())
                    .map_or(0, |victim| victim.bounty());
                self.treasury.credit(team, bounty);
                world.request_removal(target);
                debug!(
                    target: "combat::driver",
                    killer = %attacker,
                    victim = %target,
                    %team,
                    bounty,
                    "kill"
                );
                report.kills.push(Kill {
                    killer: attacker,
                    victim: target,
                    team,
                    bounty,
                });
            }
            report.hits.push(hit);
        }

        let corpses: Vec<EntityId> = world
            .entities()
            .filter(|entity| entity.as_damageable().is_some_and(|target| target.is_dead()))
            .map(|entity| entity.id())
            .collect();
        for corpse in corpses {
            world.request_removal(corpse);
            debug!(target: "combat::driver", %corpse, "dead entity swept");
        }

        report.removed = world.drain_removals();
        info!(
            target: "combat::driver",
            tick = %report.tick,
            hits = report.hits.len(),
            kills = report.kills.len(),
            removed = report.removed.len(),
            "combat pass complete"
        );
        self.tick = self.tick + 1;
        Ok(report)
    }

    /// Pick the target `attacker` will strike this pass, if any.
    pub fn select_target<W>(&self, world: &W, attacker: EntityId) -> Option<EntityId>
    where
        W: World + ?Sized,
    {
        let searcher = world.entity(attacker)?.as_ranged()?;
        let origin = searcher.bounds();
        let skip_dead = self.config.skip_dead_targets;

        let mut candidates = find_targets(searcher, world, self.config.search_mode)
            .into_iter()
            .filter(|target| target.id() != attacker)
            .filter(|target| !(skip_dead && target.is_dead()));

        let chosen = match self.config.target_policy {
            TargetPolicy::First => candidates.next(),
            TargetPolicy::Nearest => candidates.min_by(|a, b| {
                let to_a = origin.center_taxicab_distance(&a.bounds());
                let to_b = origin.center_taxicab_distance(&b.bounds());
                to_a.total_cmp(&to_b)
            }),
        };
        chosen.map(|target| target.id())
    }
}
