//! Combat resolution.
//!
//! # Core Functions
//!
//! - `is_in_range`: collision-or-taxicab reach test
//! - `find_targets`: team-filtered search over a world
//! - `compute_damage`: `attack / (defense + 1)`
//! - `strike`: repeatable attack against one target
//! - `one_shot_attack`: single attack that consumes the attacker
//!
//! The reach test and the damage formula are pure. `strike` and
//! `one_shot_attack` mutate the target's hp and, for one-shot attackers,
//! queue a deferred removal; they never change the world's structure.

pub mod damage;
pub mod one_shot;
pub mod range;
pub mod search;
pub mod strike;

pub use damage::compute_damage;
pub use one_shot::{Charge, OneShot, one_shot_attack};
pub use range::{is_in_range, reaches};
pub use search::find_targets;
pub use strike::{Hit, StrikeError, strike};
