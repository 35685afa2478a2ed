//! Combat statistics and the hit-point lifecycle.
//!
//! Values are validated when they are constructed, so the damage formula and
//! the range test never see degenerate input.

use crate::error::{ErrorSeverity, GameError};

// ============================================================================
// Health
// ============================================================================

/// Hit-point meter driving the Alive → Dead lifecycle.
///
/// `current` may drop below zero once damage exceeds what is left; the entity
/// counts as dead as soon as `current <= 0`. There is no way back: damage only
/// lowers the meter and [`Health::set`] is reserved for scripted overrides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "HealthRepr")
)]
pub struct Health {
    current: i32,
    maximum: i32,
}

impl Health {
    /// Creates a meter with `0 <= current <= maximum`.
    pub fn new(current: i32, maximum: i32) -> Result<Self, StatsError> {
        if maximum <= 0 {
            return Err(StatsError::InvalidMaxHp { maximum });
        }
        if current < 0 || current > maximum {
            return Err(StatsError::InitialHpOutOfBounds { current, maximum });
        }
        Ok(Self { current, maximum })
    }

    /// Rebuilds a meter from stored values.
    ///
    /// Unlike [`Health::new`] a depleted (negative) `current` is accepted, so
    /// dead entities survive a save/load cycle. `current` still may not exceed
    /// a positive `maximum`.
    pub fn restore(current: i32, maximum: i32) -> Result<Self, StatsError> {
        if maximum <= 0 {
            return Err(StatsError::InvalidMaxHp { maximum });
        }
        if current > maximum {
            return Err(StatsError::HpAboveMaximum { current, maximum });
        }
        Ok(Self { current, maximum })
    }

    /// Creates a meter filled to `maximum`.
    pub fn full(maximum: i32) -> Result<Self, StatsError> {
        Self::new(maximum, maximum)
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn maximum(&self) -> i32 {
        self.maximum
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0
    }

    /// Overrides the current value.
    ///
    /// Values above the maximum are a caller bug and are rejected untouched.
    pub fn set(&mut self, hp: i32) -> Result<(), HealthError> {
        if hp > self.maximum {
            return Err(HealthError::AboveMaximum {
                requested: hp,
                maximum: self.maximum,
            });
        }
        self.current = hp;
        Ok(())
    }

    /// Lowers the meter by `damage` and reports whether this call caused death.
    ///
    /// Damage against an already depleted meter keeps lowering it but never
    /// reports a second death.
    pub fn inflict(&mut self, damage: u32) -> bool {
        let was_alive = !self.is_depleted();
        self.current = self.current.saturating_sub_unsigned(damage);
        was_alive && self.is_depleted()
    }
}

// ============================================================================
// Combat Stats
// ============================================================================

/// Offensive and defensive numbers of a combatant.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "CombatStatsRepr")
)]
pub struct CombatStats {
    /// Offensive power fed to the damage formula.
    pub attack: u32,
    /// Mitigation; each point shrinks incoming damage with diminishing returns.
    pub defense: u32,
    /// Maximum center taxicab distance at which a non-touching target is reachable.
    range: f64,
    /// Money granted to the killer's team on death.
    pub bounty: u32,
}

impl CombatStats {
    pub fn new(attack: u32, defense: u32, range: f64, bounty: u32) -> Result<Self, StatsError> {
        if !range.is_finite() || range < 0.0 {
            return Err(StatsError::InvalidRange { range });
        }
        Ok(Self {
            attack,
            defense,
            range,
            bounty,
        })
    }

    /// Zero on every axis: a touch-only attacker that deals no damage.
    pub fn inert() -> Self {
        Self {
            attack: 0,
            defense: 0,
            range: 0.0,
            bounty: 0,
        }
    }

    pub fn range(&self) -> f64 {
        self.range
    }
}

impl Default for CombatStats {
    fn default() -> Self {
        Self::inert()
    }
}

// ============================================================================
// Wire Forms
// ============================================================================

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct HealthRepr {
    current: i32,
    maximum: i32,
}

#[cfg(feature = "serde")]
impl TryFrom<HealthRepr> for Health {
    type Error = StatsError;

    fn try_from(repr: HealthRepr) -> Result<Self, Self::Error> {
        Health::restore(repr.current, repr.maximum)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct CombatStatsRepr {
    attack: u32,
    defense: u32,
    range: f64,
    bounty: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<CombatStatsRepr> for CombatStats {
    type Error = StatsError;

    fn try_from(repr: CombatStatsRepr) -> Result<Self, Self::Error> {
        CombatStats::new(repr.attack, repr.defense, repr.range, repr.bounty)
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Degenerate stat values rejected at construction.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum StatsError {
    #[error("range {range} must be finite and non-negative")]
    InvalidRange { range: f64 },

    #[error("maximum hp {maximum} must be positive")]
    InvalidMaxHp { maximum: i32 },

    #[error("initial hp {current} must lie within 0..={maximum}")]
    InitialHpOutOfBounds { current: i32, maximum: i32 },

    #[error("hp {current} exceeds maximum {maximum}")]
    HpAboveMaximum { current: i32, maximum: i32 },
}

impl GameError for StatsError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidRange { .. } => "STATS_INVALID_RANGE",
            Self::InvalidMaxHp { .. } => "STATS_INVALID_MAX_HP",
            Self::InitialHpOutOfBounds { .. } => "STATS_INITIAL_HP_OUT_OF_BOUNDS",
            Self::HpAboveMaximum { .. } => "STATS_HP_ABOVE_MAXIMUM",
        }
    }
}

/// Contract violations on a live hit-point meter.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HealthError {
    #[error("cannot set hp to {requested}: maximum is {maximum}")]
    AboveMaximum { requested: i32, maximum: i32 },
}

impl GameError for HealthError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::AboveMaximum { .. } => "HEALTH_ABOVE_MAXIMUM",
        }
    }
}
