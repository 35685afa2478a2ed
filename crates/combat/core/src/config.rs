use crate::team::SearchMode;

/// How an attacker picks one target out of its search results.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TargetPolicy {
    /// First match in world traversal order.
    First,
    /// Smallest center taxicab distance; ties keep traversal order.
    #[default]
    Nearest,
}

/// Tunable parameters of the combat driver.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatConfig {
    /// Team filter every attacker searches with.
    pub search_mode: SearchMode,
    pub target_policy: TargetPolicy,
    /// Ignore targets whose hp is already at or below zero.
    pub skip_dead_targets: bool,
}

impl CombatConfig {
    pub const DEFAULT_SEARCH_MODE: SearchMode = SearchMode::Enemy;
    pub const DEFAULT_TARGET_POLICY: TargetPolicy = TargetPolicy::Nearest;

    pub fn new() -> Self {
        Self {
            search_mode: Self::DEFAULT_SEARCH_MODE,
            target_policy: Self::DEFAULT_TARGET_POLICY,
            skip_dead_targets: true,
        }
    }

    pub fn with_search_mode(mut self, search_mode: SearchMode) -> Self {
        self.search_mode = search_mode;
        self
    }

    pub fn with_target_policy(mut self, target_policy: TargetPolicy) -> Self {
        self.target_policy = target_policy;
        self
    }

    pub fn with_skip_dead_targets(mut self, skip_dead_targets: bool) -> Self {
        self.skip_dead_targets = skip_dead_targets;
        self
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
