//! Faction identity and the team-relative search filter.

/// Faction an entity fights for.
///
/// Two entities are friends when their teams are equal and enemies otherwise;
/// there is no neutrality or alliance table.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Team {
    /// Army advancing from the left edge of the field.
    Left,
    /// Army advancing from the right edge of the field.
    Right,
}

impl Team {
    pub const ALL: [Team; 2] = [Team::Left, Team::Right];

    /// Returns true if the two teams are on opposite sides.
    pub fn is_enemy_of(self, other: Team) -> bool {
        self != other
    }
}

/// Which teams are eligible targets, relative to the searcher's own team.
///
/// Parsing from text is the only way to produce an unknown mode; it fails
/// with [`strum::ParseError`] instead of falling back to a default.
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
pub enum SearchMode {
    /// Every team.
    Any,
    /// Only the searcher's own team.
    Friend,
    /// Every team except the searcher's.
    #[default]
    Enemy,
}

impl SearchMode {
    /// Team predicate applied to a candidate target.
    pub fn admits(self, searcher: Team, candidate: Team) -> bool {
        match self {
            SearchMode::Any => true,
            SearchMode::Friend => searcher == candidate,
            SearchMode::Enemy => searcher.is_enemy_of(candidate),
        }
    }
}
