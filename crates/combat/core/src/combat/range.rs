//! Reach test between an attacker and a candidate target.

use crate::entity::{Entity, Ranged};
use crate::geometry::Bounds;

/// Decide whether `target` is within reach of an attacker.
///
/// # Rule
///
/// ```text
/// in_range = intersects(attacker, target)
///         || |Δx| + |Δy| <= range      (Δ between box centers)
/// ```
///
/// Touching footprints always count, so a zero-range attacker still hits
/// what it collides with. Beyond contact the reach is a diamond (taxicab
/// metric), not a circle.
pub fn is_in_range(attacker: &Bounds, range: f64, target: &Bounds) -> bool {
    if attacker.intersects(target) {
        return true;
    }
    attacker.center_taxicab_distance(target) <= range
}

/// [`is_in_range`] applied to a searcher's own footprint and range.
pub fn reaches(searcher: &(impl Ranged + ?Sized), target: &(impl Entity + ?Sized)) -> bool {
    is_in_range(&searcher.bounds(), searcher.range(), &target.bounds())
}
