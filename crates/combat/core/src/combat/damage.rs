//! Damage calculation.

/// Calculate the damage an attack deals against a defender.
///
/// # Formula
///
/// ```text
/// damage = floor(attack / (defense + 1))
/// ```
///
/// The `+ 1` keeps zero-defense targets from dividing by zero; in exchange
/// every defense point is worth less than the previous one. Evasion and
/// critical hits are not part of this base formula.
///
/// The division runs in 64 bits so `defense == u32::MAX` stays exact.
pub fn compute_damage(attack: u32, defense: u32) -> u32 {
    let damage = u64::from(attack) / (u64::from(defense) + 1);
    // damage <= attack, so it always fits.
    damage as u32
}
