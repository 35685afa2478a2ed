//! Target search over a world population.

use tracing::trace;

use super::range::reaches;
use crate::entity::{Damageable, Entity, Ranged};
use crate::team::SearchMode;
use crate::world::World;

/// Collect every damageable entity `searcher` can reach under `mode`.
///
/// The world is traversed once and matches keep the world's traversal order;
/// callers must not read spatial or priority ordering into it. Entities
/// without the damageable capability are never returned. The searcher itself
/// is a candidate like any other entity (it always collides with itself).
pub fn find_targets<'w, W>(
    searcher: &(impl Ranged + ?Sized),
    world: &'w W,
    mode: SearchMode,
) -> Vec<&'w dyn Damageable>
where
    W: World + ?Sized,
{
    let team = searcher.team();
    let targets: Vec<&'w dyn Damageable> = world
        .entities()
        .filter_map(|entity| entity.as_damageable())
        .filter(|candidate| mode.admits(team, candidate.team()) && reaches(searcher, *candidate))
        .collect();

    trace!(
        target: "combat::search",
        searcher = %searcher.id(),
        %mode,
        found = targets.len(),
        "target search"
    );
    targets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityId;
    use crate::geometry::Bounds;
    use crate::team::Team;
    use crate::units::{Prop, Unit, UnitBuilder};
    use crate::world::EntityArena;

    fn unit_at(id: u32, team: Team, x: f64) -> Unit {
        UnitBuilder::new(EntityId(id), team, Bounds::new(x, 0.0, 2.0, 2.0).unwrap())
            .hp(10)
            .range(5.0)
            .build()
            .unwrap()
    }

    fn target_ids(targets: &[&dyn Damageable]) -> Vec<u32> {
        targets.iter().map(|target| target.id().0).collect()
    }

    /// Searcher #0 (Left) at x=0 with range 5, surrounded by friends, enemies,
    /// a prop, and one enemy out of reach.
    fn battlefield() -> EntityArena {
        let mut arena = EntityArena::new();
        arena.spawn(Box::new(unit_at(0, Team::Left, 0.0))).unwrap();
        arena.spawn(Box::new(unit_at(1, Team::Right, 4.0))).unwrap();
        arena.spawn(Box::new(unit_at(2, Team::Left, 3.0))).unwrap();
        arena
            .spawn(Box::new(Prop::new(
                EntityId(3),
                Team::Right,
                Bounds::new(1.0, 0.0, 2.0, 2.0).unwrap(),
            )))
            .unwrap();
        arena.spawn(Box::new(unit_at(4, Team::Right, 30.0))).unwrap();
        arena.spawn(Box::new(unit_at(5, Team::Right, -5.0))).unwrap();
        arena
    }

    fn searcher(arena: &EntityArena) -> &dyn Ranged {
        arena.entity(EntityId(0)).unwrap().as_ranged().unwrap()
    }

    #[test]
    fn any_returns_all_reachable_damageables_in_traversal_order() {
        let arena = battlefield();
        let targets = find_targets(searcher(&arena), &arena, SearchMode::Any);

        assert_eq!(target_ids(&targets), vec![0, 1, 2, 5]);
    }

    #[test]
    fn friend_keeps_only_own_team() {
        let arena = battlefield();
        let targets = find_targets(searcher(&arena), &arena, SearchMode::Friend);

        assert_eq!(target_ids(&targets), vec![0, 2]);
    }

    #[test]
    fn enemy_keeps_only_other_teams() {
        let arena = battlefield();
        let targets = find_targets(searcher(&arena), &arena, SearchMode::Enemy);

        assert_eq!(target_ids(&targets), vec![1, 5]);
        assert!(targets.iter().all(|target| target.team() == Team::Right));
    }

    #[test]
    fn non_damageable_entities_are_never_targets() {
        let arena = battlefield();
        let prop = arena.entity(EntityId(3)).unwrap();
        assert!(prop.as_damageable().is_none());

        for mode in [SearchMode::Any, SearchMode::Friend, SearchMode::Enemy] {
            let targets = find_targets(searcher(&arena), &arena, mode);
            assert!(!target_ids(&targets).contains(&3));
        }
    }

    #[test]
    fn entities_pending_removal_are_skipped() {
        let mut arena = battlefield();
        arena.request_removal(EntityId(1));

        let targets = find_targets(searcher(&arena), &arena, SearchMode::Enemy);
        assert_eq!(target_ids(&targets), vec![5]);
    }

    #[test]
    fn empty_world_yields_nothing() {
        let arena = EntityArena::new();
        let lone = unit_at(0, Team::Left, 0.0);

        assert!(find_targets(&lone, &arena, SearchMode::Any).is_empty());
    }
}
