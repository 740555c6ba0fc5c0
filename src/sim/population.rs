//! Population manager
//!
//! Keeps a fixed number of live entities per kind: entities that fall off
//! the bottom are pruned, then fresh ones are allocated into free lanes.

use rand::Rng;

use super::entity::EntityKind;
use super::lanes::{LaneError, Lanes};
use crate::tuning::Tuning;

#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    pub lanes: Lanes,
    target: usize,
}

impl Population {
    pub fn new(kind: EntityKind, target: usize, tuning: &Tuning) -> Self {
        Self {
            lanes: Lanes::new(kind, tuning),
            target,
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.lanes.kind()
    }

    pub fn target(&self) -> usize {
        self.target
    }

    /// Grow the target by one (difficulty escalation)
    pub fn raise_target(&mut self) {
        self.target += 1;
    }

    pub fn live(&self) -> usize {
        self.lanes.live()
    }

    /// Free the lanes of every entity that has left the playfield
    pub fn prune(&mut self, tuning: &Tuning) -> usize {
        self.lanes.clear_where(|e| e.is_gone(tuning))
    }

    /// Allocate until the live count reaches the target; returns the number spawned
    pub fn replenish(&mut self, tuning: &Tuning, rng: &mut impl Rng) -> Result<usize, LaneError> {
        let mut spawned = 0;
        while self.lanes.live() < self.target {
            self.lanes.allocate(tuning, rng)?;
            spawned += 1;
        }
        Ok(spawned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::FallingEntity;
    use glam::Vec2;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_replenish_reaches_target() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut pop = Population::new(EntityKind::Obstacle, 3, &tuning);
        assert_eq!(pop.replenish(&tuning, &mut rng), Ok(3));
        assert_eq!(pop.live(), 3);
        assert_eq!(pop.replenish(&tuning, &mut rng), Ok(0));
    }

    #[test]
    fn test_prune_then_replenish_replaces_fallen() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(4);
        let mut pop = Population::new(EntityKind::Coin, 1, &tuning);
        pop.replenish(&tuning, &mut rng).unwrap();

        for e in pop.lanes.iter_mut() {
            e.pos.y = tuning.height + 1.0;
        }
        assert_eq!(pop.prune(&tuning), 1);
        assert_eq!(pop.live(), 0);

        assert_eq!(pop.replenish(&tuning, &mut rng), Ok(1));
        assert!(pop.lanes.iter().all(|e| e.pos.y == tuning.spawn_y()));
    }

    #[test]
    fn test_entity_exactly_at_bottom_survives() {
        let tuning = Tuning::default();
        let mut pop = Population::new(EntityKind::Obstacle, 1, &tuning);
        pop.lanes
            .place(0, FallingEntity::new(EntityKind::Obstacle, Vec2::new(0.0, tuning.height), 0.3));
        assert_eq!(pop.prune(&tuning), 0);
    }

    #[test]
    fn test_raised_target_over_capacity_errors() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut pop = Population::new(EntityKind::Obstacle, 6, &tuning);
        pop.replenish(&tuning, &mut rng).unwrap();
        pop.raise_target();
        assert!(pop.replenish(&tuning, &mut rng).is_err());
        assert_eq!(pop.live(), 6);
    }

    proptest! {
        #[test]
        fn prop_prune_replenish_restores_target(
            seed in any::<u64>(),
            target in 0usize..=6,
            ys in proptest::collection::vec(-200f32..800.0, 6),
        ) {
            let tuning = Tuning::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut pop = Population::new(EntityKind::Obstacle, target, &tuning);
            pop.replenish(&tuning, &mut rng).unwrap();

            // Scatter the survivors anywhere, some past the bottom
            for (e, y) in pop.lanes.iter_mut().zip(ys) {
                e.pos.y = y;
            }
            pop.prune(&tuning);
            pop.replenish(&tuning, &mut rng).unwrap();

            prop_assert_eq!(pop.live(), target);
            prop_assert!(pop.lanes.iter().all(|e| !e.is_gone(&tuning)));
        }
    }
}
