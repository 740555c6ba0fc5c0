//! Lane slot map and allocator
//!
//! Each transient kind owns one `Lanes`: a fixed array of optional entities,
//! one slot per lane. A lane holds at most one live entity of that kind.

use rand::Rng;
use thiserror::Error;

use super::entity::{EntityKind, FallingEntity};
use crate::tuning::Tuning;

/// Allocation failure; unreachable with validated tuning
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LaneError {
    #[error("no free lane for {} (all {lanes} lanes occupied)", .kind.label())]
    NoFreeLane { kind: EntityKind, lanes: usize },
}

/// Fixed set of lanes for one entity kind
#[derive(Debug, Clone, PartialEq)]
pub struct Lanes {
    kind: EntityKind,
    lane_width: f32,
    slots: Vec<Option<FallingEntity>>,
}

impl Lanes {
    pub fn new(kind: EntityKind, tuning: &Tuning) -> Self {
        Self {
            kind,
            lane_width: tuning.lane_width,
            slots: vec![None; tuning.lane_count()],
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn lane_count(&self) -> usize {
        self.slots.len()
    }

    /// x-coordinate of a lane's left edge
    pub fn lane_x(&self, lane: usize) -> f32 {
        lane as f32 * self.lane_width
    }

    /// Number of occupied lanes
    pub fn live(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Indices of every unoccupied lane, ascending
    pub fn free_lanes(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.is_none().then_some(i))
            .collect()
    }

    pub fn get(&self, lane: usize) -> Option<&FallingEntity> {
        self.slots.get(lane).and_then(Option::as_ref)
    }

    /// Live entities in lane order
    pub fn iter(&self) -> impl Iterator<Item = &FallingEntity> {
        self.slots.iter().flatten()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut FallingEntity> {
        self.slots.iter_mut().flatten()
    }

    /// Place `entity` in `lane`. Returns false (and drops nothing) when the
    /// lane is out of range or already taken.
    pub fn place(&mut self, lane: usize, entity: FallingEntity) -> bool {
        match self.slots.get_mut(lane) {
            Some(slot) if slot.is_none() => {
                *slot = Some(entity);
                true
            }
            _ => false,
        }
    }

    /// Empty every lane whose entity matches `pred`; returns how many were freed
    pub fn clear_where(&mut self, mut pred: impl FnMut(&FallingEntity) -> bool) -> usize {
        let mut freed = 0;
        for slot in &mut self.slots {
            if slot.as_ref().is_some_and(&mut pred) {
                *slot = None;
                freed += 1;
            }
        }
        freed
    }

    /// Spawn a new entity in a lane chosen uniformly among the free ones
    pub fn allocate(&mut self, tuning: &Tuning, rng: &mut impl Rng) -> Result<usize, LaneError> {
        let free = self.free_lanes();
        if free.is_empty() {
            return Err(LaneError::NoFreeLane {
                kind: self.kind,
                lanes: self.slots.len(),
            });
        }

        let lane = free[rng.random_range(0..free.len())];
        let entity = FallingEntity::spawn(self.kind, self.lane_x(lane), tuning, rng);
        self.slots[lane] = Some(entity);
        Ok(lane)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use std::collections::HashSet;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn obstacle_at(x: f32) -> FallingEntity {
        FallingEntity::new(EntityKind::Obstacle, Vec2::new(x, 0.0), 0.5)
    }

    #[test]
    fn test_allocate_fills_every_lane_then_fails() {
        let tuning = Tuning::default();
        let mut lanes = Lanes::new(EntityKind::Obstacle, &tuning);
        let mut rng = Pcg32::seed_from_u64(1);

        let mut seen = Vec::new();
        for _ in 0..lanes.lane_count() {
            seen.push(lanes.allocate(&tuning, &mut rng).unwrap());
        }
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2, 3, 4, 5]);
        assert!(lanes.free_lanes().is_empty());

        assert_eq!(
            lanes.allocate(&tuning, &mut rng),
            Err(LaneError::NoFreeLane {
                kind: EntityKind::Obstacle,
                lanes: 6
            })
        );
        assert_eq!(lanes.live(), 6);
    }

    #[test]
    fn test_allocate_uses_only_free_lane() {
        let tuning = Tuning::default();
        let mut lanes = Lanes::new(EntityKind::Coin, &tuning);
        for lane in [0, 1, 2, 4, 5] {
            assert!(lanes.place(lane, obstacle_at(lanes.lane_x(lane))));
        }
        let mut rng = Pcg32::seed_from_u64(99);
        assert_eq!(lanes.allocate(&tuning, &mut rng), Ok(3));
        assert_eq!(lanes.get(3).map(|e| e.pos.x), Some(225.0));
        assert_eq!(lanes.get(3).map(|e| e.kind), Some(EntityKind::Coin));
    }

    #[test]
    fn test_place_ignores_bad_lanes() {
        let tuning = Tuning::default();
        let mut lanes = Lanes::new(EntityKind::Obstacle, &tuning);
        assert!(lanes.place(2, obstacle_at(150.0)));
        assert!(!lanes.place(2, obstacle_at(150.0)));
        assert!(!lanes.place(17, obstacle_at(0.0)));
        assert_eq!(lanes.live(), 1);
        assert_eq!(lanes.free_lanes(), vec![0, 1, 3, 4, 5]);
    }

    #[test]
    fn test_clear_where() {
        let tuning = Tuning::default();
        let mut lanes = Lanes::new(EntityKind::Obstacle, &tuning);
        lanes.place(0, obstacle_at(0.0));
        lanes.place(1, obstacle_at(75.0));
        lanes.place(4, obstacle_at(300.0));
        assert_eq!(lanes.clear_where(|e| e.pos.x > 50.0), 2);
        assert_eq!(lanes.free_lanes(), vec![1, 2, 3, 4, 5]);
    }

    proptest! {
        #[test]
        fn prop_allocated_lanes_are_distinct(seed in any::<u64>(), count in 0usize..=6) {
            let tuning = Tuning::default();
            let mut lanes = Lanes::new(EntityKind::PowerUp, &tuning);
            let mut rng = Pcg32::seed_from_u64(seed);
            for _ in 0..count {
                lanes.allocate(&tuning, &mut rng).unwrap();
            }
            let xs: HashSet<u32> = lanes.iter().map(|e| e.pos.x.to_bits()).collect();
            prop_assert_eq!(xs.len(), count);
            prop_assert_eq!(lanes.live(), count);
        }
    }
}
