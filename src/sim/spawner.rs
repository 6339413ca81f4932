//! Obstacle row generation
//!
//! A row is a vertical stack of slots at the right edge of the field. One
//! contiguous run of slots is left passable (gates); every other slot is a
//! solid pipe segment.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityKind, Shape};
use crate::config::SessionConfig;

/// One generated row
#[derive(Debug, Clone)]
pub struct Row {
    /// Index of the topmost gate slot
    pub gap_top: u32,
    /// Slots in index order (top to bottom)
    pub entities: Vec<Entity>,
}

/// Spawns rows while active; `stop` is one-way until `reset`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    active: bool,
}

impl Default for Spawner {
    fn default() -> Self {
        Self { active: true }
    }
}

impl Spawner {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Draw the gap's top slot uniformly from the configured inclusive range
    pub fn draw_gap<R: Rng>(config: &SessionConfig, rng: &mut R) -> u32 {
        let [min, max] = config.gap_range;
        rng.random_range(min..=max)
    }

    /// Build the entities of a row whose gap starts at `gap_top`
    pub fn build_row(config: &SessionConfig, gap_top: u32, first_id: u32) -> Vec<Entity> {
        let gap = gap_top..gap_top + config.gap_slots;
        let shape = Shape::Rect {
            half_extents: config.obstacle_half_extents,
        };
        let vel = Vec2::new(-config.obstacle_speed, 0.0);

        (0..config.row_slot_count)
            .map(|slot| {
                let kind = if gap.contains(&slot) {
                    EntityKind::Gate { slot }
                } else {
                    EntityKind::Pipe { slot }
                };
                let pos = Vec2::new(config.spawn_x, config.slot_y(slot));
                let mut entity = Entity::new(first_id + slot, kind, pos, shape);
                entity.vel = vel;
                entity
            })
            .collect()
    }

    /// Generate a row, or nothing once stopped
    pub fn spawn_row<R: Rng>(&self, config: &SessionConfig, rng: &mut R, first_id: u32) -> Option<Row> {
        if !self.active {
            return None;
        }
        let gap_top = Self::draw_gap(config, rng);
        Some(Row {
            gap_top,
            entities: Self::build_row(config, gap_top, first_id),
        })
    }

    /// Freeze every obstacle in place and stop spawning
    pub fn stop(&mut self, obstacles: &mut [Entity]) {
        for obstacle in obstacles.iter_mut() {
            obstacle.vel = Vec2::ZERO;
        }
        self.active = false;
    }

    pub fn reset(&mut self) {
        self.active = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn gate_slots(entities: &[Entity]) -> Vec<u32> {
        entities
            .iter()
            .filter_map(|e| match e.kind {
                EntityKind::Gate { slot } => Some(slot),
                _ => None,
            })
            .collect()
    }

    fn pipe_slots(entities: &[Entity]) -> Vec<u32> {
        entities
            .iter()
            .filter_map(|e| match e.kind {
                EntityKind::Pipe { slot } => Some(slot),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_row_with_gap_at_three() {
        let config = SessionConfig::default();
        let row = Spawner::build_row(&config, 3, 10);

        assert_eq!(row.len(), 8);
        assert_eq!(pipe_slots(&row), vec![0, 1, 2, 5, 6, 7]);
        assert_eq!(gate_slots(&row), vec![3, 4]);
    }

    #[test]
    fn test_row_layout() {
        let config = SessionConfig::default();
        let row = Spawner::build_row(&config, 1, 10);

        for (i, e) in row.iter().enumerate() {
            let i = i as u32;
            assert_eq!(e.id, 10 + i);
            assert_eq!(e.pos, Vec2::new(400.0, i as f32 * 60.0 + 35.0));
            assert_eq!(e.vel, Vec2::new(-200.0, 0.0));
            assert!(e.alive);
        }
    }

    #[test]
    fn test_stopped_spawner_yields_nothing() {
        let config = SessionConfig::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut spawner = Spawner::default();
        assert!(spawner.spawn_row(&config, &mut rng, 1).is_some());

        spawner.stop(&mut []);
        assert!(!spawner.is_active());
        assert!(spawner.spawn_row(&config, &mut rng, 1).is_none());

        spawner.reset();
        assert!(spawner.spawn_row(&config, &mut rng, 1).is_some());
    }

    #[test]
    fn test_stop_freezes_obstacles() {
        let config = SessionConfig::default();
        let mut obstacles = Spawner::build_row(&config, 2, 1);
        let mut spawner = Spawner::default();
        spawner.stop(&mut obstacles);
        assert!(obstacles.iter().all(|e| e.vel == Vec2::ZERO));
    }

    #[test]
    fn test_every_gap_position_is_drawn() {
        let config = SessionConfig::default();
        let mut rng = Pcg32::seed_from_u64(1234);
        let mut seen = [false; 8];
        for _ in 0..500 {
            seen[Spawner::draw_gap(&config, &mut rng) as usize] = true;
        }
        assert_eq!(seen, [false, true, true, true, true, true, false, false]);
    }

    proptest! {
        #[test]
        fn prop_row_invariant(seed in any::<u64>()) {
            let config = SessionConfig::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            let row = Spawner::default()
                .spawn_row(&config, &mut rng, 1)
                .expect("active spawner");

            let gates = gate_slots(&row.entities);
            prop_assert_eq!(row.entities.len(), 8);
            prop_assert_eq!(gates.len(), 2);
            prop_assert_eq!(gates[1], gates[0] + 1);
            prop_assert_eq!(gates[0], row.gap_top);
            prop_assert!((1..=5).contains(&row.gap_top));
        }

        #[test]
        fn prop_custom_layout_keeps_gap_off_edges(
            seed in any::<u64>(),
            row_slot_count in 4u32..16,
            gap_slots in 1u32..3,
        ) {
            prop_assume!(gap_slots + 2 <= row_slot_count);
            let config = SessionConfig {
                row_slot_count,
                gap_slots,
                gap_range: [1, row_slot_count - 1 - gap_slots],
                ..Default::default()
            };
            prop_assert!(config.validate().is_ok());

            let mut rng = Pcg32::seed_from_u64(seed);
            let row = Spawner::default()
                .spawn_row(&config, &mut rng, 1)
                .expect("active spawner");
            let gates = gate_slots(&row.entities);

            prop_assert_eq!(gates.len() as u32, gap_slots);
            prop_assert!(!gates.contains(&0));
            prop_assert!(!gates.contains(&(row_slot_count - 1)));
            prop_assert!(gates.windows(2).all(|w| w[1] == w[0] + 1));
        }
    }
}
