//! Contact detection and classification
//!
//! Shape overlap tests plus the routing of player contacts into blocking
//! (run-ending) and informational (scoring) categories.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityKind, Shape};

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockingCause {
    Ground,
    /// Player left the vertical extent of the play field
    OutOfBounds,
    Pipe { id: u32 },
}

/// Contacts found for the player in one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contacts {
    /// First blocking contact (ground, then field bounds, then pipes)
    pub blocking: Option<BlockingCause>,
    /// Gates the player currently overlaps
    pub gates: Vec<u32>,
}

impl Contacts {
    pub fn is_empty(&self) -> bool {
        self.blocking.is_none() && self.gates.is_empty()
    }
}

/// Circle vs axis-aligned box, via the closest point on the box
#[inline]
pub fn circle_rect_overlap(center: Vec2, radius: f32, box_center: Vec2, half_extents: Vec2) -> bool {
    let closest = center.clamp(box_center - half_extents, box_center + half_extents);
    center.distance_squared(closest) < radius * radius
}

#[inline]
pub fn circle_circle_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let r = ra + rb;
    a.distance_squared(b) < r * r
}

#[inline]
pub fn rect_rect_overlap(a: Vec2, ha: Vec2, b: Vec2, hb: Vec2) -> bool {
    let d = (a - b).abs();
    let h = ha + hb;
    d.x < h.x && d.y < h.y
}

/// Whether two shapes overlap (touching edges do not count)
pub fn shapes_overlap(a_pos: Vec2, a: &Shape, b_pos: Vec2, b: &Shape) -> bool {
    match (*a, *b) {
        (Shape::Circle { radius: ra }, Shape::Circle { radius: rb }) => {
            circle_circle_overlap(a_pos, ra, b_pos, rb)
        }
        (Shape::Circle { radius }, Shape::Rect { half_extents }) => {
            circle_rect_overlap(a_pos, radius, b_pos, half_extents)
        }
        (Shape::Rect { half_extents }, Shape::Circle { radius }) => {
            circle_rect_overlap(b_pos, radius, a_pos, half_extents)
        }
        (Shape::Rect { half_extents: ha }, Shape::Rect { half_extents: hb }) => {
            rect_rect_overlap(a_pos, ha, b_pos, hb)
        }
    }
}

#[inline]
pub fn entities_overlap(a: &Entity, b: &Entity) -> bool {
    shapes_overlap(a.pos, &a.shape, b.pos, &b.shape)
}

/// Classify every contact of the player against the ground, the vertical
/// field bounds and the active obstacles.
///
/// A dead player has no contacts, which makes death idempotent.
pub fn classify(player: &Entity, obstacles: &[Entity], ground_y: f32, field_height: f32) -> Contacts {
    let mut contacts = Contacts::default();
    if !player.alive {
        return contacts;
    }

    if player.bottom() >= ground_y {
        contacts.blocking = Some(BlockingCause::Ground);
    } else if player.pos.y < 0.0 || player.pos.y > field_height {
        contacts.blocking = Some(BlockingCause::OutOfBounds);
    }

    for obstacle in obstacles.iter().filter(|o| o.alive) {
        if !entities_overlap(player, obstacle) {
            continue;
        }
        match obstacle.kind {
            EntityKind::Pipe { .. } => {
                if contacts.blocking.is_none() {
                    contacts.blocking = Some(BlockingCause::Pipe { id: obstacle.id });
                }
            }
            EntityKind::Gate { .. } => contacts.gates.push(obstacle.id),
            EntityKind::Player => {}
        }
    }

    contacts
}

#[cfg(test)]
mod tests {
    use super::*;

    const HALF: Vec2 = Vec2::new(26.0, 30.0);

    fn player_at(x: f32, y: f32) -> Entity {
        Entity::new(0, EntityKind::Player, Vec2::new(x, y), Shape::Circle { radius: 28.0 })
    }

    fn obstacle(id: u32, kind: EntityKind, x: f32, y: f32) -> Entity {
        Entity::new(id, kind, Vec2::new(x, y), Shape::Rect { half_extents: HALF })
    }

    #[test]
    fn test_circle_rect_overlap() {
        // Circle left of the box, just touching vs overlapping
        assert!(!circle_rect_overlap(Vec2::new(0.0, 0.0), 10.0, Vec2::new(36.0, 0.0), HALF));
        assert!(circle_rect_overlap(Vec2::new(0.0, 0.0), 10.0, Vec2::new(35.0, 0.0), HALF));
        // Near a corner: inside the bounding box but outside the radius
        assert!(!circle_rect_overlap(Vec2::new(0.0, 0.0), 10.0, Vec2::new(34.0, 38.0), HALF));
        // Centre inside the box
        assert!(circle_rect_overlap(Vec2::new(5.0, 5.0), 1.0, Vec2::ZERO, HALF));
    }

    #[test]
    fn test_circle_circle_and_rect_rect() {
        assert!(circle_circle_overlap(Vec2::ZERO, 5.0, Vec2::new(9.0, 0.0), 5.0));
        assert!(!circle_circle_overlap(Vec2::ZERO, 5.0, Vec2::new(10.0, 0.0), 5.0));
        assert!(rect_rect_overlap(Vec2::ZERO, HALF, Vec2::new(51.0, 0.0), HALF));
        assert!(!rect_rect_overlap(Vec2::ZERO, HALF, Vec2::new(52.0, 0.0), HALF));
    }

    #[test]
    fn test_shape_overlap_is_symmetric() {
        let circle = Shape::Circle { radius: 10.0 };
        let rect = Shape::Rect { half_extents: HALF };
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(30.0, 5.0);
        assert_eq!(
            shapes_overlap(a, &circle, b, &rect),
            shapes_overlap(b, &rect, a, &circle)
        );
    }

    #[test]
    fn test_ground_is_blocking() {
        let player = player_at(100.0, 440.0);
        let contacts = classify(&player, &[], 460.0, 490.0);
        assert_eq!(contacts.blocking, Some(BlockingCause::Ground));
    }

    #[test]
    fn test_leaving_field_is_blocking() {
        let player = player_at(100.0, -1.0);
        let contacts = classify(&player, &[], 460.0, 490.0);
        assert_eq!(contacts.blocking, Some(BlockingCause::OutOfBounds));

        // Ground below the field bottom: the bound is hit first
        let player = player_at(100.0, 495.0);
        let contacts = classify(&player, &[], 600.0, 490.0);
        assert_eq!(contacts.blocking, Some(BlockingCause::OutOfBounds));
    }

    #[test]
    fn test_pipe_blocks_and_gate_informs() {
        let player = player_at(100.0, 245.0);
        let obstacles = [
            obstacle(5, EntityKind::Gate { slot: 3 }, 110.0, 215.0),
            obstacle(6, EntityKind::Gate { slot: 4 }, 110.0, 275.0),
        ];
        let contacts = classify(&player, &obstacles, 460.0, 490.0);
        assert_eq!(contacts.blocking, None);
        assert_eq!(contacts.gates, vec![5, 6]);

        let obstacles = [obstacle(7, EntityKind::Pipe { slot: 4 }, 110.0, 275.0)];
        let contacts = classify(&player, &obstacles, 460.0, 490.0);
        assert_eq!(contacts.blocking, Some(BlockingCause::Pipe { id: 7 }));
    }

    #[test]
    fn test_far_obstacles_ignored() {
        let player = player_at(100.0, 245.0);
        let obstacles = [obstacle(1, EntityKind::Pipe { slot: 0 }, 400.0, 35.0)];
        assert!(classify(&player, &obstacles, 460.0, 490.0).is_empty());
    }

    #[test]
    fn test_dead_player_has_no_contacts() {
        let mut player = player_at(100.0, 450.0);
        player.alive = false;
        let obstacles = [obstacle(1, EntityKind::Pipe { slot: 7 }, 100.0, 455.0)];
        assert!(classify(&player, &obstacles, 460.0, 490.0).is_empty());
    }
}
