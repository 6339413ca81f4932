//! Player controller
//!
//! Wraps the player entity with jump impulses, liveness and a cosmetic tilt.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityKind, Shape};
use crate::config::SessionConfig;

/// Entity id reserved for the player
pub const PLAYER_ID: u32 = 0;

/// The gravity-driven player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Entity,
    /// Cosmetic rotation in degrees (positive noses down)
    pub tilt: f32,
}

impl Player {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            body: Entity::new(
                PLAYER_ID,
                EntityKind::Player,
                config.player_start,
                Shape::Circle {
                    radius: config.player_radius,
                },
            ),
            tilt: 0.0,
        }
    }

    #[inline]
    pub fn alive(&self) -> bool {
        self.body.alive
    }

    /// Set the vertical velocity to the impulse (absolute, never additive).
    ///
    /// Returns false and leaves the body untouched once the player is dead.
    pub fn jump(&mut self, impulse: f32, jump_tilt: f32) -> bool {
        if !self.body.alive {
            return false;
        }
        self.body.vel.y = impulse;
        self.tilt = jump_tilt;
        true
    }

    /// Integrate one tick; the tilt only recovers while alive
    pub fn update(&mut self, dt: f32, gravity: f32, tilt_rate: f32, max_tilt: f32) {
        self.body.integrate(dt, gravity);
        if self.body.alive && self.tilt < max_tilt {
            self.tilt = (self.tilt + tilt_rate * dt).min(max_tilt);
        }
    }

    /// Mark the player dead. Returns whether this call did the killing.
    pub fn kill(&mut self) -> bool {
        std::mem::replace(&mut self.body.alive, false)
    }

    /// Hold the body on top of the ground (solid collider)
    pub fn rest_on(&mut self, ground_y: f32) {
        let half = self.body.shape.half_extents().y;
        if self.body.pos.y + half > ground_y {
            self.body.pos.y = ground_y - half;
            self.body.vel = Vec2::ZERO;
        }
    }

    /// Back to the start position, alive and at rest
    pub fn reset(&mut self, start: Vec2) {
        self.body.pos = start;
        self.body.vel = Vec2::ZERO;
        self.body.alive = true;
        self.tilt = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player::new(&SessionConfig::default())
    }

    #[test]
    fn test_jump_sets_absolute_velocity() {
        for prior in [-900.0, -350.0, 0.0, 42.0, 1200.0] {
            let mut p = player();
            p.body.vel.y = prior;
            assert!(p.jump(-350.0, -20.0));
            assert_eq!(p.body.vel.y, -350.0);
        }
    }

    #[test]
    fn test_repeated_jumps_do_not_compound() {
        let mut p = player();
        p.jump(-350.0, -20.0);
        p.jump(-350.0, -20.0);
        p.jump(-350.0, -20.0);
        assert_eq!(p.body.vel.y, -350.0);
    }

    #[test]
    fn test_dead_player_ignores_jump() {
        let mut p = player();
        p.body.vel.y = 123.0;
        p.kill();
        assert!(!p.jump(-350.0, -20.0));
        assert_eq!(p.body.vel.y, 123.0);
    }

    #[test]
    fn test_kill_is_idempotent() {
        let mut p = player();
        assert!(p.kill());
        assert!(!p.kill());
        assert!(!p.alive());
    }

    #[test]
    fn test_dead_player_keeps_falling() {
        let mut p = player();
        p.kill();
        let y = p.body.pos.y;
        p.update(0.1, 1000.0, 60.0, 20.0);
        assert!(p.body.pos.y > y);
    }

    #[test]
    fn test_tilt_recovers_and_caps() {
        let mut p = player();
        p.jump(-350.0, -20.0);
        assert_eq!(p.tilt, -20.0);
        p.update(0.5, 0.0, 60.0, 20.0);
        assert_eq!(p.tilt, 10.0);
        p.update(1.0, 0.0, 60.0, 20.0);
        assert_eq!(p.tilt, 20.0);
    }

    #[test]
    fn test_rest_on_ground() {
        let mut p = player();
        p.body.pos.y = 470.0;
        p.body.vel.y = 300.0;
        p.rest_on(460.0);
        assert_eq!(p.body.pos.y, 432.0);
        assert_eq!(p.body.vel, Vec2::ZERO);
    }
}
