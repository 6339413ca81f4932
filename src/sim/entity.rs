//! Entities and kinematics
//!
//! The player, pipe segments and gap gates share one representation; the
//! `kind` tag decides how contacts with them are classified.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// What an entity is, for collision routing and rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    /// Solid obstacle slot (contact ends the run)
    Pipe { slot: u32 },
    /// Passable gap slot (contact scores)
    Gate { slot: u32 },
}

impl EntityKind {
    /// Row slot index for obstacles
    pub fn slot(&self) -> Option<u32> {
        match *self {
            EntityKind::Pipe { slot } | EntityKind::Gate { slot } => Some(slot),
            EntityKind::Player => None,
        }
    }

    pub fn is_blocking(&self) -> bool {
        matches!(self, EntityKind::Pipe { .. })
    }
}

/// Collision shape, centred on the entity position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Circle { radius: f32 },
    /// Axis-aligned box
    Rect { half_extents: Vec2 },
}

impl Shape {
    /// Half size along each axis (bounding box)
    pub fn half_extents(&self) -> Vec2 {
        match *self {
            Shape::Circle { radius } => Vec2::splat(radius),
            Shape::Rect { half_extents } => half_extents,
        }
    }
}

/// A simulated body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub shape: Shape,
    pub alive: bool,
}

impl Entity {
    pub fn new(id: u32, kind: EntityKind, pos: Vec2, shape: Shape) -> Self {
        Self {
            id,
            kind,
            pos,
            vel: Vec2::ZERO,
            shape,
            alive: true,
        }
    }

    /// Semi-implicit Euler step: velocity first, then position
    #[inline]
    pub fn integrate(&mut self, dt: f32, gravity: f32) {
        self.vel.y += gravity * dt;
        self.pos += self.vel * dt;
    }

    /// Lowest point of the shape (screen y grows downward)
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.shape.half_extents().y
    }

    /// True once the whole shape is left of x = 0
    #[inline]
    pub fn is_past_left_edge(&self) -> bool {
        self.pos.x + self.shape.half_extents().x < 0.0
    }
}
