//! Session configuration
//!
//! Every gameplay constant a session needs. A full reset rebuilds all state
//! from this struct, so it is the only input besides the RNG seed.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Gameplay tuning for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    // === Kinematics ===
    /// Downward acceleration applied to the player (units/s²)
    pub gravity: f32,
    /// Absolute vertical velocity set by a jump (units/s, negative is up)
    pub jump_impulse: f32,
    /// Leftward obstacle speed (units/s)
    pub obstacle_speed: f32,

    // === Deferred work (milliseconds) ===
    pub spawn_interval_ms: f64,
    /// Minimum spacing between two score increments
    pub score_debounce_ms: f64,
    /// Delay between death and the return to the menu
    pub game_over_delay_ms: f64,

    // === Row layout ===
    pub row_slot_count: u32,
    pub gap_slots: u32,
    /// Inclusive range for the gap's top slot index
    pub gap_range: [u32; 2],
    pub slot_spacing: f32,
    /// Vertical centre of slot 0
    pub slot_offset: f32,
    pub spawn_x: f32,
    pub obstacle_half_extents: Vec2,

    // === Play field ===
    /// The player dies above y = 0 or below this
    pub field_height: f32,
    pub ground_y: f32,
    pub player_start: Vec2,
    pub player_radius: f32,

    // === Cosmetic tilt (degrees) ===
    pub jump_tilt: f32,
    pub tilt_rate: f32,
    pub max_tilt: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            obstacle_speed: OBSTACLE_SPEED,

            spawn_interval_ms: SPAWN_INTERVAL_MS,
            score_debounce_ms: SCORE_DEBOUNCE_MS,
            game_over_delay_ms: GAME_OVER_DELAY_MS,

            row_slot_count: ROW_SLOT_COUNT,
            gap_slots: GAP_SLOTS,
            gap_range: GAP_RANGE,
            slot_spacing: SLOT_SPACING,
            slot_offset: SLOT_OFFSET,
            spawn_x: SPAWN_X,
            obstacle_half_extents: Vec2::new(OBSTACLE_HALF_WIDTH, OBSTACLE_HALF_HEIGHT),

            field_height: FIELD_HEIGHT,
            ground_y: GROUND_Y,
            player_start: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            player_radius: PLAYER_RADIUS,

            jump_tilt: JUMP_TILT,
            tilt_rate: TILT_RATE,
            max_tilt: MAX_TILT,
        }
    }
}

impl SessionConfig {
    /// Parse a (possibly partial) JSON config; missing keys take defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every invariant the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let floats = [
            ("gravity", self.gravity),
            ("jump_impulse", self.jump_impulse),
            ("obstacle_speed", self.obstacle_speed),
            ("slot_spacing", self.slot_spacing),
            ("slot_offset", self.slot_offset),
            ("spawn_x", self.spawn_x),
            ("obstacle_half_extents", self.obstacle_half_extents.x),
            ("obstacle_half_extents", self.obstacle_half_extents.y),
            ("field_height", self.field_height),
            ("ground_y", self.ground_y),
            ("player_start", self.player_start.x),
            ("player_start", self.player_start.y),
            ("player_radius", self.player_radius),
            ("jump_tilt", self.jump_tilt),
            ("tilt_rate", self.tilt_rate),
            ("max_tilt", self.max_tilt),
        ];
        if let Some((name, _)) = floats.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::NonFinite(*name));
        }
        let delays = [
            ("spawn_interval_ms", self.spawn_interval_ms),
            ("score_debounce_ms", self.score_debounce_ms),
            ("game_over_delay_ms", self.game_over_delay_ms),
        ];
        if let Some((name, _)) = delays.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::NonFinite(*name));
        }

        if self.spawn_interval_ms <= 0.0 {
            return Err(ConfigError::NonPositiveSpawnInterval(self.spawn_interval_ms));
        }
        for (name, value) in &delays[1..] {
            if *value < 0.0 {
                return Err(ConfigError::NegativeDelay { name: *name, value: *value });
            }
        }

        let sizes = [
            ("slot_spacing", self.slot_spacing),
            ("obstacle_half_extents", self.obstacle_half_extents.x.min(self.obstacle_half_extents.y)),
            ("field_height", self.field_height),
            ("player_radius", self.player_radius),
            // Obstacles always move leftward
            ("obstacle_speed", self.obstacle_speed),
        ];
        if let Some((name, value)) = sizes.iter().find(|(_, v)| *v <= 0.0) {
            return Err(ConfigError::NonPositiveSize { name: *name, value: *value });
        }

        if self.row_slot_count == 0 {
            return Err(ConfigError::EmptyRow);
        }
        if self.gap_slots == 0 {
            return Err(ConfigError::EmptyGap);
        }
        // At least one solid slot above and below the gap
        if self
            .gap_slots
            .checked_add(2)
            .is_none_or(|needed| needed > self.row_slot_count)
        {
            return Err(ConfigError::GapTooWide {
                gap_slots: self.gap_slots,
                row_slot_count: self.row_slot_count,
            });
        }

        let [min, max] = self.gap_range;
        if min > max {
            return Err(ConfigError::InvertedGapRange { min, max });
        }
        let past_last_solid = max
            .checked_add(self.gap_slots)
            .is_none_or(|end| end > self.row_slot_count - 1);
        if min < 1 || past_last_solid {
            return Err(ConfigError::GapRangeOutOfRow {
                min,
                max,
                row_slot_count: self.row_slot_count,
            });
        }

        Ok(())
    }

    /// Vertical centre of a row slot
    #[inline]
    pub fn slot_y(&self, slot: u32) -> f32 {
        slot as f32 * self.slot_spacing + self.slot_offset
    }
}
