//! Flappy Sim - a side-scrolling gap-flying arcade simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, obstacle rows, contacts, scoring, session)
//! - `config`: Data-driven gameplay tuning
//! - `error`: Configuration errors

pub mod config;
pub mod error;
pub mod sim;

pub use config::SessionConfig;
pub use error::ConfigError;

/// Gameplay defaults (per-second units, independent of the host tick rate)
pub mod consts {
    /// Suggested host timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Play-field dimensions
    pub const FIELD_HEIGHT: f32 = 490.0;
    /// Top edge of the ground strip
    pub const GROUND_Y: f32 = 460.0;

    /// Player defaults
    pub const PLAYER_START_X: f32 = 100.0;
    pub const PLAYER_START_Y: f32 = 245.0;
    pub const PLAYER_RADIUS: f32 = 28.0;

    /// Downward acceleration (units/s²)
    pub const GRAVITY: f32 = 1000.0;
    /// Vertical velocity set by a jump (units/s, negative is up)
    pub const JUMP_IMPULSE: f32 = -350.0;

    /// Cosmetic tilt (degrees)
    pub const JUMP_TILT: f32 = -20.0;
    pub const MAX_TILT: f32 = 20.0;
    /// Tilt recovery (degrees/s)
    pub const TILT_RATE: f32 = 60.0;

    /// Obstacle defaults
    pub const OBSTACLE_SPEED: f32 = 200.0;
    pub const SPAWN_X: f32 = 400.0;
    pub const SLOT_SPACING: f32 = 60.0;
    pub const SLOT_OFFSET: f32 = 35.0;
    pub const OBSTACLE_HALF_WIDTH: f32 = 26.0;
    pub const OBSTACLE_HALF_HEIGHT: f32 = 30.0;

    /// Row layout
    pub const ROW_SLOT_COUNT: u32 = 8;
    pub const GAP_SLOTS: u32 = 2;
    pub const GAP_RANGE: [u32; 2] = [1, 5];

    /// Deferred work delays (milliseconds)
    pub const SPAWN_INTERVAL_MS: f64 = 1500.0;
    pub const SCORE_DEBOUNCE_MS: f64 = 1000.0;
    pub const GAME_OVER_DELAY_MS: f64 = 2000.0;
}
