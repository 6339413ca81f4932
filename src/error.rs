//! Error types
//!
//! The simulation itself has no runtime failure modes; the only errors are
//! invalid configurations, rejected when a session is built.

/// Rejected session configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("row must have at least one slot")]
    EmptyRow,

    #[error("gap must span at least one slot")]
    EmptyGap,

    #[error("gap of {gap_slots} slots does not fit a row of {row_slot_count}")]
    GapTooWide { gap_slots: u32, row_slot_count: u32 },

    #[error("gap range [{min}, {max}] is inverted")]
    InvertedGapRange { min: u32, max: u32 },

    #[error("gap range [{min}, {max}] must keep the gap off the first and last of {row_slot_count} slots")]
    GapRangeOutOfRow { min: u32, max: u32, row_slot_count: u32 },

    #[error("spawn interval must be positive, got {0} ms")]
    NonPositiveSpawnInterval(f64),

    #[error("{name} must not be negative, got {value} ms")]
    NegativeDelay { name: &'static str, value: f64 },

    #[error("{name} must be positive, got {value}")]
    NonPositiveSize { name: &'static str, value: f32 },

    #[error("{0} must be a finite number")]
    NonFinite(&'static str),

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}
