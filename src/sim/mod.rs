//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Host-supplied timestep only; all rates are per second
//! - Seeded RNG only
//! - Delayed work goes through the session's task queue, never a timer
//! - No rendering, input-device or platform dependencies

pub mod collision;
pub mod entity;
pub mod player;
pub mod schedule;
pub mod score;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{BlockingCause, Contacts, classify, shapes_overlap};
pub use entity::{Entity, EntityKind, Shape};
pub use player::Player;
pub use schedule::{TaskKind, TaskQueue};
pub use score::{GapOutcome, Scoreboard};
pub use spawner::{Row, Spawner};
pub use state::{EntityView, Session, SessionEvent, SessionPhase, Snapshot};
pub use tick::{EdgeTrigger, TickInput, advance};
