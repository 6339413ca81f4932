//! Session state and transitions
//!
//! The session owns every piece of mutable game state and is the only thing
//! that changes it. Components report what happened; the session decides.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::BlockingCause;
use super::entity::{Entity, EntityKind, Shape};
use super::player::{PLAYER_ID, Player};
use super::schedule::{Task, TaskKind, TaskQueue};
use super::score::{GapOutcome, Scoreboard};
use super::spawner::Spawner;
use crate::config::SessionConfig;
use crate::error::ConfigError;

/// Gap top index remembered before the first row of a run is spawned
pub const INITIAL_CLOSEST_GAP: u32 = 3;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Waiting for a start input
    Menu,
    /// Active run
    Playing,
    /// Run ended, waiting for the deferred return to the menu
    GameOver,
}

/// Things that happened during a tick, for audio/text collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    RunStarted { run: u32 },
    Jumped,
    RowSpawned { gap_top: u32 },
    /// Player overlapped a gate (may repeat across ticks for one pass)
    GapPassed { gate: u32 },
    Scored { value: u32 },
    PlayerDied { cause: BlockingCause },
    GameOver { final_score: u32 },
    ReturnedToMenu { final_score: u32 },
}

/// Render-facing view of one entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub id: u32,
    pub kind: EntityKind,
    pub pos: Vec2,
    pub shape: Shape,
}

impl From<&Entity> for EntityView {
    fn from(entity: &Entity) -> Self {
        Self {
            id: entity.id,
            kind: entity.kind,
            pos: entity.pos,
            shape: entity.shape,
        }
    }
}

/// Read-only copy of everything a renderer needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: SessionPhase,
    pub score: u32,
    pub final_score: Option<u32>,
    pub closest_gap: u32,
    pub player_alive: bool,
    pub player_tilt: f32,
    /// Player first, then obstacles in spawn order
    pub entities: Vec<EntityView>,
}

/// One game session (deterministic for a given config, seed and input stream)
#[derive(Debug, Clone)]
pub struct Session {
    pub(crate) config: SessionConfig,
    pub(crate) seed: u64,
    pub(crate) rng: Pcg32,
    pub(crate) phase: SessionPhase,
    /// Session clock, accumulated from tick deltas
    pub(crate) now_ms: f64,
    pub(crate) time_ticks: u64,
    /// Runs started so far
    pub(crate) run: u32,
    pub(crate) player: Player,
    /// Active pipes and gates, in spawn order
    pub(crate) obstacles: Vec<Entity>,
    pub(crate) spawner: Spawner,
    pub(crate) scoreboard: Scoreboard,
    pub(crate) tasks: TaskQueue,
    /// Guards the single GameOver -> Menu transition per run
    pub(crate) menu_scheduled: bool,
    pub(crate) final_score: Option<u32>,
    pub(crate) closest_gap: u32,
    next_id: u32,
}

impl Session {
    /// Build a session in the menu. Fails fast on an invalid config.
    pub fn new(config: SessionConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            player: Player::new(&config),
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: SessionPhase::Menu,
            now_ms: 0.0,
            time_ticks: 0,
            run: 0,
            obstacles: Vec::new(),
            spawner: Spawner::default(),
            scoreboard: Scoreboard::default(),
            tasks: TaskQueue::default(),
            menu_scheduled: false,
            final_score: None,
            closest_gap: INITIAL_CLOSEST_GAP,
            next_id: PLAYER_ID + 1,
        })
    }

    // === Read-only accessors ===

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.scoreboard.value()
    }

    /// Score of the last finished run, shown by the menu until the next start
    pub fn final_score(&self) -> Option<u32> {
        self.final_score
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_alive(&self) -> bool {
        self.player.alive()
    }

    pub fn obstacles(&self) -> &[Entity] {
        &self.obstacles
    }

    pub fn closest_gap(&self) -> u32 {
        self.closest_gap
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn run(&self) -> u32 {
        self.run
    }

    pub fn snapshot(&self) -> Snapshot {
        let entities = std::iter::once(&self.player.body)
            .chain(self.obstacles.iter())
            .map(EntityView::from)
            .collect();
        Snapshot {
            phase: self.phase,
            score: self.score(),
            final_score: self.final_score,
            closest_gap: self.closest_gap,
            player_alive: self.player.alive(),
            player_tilt: self.player.tilt,
            entities,
        }
    }

    // === Transitions ===

    /// Menu -> Playing
    pub(crate) fn start_run(&mut self, events: &mut Vec<SessionEvent>) {
        if self.phase != SessionPhase::Menu {
            return;
        }
        self.player.reset(self.config.player_start);
        self.obstacles.clear();
        self.scoreboard.reset();
        self.spawner.reset();
        self.tasks.clear();
        self.menu_scheduled = false;
        self.final_score = None;
        self.closest_gap = INITIAL_CLOSEST_GAP;
        self.tasks
            .schedule(self.now_ms + self.config.spawn_interval_ms, TaskKind::SpawnRow);

        self.run += 1;
        self.phase = SessionPhase::Playing;
        log::info!("Run {} started (seed {})", self.run, self.seed);
        events.push(SessionEvent::RunStarted { run: self.run });
    }

    /// Playing -> GameOver. Only the first blocking contact of a run counts.
    pub(crate) fn end_run(&mut self, cause: BlockingCause, events: &mut Vec<SessionEvent>) {
        if self.phase != SessionPhase::Playing || self.menu_scheduled {
            log::debug!("Ignoring {:?}: run already over", cause);
            return;
        }
        if !self.player.kill() {
            log::debug!("Ignoring {:?}: player already dead", cause);
            return;
        }

        self.spawner.stop(&mut self.obstacles);
        self.tasks.cancel(TaskKind::SpawnRow);

        self.menu_scheduled = true;
        self.tasks
            .schedule(self.now_ms + self.config.game_over_delay_ms, TaskKind::ReturnToMenu);
        self.phase = SessionPhase::GameOver;

        let final_score = self.score();
        log::info!("Run {} over ({:?}), score {}", self.run, cause, final_score);
        events.push(SessionEvent::PlayerDied { cause });
        events.push(SessionEvent::GameOver { final_score });
    }

    /// GameOver -> Menu, carrying the final score
    pub(crate) fn return_to_menu(&mut self, events: &mut Vec<SessionEvent>) {
        if self.phase != SessionPhase::GameOver {
            return;
        }
        let final_score = self.score();
        self.final_score = Some(final_score);
        self.obstacles.clear();
        self.player.reset(self.config.player_start);
        self.menu_scheduled = false;
        self.phase = SessionPhase::Menu;

        log::info!("Back to menu, last score {}", final_score);
        events.push(SessionEvent::ReturnedToMenu { final_score });
    }

    /// Report an overlapped gate to the scoreboard
    pub(crate) fn gap_passed(&mut self, gate: u32, events: &mut Vec<SessionEvent>) {
        events.push(SessionEvent::GapPassed { gate });
        let outcome = self.scoreboard.on_gap_passed(self.player.alive());
        if outcome.took_lock() {
            self.tasks.schedule(
                self.now_ms + self.config.score_debounce_ms,
                TaskKind::ReleaseScoreLock,
            );
        }
        match outcome {
            GapOutcome::Scored(value) => {
                log::debug!("Scored: {}", value);
                events.push(SessionEvent::Scored { value });
            }
            GapOutcome::Suppressed => log::trace!("Gate {} contact debounced", gate),
            GapOutcome::LockedOnly => {}
        }
    }

    /// Spawn a row if still allowed, then re-arm the spawn timer
    fn spawn_row(&mut self, task: &Task, events: &mut Vec<SessionEvent>) {
        // Checked at execution time: a stop may have landed after scheduling
        if self.phase != SessionPhase::Playing {
            return;
        }
        let Some(row) = self.spawner.spawn_row(&self.config, &mut self.rng, self.next_id) else {
            log::debug!("Spawner stopped, skipping row");
            return;
        };

        self.next_id += row.entities.len() as u32;
        self.closest_gap = row.gap_top;
        self.obstacles.extend(row.entities);
        self.tasks
            .schedule(task.due_ms + self.config.spawn_interval_ms, TaskKind::SpawnRow);

        log::debug!("Row spawned with gap at {}", row.gap_top);
        events.push(SessionEvent::RowSpawned { gap_top: row.gap_top });
    }

    /// Execute every deferred task that has come due, earliest first
    pub(crate) fn run_due_tasks(&mut self, events: &mut Vec<SessionEvent>) {
        while let Some(task) = self.tasks.pop_due(self.now_ms) {
            log::trace!("Running {:?} due at {}", task.kind, task.due_ms);
            match task.kind {
                TaskKind::SpawnRow => self.spawn_row(&task, events),
                TaskKind::ReleaseScoreLock => self.scoreboard.release(),
                TaskKind::ReturnToMenu => self.return_to_menu(events),
            }
        }
    }
}
