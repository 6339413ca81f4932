//! Debounced score counter
//!
//! One physical pass through a gap overlaps the gates for several ticks. The
//! lock taken on the first contact is released by a deferred task, so every
//! contact inside the window collapses into one increment.

use serde::{Deserialize, Serialize};

/// Result of reporting a gap contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GapOutcome {
    /// Lock already held; nothing changed
    Suppressed,
    /// Lock taken and the score increased to this value
    Scored(u32),
    /// Lock taken but the player was dead, so no point. A session never
    /// reports gates for a dead player, so only direct callers see this.
    LockedOnly,
}

impl GapOutcome {
    /// True when the caller must schedule a lock release
    pub fn took_lock(&self) -> bool {
        !matches!(self, GapOutcome::Suppressed)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scoreboard {
    value: u32,
    locked: bool,
}

impl Scoreboard {
    #[inline]
    pub fn value(&self) -> u32 {
        self.value
    }

    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn on_gap_passed(&mut self, player_alive: bool) -> GapOutcome {
        if self.locked {
            return GapOutcome::Suppressed;
        }
        self.locked = true;
        if player_alive {
            self.value += 1;
            GapOutcome::Scored(self.value)
        } else {
            GapOutcome::LockedOnly
        }
    }

    pub fn release(&mut self) {
        self.locked = false;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contacts_inside_window_score_once() {
        let mut board = Scoreboard::default();
        assert_eq!(board.on_gap_passed(true), GapOutcome::Scored(1));
        for _ in 0..10 {
            assert_eq!(board.on_gap_passed(true), GapOutcome::Suppressed);
        }
        assert_eq!(board.value(), 1);
    }

    #[test]
    fn test_release_allows_next_point() {
        let mut board = Scoreboard::default();
        board.on_gap_passed(true);
        board.release();
        assert_eq!(board.on_gap_passed(true), GapOutcome::Scored(2));
    }

    #[test]
    fn test_dead_player_locks_without_scoring() {
        let mut board = Scoreboard::default();
        let outcome = board.on_gap_passed(false);
        assert_eq!(outcome, GapOutcome::LockedOnly);
        assert!(outcome.took_lock());
        assert!(board.is_locked());
        assert_eq!(board.value(), 0);
    }

    #[test]
    fn test_reset() {
        let mut board = Scoreboard::default();
        board.on_gap_passed(true);
        board.reset();
        assert_eq!(board.value(), 0);
        assert!(!board.is_locked());
    }
}
