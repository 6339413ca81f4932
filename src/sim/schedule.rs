//! Deferred task queue
//!
//! Work that must happen after a wall-clock delay is queued with a due time
//! and drained once per tick in due order. Cancelled tasks stay queued and
//! are dropped when they come due.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Deferred work items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// Generate the next obstacle row (re-armed by the session while spawning)
    SpawnRow,
    /// Drop the scoreboard's debounce lock
    ReleaseScoreLock,
    /// Leave GameOver for the menu
    ReturnToMenu,
}

#[derive(Debug, Clone)]
pub struct Task {
    pub due_ms: f64,
    pub kind: TaskKind,
    pub cancelled: bool,
    seq: u64,
}

impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Task {}

impl PartialOrd for Task {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Task {
    // Reversed so the max-heap pops the earliest task; ties go in scheduling order
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due_ms
            .total_cmp(&self.due_ms)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

#[derive(Debug, Clone, Default)]
pub struct TaskQueue {
    heap: BinaryHeap<Task>,
    next_seq: u64,
}

impl TaskQueue {
    pub fn schedule(&mut self, due_ms: f64, kind: TaskKind) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Task {
            due_ms,
            kind,
            cancelled: false,
            seq,
        });
    }

    /// Flag every pending task of this kind; returns how many were flagged
    pub fn cancel(&mut self, kind: TaskKind) -> usize {
        let mut tasks = std::mem::take(&mut self.heap).into_vec();
        let mut count = 0;
        for task in tasks.iter_mut().filter(|t| t.kind == kind && !t.cancelled) {
            task.cancelled = true;
            count += 1;
        }
        self.heap = BinaryHeap::from(tasks);
        count
    }

    /// Pop the earliest live task due at or before `now_ms`
    pub fn pop_due(&mut self, now_ms: f64) -> Option<Task> {
        while let Some(task) = self.heap.peek() {
            if task.due_ms > now_ms {
                return None;
            }
            let task = self.heap.pop()?;
            if task.cancelled {
                log::trace!("Dropping cancelled {:?} due at {}", task.kind, task.due_ms);
                continue;
            }
            return Some(task);
        }
        None
    }

    /// Number of live (uncancelled) tasks of a kind
    pub fn pending(&self, kind: TaskKind) -> usize {
        self.heap
            .iter()
            .filter(|t| t.kind == kind && !t.cancelled)
            .count()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pops_in_due_order() {
        let mut queue = TaskQueue::default();
        queue.schedule(300.0, TaskKind::ReturnToMenu);
        queue.schedule(100.0, TaskKind::SpawnRow);
        queue.schedule(200.0, TaskKind::ReleaseScoreLock);

        let kinds: Vec<_> = std::iter::from_fn(|| queue.pop_due(1000.0))
            .map(|t| t.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![TaskKind::SpawnRow, TaskKind::ReleaseScoreLock, TaskKind::ReturnToMenu]
        );
    }

    #[test]
    fn test_ties_keep_scheduling_order() {
        let mut queue = TaskQueue::default();
        queue.schedule(100.0, TaskKind::ReleaseScoreLock);
        queue.schedule(100.0, TaskKind::SpawnRow);
        assert_eq!(queue.pop_due(100.0).map(|t| t.kind), Some(TaskKind::ReleaseScoreLock));
        assert_eq!(queue.pop_due(100.0).map(|t| t.kind), Some(TaskKind::SpawnRow));
    }

    #[test]
    fn test_not_due_yet() {
        let mut queue = TaskQueue::default();
        queue.schedule(500.0, TaskKind::SpawnRow);
        assert!(queue.pop_due(499.9).is_none());
        assert!(queue.pop_due(500.0).is_some());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_cancelled_tasks_are_dropped() {
        let mut queue = TaskQueue::default();
        queue.schedule(100.0, TaskKind::SpawnRow);
        queue.schedule(150.0, TaskKind::ReleaseScoreLock);
        assert_eq!(queue.cancel(TaskKind::SpawnRow), 1);
        assert_eq!(queue.pending(TaskKind::SpawnRow), 0);

        assert_eq!(queue.pop_due(200.0).map(|t| t.kind), Some(TaskKind::ReleaseScoreLock));
        assert!(queue.pop_due(200.0).is_none());
        assert!(queue.is_empty());
    }
}
