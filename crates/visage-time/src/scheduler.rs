//! Deferred task scheduler
//!
//! Tasks are due at a point on the frame clock and are handed back by `poll`
//! once the clock reaches them. The scheduler is owned by whoever scheduled
//! the tasks, so dropping the owner drops every pending task with it.

use std::fmt;
use std::time::Duration;

/// Handle to a scheduled task
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub u64);

impl fmt::Debug for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Task({})", self.0)
    }
}

#[derive(Debug, Clone)]
struct Scheduled<T> {
    id: TaskId,
    /// Frame-clock seconds at which the task becomes due
    due: f64,
    task: T,
}

/// Cancellable deferred tasks keyed on frame-clock time
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    pending: Vec<Scheduled<T>>,
    next_id: u64,
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Scheduler {
            pending: Vec::new(),
            next_id: 1,
        }
    }

    /// Schedule `task` to become due at `due` seconds
    pub fn schedule_at(&mut self, due: f64, task: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;

        // Keep sorted by (due, id) so poll drains from the front
        let pos = self
            .pending
            .partition_point(|s| s.due < due || (s.due == due && s.id < id));
        self.pending.insert(pos, Scheduled { id, due, task });

        tracing::trace!(?id, due, "task scheduled");
        id
    }

    /// Schedule `task` to become due `delay` after `now`
    pub fn schedule_after(&mut self, now: f64, delay: Duration, task: T) -> TaskId {
        self.schedule_at(now + delay.as_secs_f64(), task)
    }

    /// Cancel a pending task. Returns false if it already ran or was cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        match self.pending.iter().position(|s| s.id == id) {
            Some(pos) => {
                self.pending.remove(pos);
                tracing::trace!(?id, "task cancelled");
                true
            }
            None => false,
        }
    }

    /// Cancel everything. Returns how many tasks were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }

    /// Remove and return every task due at or before `now`, earliest first
    pub fn poll(&mut self, now: f64) -> Vec<T> {
        let due = self.pending.partition_point(|s| s.due <= now);
        self.pending.drain(..due).map(|s| s.task).collect()
    }

    pub fn is_pending(&self, id: TaskId) -> bool {
        self.pending.iter().any(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Due time of the earliest pending task
    pub fn next_due(&self) -> Option<f64> {
        self.pending.first().map(|s| s.due)
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_returns_due_tasks_in_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_at(0.3, "c");
        scheduler.schedule_at(0.1, "a");
        scheduler.schedule_at(0.2, "b");

        assert!(scheduler.poll(0.05).is_empty());
        assert_eq!(scheduler.poll(0.2), vec!["a", "b"]);
        assert_eq!(scheduler.len(), 1);
        assert_eq!(scheduler.next_due(), Some(0.3));
        assert_eq!(scheduler.poll(10.0), vec!["c"]);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_same_due_time_keeps_insertion_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_at(1.0, 1);
        scheduler.schedule_at(1.0, 2);
        scheduler.schedule_at(1.0, 3);

        assert_eq!(scheduler.poll(1.0), vec![1, 2, 3]);
    }

    #[test]
    fn test_cancel() {
        let mut scheduler = Scheduler::new();
        let keep = scheduler.schedule_after(0.0, Duration::from_millis(150), "keep");
        let drop = scheduler.schedule_after(0.0, Duration::from_millis(150), "drop");

        assert!(scheduler.cancel(drop));
        assert!(!scheduler.cancel(drop));
        assert!(scheduler.is_pending(keep));
        assert!(!scheduler.is_pending(drop));

        assert!(scheduler.poll(0.149).is_empty());
        assert_eq!(scheduler.poll(0.150), vec!["keep"]);
        assert!(!scheduler.cancel(keep));
    }

    proptest::proptest! {
        #[test]
        fn prop_poll_drains_in_due_order(dues in proptest::collection::vec(0.0f64..10.0, 0..64), now in 0.0f64..10.0) {
            let mut scheduler = Scheduler::new();
            for due in &dues {
                scheduler.schedule_at(*due, *due);
            }

            let fired = scheduler.poll(now);
            proptest::prop_assert!(fired.windows(2).all(|w| w[0] <= w[1]));
            proptest::prop_assert!(fired.iter().all(|due| *due <= now));
            proptest::prop_assert_eq!(fired.len() + scheduler.len(), dues.len());
        }
    }

    #[test]
    fn test_cancel_all() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_at(1.0, ());
        scheduler.schedule_at(2.0, ());

        assert_eq!(scheduler.cancel_all(), 2);
        assert!(scheduler.poll(100.0).is_empty());
    }
}
