//! Deadline-ordered task queue for timer-driven gestures.
//!
//! The scheduler never reads a clock. The owner passes `now` into
//! [`Scheduler::pop_due`] from its own event loop, which keeps every timer
//! callback on the sequencing thread and makes the timing fully testable.

use std::time::Duration;

use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

#[derive(Debug, Clone)]
struct Task<T> {
    id: TaskId,
    due: Duration,
    every: Option<Duration>,
    payload: T,
}

#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    tasks: Vec<Task<T>>,
    next_id: u64,
}

impl<T: Clone> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 0,
        }
    }

    fn push(&mut self, due: Duration, every: Option<Duration>, payload: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        trace!(id = id.0, ?due, ?every, "task scheduled");
        self.tasks.push(Task {
            id,
            due,
            every,
            payload,
        });
        id
    }

    pub fn schedule_once(&mut self, due: Duration, payload: T) -> TaskId {
        self.push(due, None, payload)
    }

    /// First fires at `due`, then every `every` until cancelled. A zero
    /// interval is bumped to one millisecond.
    pub fn schedule_repeating(&mut self, due: Duration, every: Duration, payload: T) -> TaskId {
        let every = every.max(Duration::from_millis(1));
        self.push(due, Some(every), payload)
    }

    /// Returns false if the task already fired (one-shot) or was cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        before != self.tasks.len()
    }

    pub fn cancel_all(&mut self) {
        if !self.tasks.is_empty() {
            trace!(count = self.tasks.len(), "tasks cancelled");
        }
        self.tasks.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.tasks.iter().map(|t| t.due).min()
    }

    /// Fire the earliest task whose deadline is at or before `now`.
    ///
    /// Repeating tasks are re-armed one interval after their previous
    /// deadline, so calling this in a loop catches up on missed ticks. Ties
    /// fire in scheduling order.
    pub fn pop_due(&mut self, now: Duration) -> Option<(TaskId, T)> {
        let index = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= now)
            .min_by_key(|(_, t)| (t.due, t.id))
            .map(|(i, _)| i)?;
        let task = &mut self.tasks[index];
        let fired = (task.id, task.payload.clone());
        match task.every {
            Some(every) => task.due += every,
            None => {
                self.tasks.remove(index);
            }
        }
        Some(fired)
    }
}

impl<T: Clone> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
