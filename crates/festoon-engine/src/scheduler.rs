//! Cancelable one-shot and repeating task scheduling
//!
//! Tasks carry *messages* rather than closures: the engine drains due
//! tasks in timestamp order and applies each message as a state
//! transition on the components it owns. That keeps every callback a
//! pure transition and makes cancellation a plain queue edit instead of
//! a fight with captured mutable state.

/// Smallest accepted repeat interval, in seconds. Guards the event pump
/// against a zero-interval task that would never let time move.
const MIN_INTERVAL: f64 = 0.001;

/// Handle to a scheduled task. Canceling a handle that has already
/// fired, was already canceled, or belonged to a discarded slot is a
/// no-op.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct TaskHandle(u64);

impl TaskHandle {
    pub fn raw(&self) -> u64 {
        self.0
    }
}

struct Task<M> {
    handle: TaskHandle,
    fire_at: f64,
    /// `Some(interval)` for repeating tasks, `None` for one-shots
    interval: Option<f64>,
    message: M,
}

/// Pending-task queue drained by the engine's event pump.
///
/// Same-timestamp tasks pop in creation order (handles are issued from
/// a monotonically increasing counter and used as the tie-break).
pub struct Scheduler<M> {
    tasks: Vec<Task<M>>,
    next_handle: u64,
}

impl<M: Clone> Scheduler<M> {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_handle: 1,
        }
    }

    fn issue_handle(&mut self) -> TaskHandle {
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        handle
    }

    /// Schedule `message` for delivery `delay` seconds after `now`.
    /// A zero delay still waits for the next pump iteration; nothing
    /// ever executes inline from here.
    pub fn schedule_once(&mut self, now: f64, delay: f64, message: M) -> TaskHandle {
        let handle = self.issue_handle();
        self.tasks.push(Task {
            handle,
            fire_at: now + delay.max(0.0),
            interval: None,
            message,
        });
        handle
    }

    /// Schedule `message` for delivery every `interval` seconds,
    /// starting `interval` seconds after `now`.
    pub fn schedule_repeating(&mut self, now: f64, interval: f64, message: M) -> TaskHandle {
        let interval = interval.max(MIN_INTERVAL);
        let handle = self.issue_handle();
        self.tasks.push(Task {
            handle,
            fire_at: now + interval,
            interval: Some(interval),
            message,
        });
        handle
    }

    /// Cancel a task. Idempotent: unknown or already-fired handles are
    /// ignored. A canceled task's message is never delivered again,
    /// even if it was already due when cancel was called.
    pub fn cancel(&mut self, handle: TaskHandle) {
        self.tasks.retain(|t| t.handle != handle);
    }

    /// True if the handle refers to a still-pending task.
    pub fn is_scheduled(&self, handle: TaskHandle) -> bool {
        self.tasks.iter().any(|t| t.handle == handle)
    }

    /// Timestamp of the earliest pending task, if any.
    pub fn next_due_at(&self) -> Option<f64> {
        self.tasks
            .iter()
            .map(|t| t.fire_at)
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Remove and return the earliest task due at or before `now`.
    ///
    /// Repeating tasks are re-armed *before* their message is returned,
    /// so a cancel issued while handling the message also removes the
    /// re-armed instance.
    pub fn pop_due(&mut self, now: f64) -> Option<(TaskHandle, M)> {
        let idx = self
            .tasks
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                a.fire_at
                    .total_cmp(&b.fire_at)
                    .then(a.handle.cmp(&b.handle))
            })
            .map(|(i, _)| i)?;

        if self.tasks[idx].fire_at > now {
            return None;
        }

        match self.tasks[idx].interval {
            Some(interval) => {
                self.tasks[idx].fire_at += interval;
                let task = &self.tasks[idx];
                Some((task.handle, task.message.clone()))
            }
            None => {
                let task = self.tasks.swap_remove(idx);
                Some((task.handle, task.message))
            }
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl<M: Clone> Default for Scheduler<M> {
    fn default() -> Self {
        Self::new()
    }
}
