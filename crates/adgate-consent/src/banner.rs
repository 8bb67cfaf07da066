//! One-shot deferred task scheduling for the consent banner.

use std::time::Duration;

use parking_lot::Mutex;

/// Schedules a one-shot deferred task.
///
/// Tasks are never cancelled once scheduled; callers guard against staleness
/// by re-checking their own state when the task runs.
pub trait BannerScheduler: Send + Sync {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce() + Send>);
}

type PendingTask = (Duration, Box<dyn FnOnce() + Send>);

/// Scheduler driven explicitly by the host event loop (or a test): tasks
/// accumulate until `fire_due` runs them.
#[derive(Default)]
pub struct ManualScheduler {
    pending: Mutex<Vec<PendingTask>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks waiting to fire.
    pub fn pending(&self) -> usize {
        self.pending.lock().len()
    }

    /// Run every task whose delay is at most `elapsed`, in scheduling order.
    pub fn fire_due(&self, elapsed: Duration) {
        let mut due = Vec::new();
        {
            let mut pending = self.pending.lock();
            let mut rest = Vec::new();
            for (delay, task) in pending.drain(..) {
                if delay <= elapsed {
                    due.push(task);
                } else {
                    rest.push((delay, task));
                }
            }
            *pending = rest;
        }
        // Tasks run outside the lock so they can schedule again.
        for task in due {
            task();
        }
    }

    /// Run every pending task regardless of delay.
    pub fn fire_all(&self) {
        self.fire_due(Duration::MAX);
    }
}

impl BannerScheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce() + Send>) {
        self.pending.lock().push((delay, task));
    }
}
