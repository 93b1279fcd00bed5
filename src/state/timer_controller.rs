//! Timer controller: registration, start/stop/reset and the polling hand-off

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};
use tokio::{sync::watch, time::Instant};
use tracing::{debug, info};

use crate::tasks::countdown_poll_task;
use super::{TimerConfig, TimerDisplay, TimerId, TimerRecord, TimerSnapshot};

/// How often a running timer recomputes its display
pub const POLL_INTERVAL: Duration = Duration::from_millis(300);

#[derive(Debug, Default)]
struct Registry {
    records: HashMap<TimerId, TimerRecord>,
    next_run: u64,
}

/// Shared handle to every registered timer.
///
/// Cloning is cheap; all clones see the same timers. Operations never fail:
/// an unregistered id yields an empty display stream or an ended stream
/// holding `false`.
#[derive(Debug, Clone)]
pub struct TimerController {
    registry: Arc<Mutex<Registry>>,
    poll_interval: Duration,
}

impl TimerController {
    pub fn new() -> Self {
        Self::with_poll_interval(POLL_INTERVAL)
    }

    pub fn with_poll_interval(poll_interval: Duration) -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry::default())),
            poll_interval,
        }
    }

    fn registry(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Install `config`, replacing any record for the same id
    pub fn register(&self, config: TimerConfig) {
        let mut registry = self.registry();
        let previous = registry.records.insert(config.id, TimerRecord::new(config));

        match previous {
            Some(mut previous) => {
                if previous.is_running() {
                    info!("Re-registering running timer {}, cancelling its countdown", config.id);
                }
                previous.cancel_poll();
            }
            None => debug!("Registered timer {}", config.id),
        }
        info!("Timer {} configured for {}s", config.id, config.total_seconds);
    }

    /// Begin (or restart) the countdown for `id`.
    ///
    /// Returns `None` when no timer is registered under `id`. Must be called
    /// from within a tokio runtime.
    pub fn start(&self, id: TimerId) -> Option<watch::Receiver<TimerDisplay>> {
        let mut registry = self.registry();
        registry.next_run += 1;
        let run = registry.next_run;

        let Some(record) = registry.records.get_mut(&id) else {
            debug!("Start requested for unregistered timer {}", id);
            return None;
        };

        let anchor = Instant::now();
        record.arm(anchor, run);

        if record.tick(anchor) {
            let handle = tokio::spawn(countdown_poll_task(
                self.clone(),
                id,
                run,
                anchor,
                self.poll_interval,
            ));
            record.attach_poll(handle);
            info!("Timer {} started ({}s)", id, record.config().total_seconds);
        } else {
            info!("Timer {} has no time to count down, ended immediately", id);
        }

        Some(record.subscribe_display())
    }

    /// Stop the countdown for `id` and publish the idle display
    pub fn stop(&self, id: TimerId) -> watch::Receiver<bool> {
        let mut registry = self.registry();

        match registry.records.get_mut(&id) {
            Some(record) => {
                if record.is_running() {
                    info!("Timer {} stopped", id);
                } else {
                    debug!("Timer {} already idle", id);
                }
                record.halt();
                record.subscribe_ended()
            }
            None => {
                debug!("Stop requested for unregistered timer {}", id);
                let (_, ended_rx) = watch::channel(false);
                ended_rx
            }
        }
    }

    /// Stop and immediately restart the countdown for `id`
    pub fn reset(&self, id: TimerId) -> Option<watch::Receiver<TimerDisplay>> {
        info!("Resetting timer {}", id);
        self.stop(id);
        self.start(id)
    }

    pub fn lookup(&self, id: TimerId) -> Option<TimerSnapshot> {
        self.registry().records.get(&id).map(TimerRecord::snapshot)
    }

    /// Snapshots of every registered timer, ordered by id
    pub fn timers(&self) -> Vec<TimerSnapshot> {
        let registry = self.registry();
        let mut snapshots: Vec<TimerSnapshot> =
            registry.records.values().map(TimerRecord::snapshot).collect();
        snapshots.sort_by_key(|snapshot| snapshot.config.id);
        snapshots
    }

    /// Late subscription to the display stream, replaying the latest value
    pub fn subscribe_display(&self, id: TimerId) -> Option<watch::Receiver<TimerDisplay>> {
        self.registry().records.get(&id).map(TimerRecord::subscribe_display)
    }

    pub fn subscribe_ended(&self, id: TimerId) -> Option<watch::Receiver<bool>> {
        self.registry().records.get(&id).map(TimerRecord::subscribe_ended)
    }

    /// Stop every running timer; used on process teardown
    pub fn stop_all(&self) {
        let mut registry = self.registry();
        let mut stopped = 0;
        for record in registry.records.values_mut().filter(|record| record.is_running()) {
            record.halt();
            stopped += 1;
        }
        info!("Stopped {} running timer(s)", stopped);
    }

    /// One polling tick for run `run` of `id`.
    ///
    /// Returns `false` once the poll loop should exit: the countdown expired,
    /// was stopped, or has been superseded by a newer run.
    pub(crate) fn poll(&self, id: TimerId, run: u64) -> bool {
        let mut registry = self.registry();
        let Some(record) = registry.records.get_mut(&id) else {
            return false;
        };
        if record.run() != run || !record.is_running() {
            debug!("Dropping stale tick for timer {} (run {})", id, run);
            return false;
        }

        let alive = record.tick(Instant::now());
        if !alive {
            info!("Timer {} expired", id);
        }
        alive
    }
}

impl Default for TimerController {
    fn default() -> Self {
        Self::new()
    }
}
