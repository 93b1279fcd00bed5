//! Per-timer bookkeeping owned by the controller

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::{sync::watch, task::JoinHandle, time::Instant};

use super::{compute_remaining, TimerConfig, TimerDisplay};

/// Live state of one registered timer
#[derive(Debug)]
pub struct TimerRecord {
    config: TimerConfig,
    display_tx: watch::Sender<TimerDisplay>,
    ended_tx: watch::Sender<bool>,
    poll_handle: Option<JoinHandle<()>>,
    anchor: Option<Instant>,
    started_at: Option<DateTime<Utc>>,
    run: u64,
}

impl TimerRecord {
    /// Create an idle record for the given configuration
    pub fn new(config: TimerConfig) -> Self {
        let (display_tx, _) = watch::channel(TimerDisplay::idle(config.total_seconds));
        let (ended_tx, _) = watch::channel(false);

        Self {
            config,
            display_tx,
            ended_tx,
            poll_handle: None,
            anchor: None,
            started_at: None,
            run: 0,
        }
    }

    pub fn config(&self) -> TimerConfig {
        self.config
    }

    /// Generation of the current (or last) countdown
    pub fn run(&self) -> u64 {
        self.run
    }

    pub fn is_running(&self) -> bool {
        self.poll_handle.is_some()
    }

    pub fn display(&self) -> TimerDisplay {
        self.display_tx.borrow().clone()
    }

    pub fn ended(&self) -> bool {
        *self.ended_tx.borrow()
    }

    pub fn subscribe_display(&self) -> watch::Receiver<TimerDisplay> {
        self.display_tx.subscribe()
    }

    pub fn subscribe_ended(&self) -> watch::Receiver<bool> {
        self.ended_tx.subscribe()
    }

    /// Abort the polling task, if any. Safe to call repeatedly.
    pub fn cancel_poll(&mut self) {
        if let Some(handle) = self.poll_handle.take() {
            handle.abort();
        }
    }

    /// Prepare a new countdown anchored at `anchor` under generation `run`
    pub fn arm(&mut self, anchor: Instant, run: u64) {
        self.cancel_poll();
        self.ended_tx.send_replace(false);
        self.anchor = Some(anchor);
        self.started_at = Some(Utc::now());
        self.run = run;
    }

    pub fn attach_poll(&mut self, handle: JoinHandle<()>) {
        self.cancel_poll();
        self.poll_handle = Some(handle);
    }

    /// Recompute the display at `now`.
    ///
    /// Returns `false` when the countdown is over, in which case the record
    /// has already moved to idle and nothing was broadcast for this tick.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(anchor) = self.anchor else {
            return false;
        };

        let remaining = compute_remaining(anchor, now, self.config.total_seconds);
        if remaining.breakdown.is_zero() {
            self.poll_handle = None;
            self.halt();
            return false;
        }

        self.display_tx
            .send_replace(TimerDisplay::running(self.config.total_seconds, remaining));
        true
    }

    /// Cancel the countdown, publish the idle display and signal the end
    pub fn halt(&mut self) {
        self.cancel_poll();
        self.anchor = None;
        self.started_at = None;
        self.display_tx
            .send_replace(TimerDisplay::idle(self.config.total_seconds));
        self.ended_tx.send_replace(true);
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            config: self.config,
            running: self.is_running(),
            ended: self.ended(),
            display: self.display(),
            started_at: self.started_at,
        }
    }
}

/// Read-only copy of a timer record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimerSnapshot {
    pub config: TimerConfig,
    pub running: bool,
    pub ended: bool,
    pub display: TimerDisplay,
    /// Wall-clock start of the current countdown, `None` while idle
    pub started_at: Option<DateTime<Utc>>,
}
