//! Countdown polling task

use std::time::Duration;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

use crate::state::{TimerController, TimerId};

/// Recompute the display of timer `id` every `period` until the countdown
/// ends, is stopped, or is superseded by a newer run.
///
/// Ticks are scheduled from `anchor`, not from the previous tick, so the
/// cadence does not drift.
pub async fn countdown_poll_task(
    controller: TimerController,
    id: TimerId,
    run: u64,
    anchor: Instant,
    period: Duration,
) {
    debug!("Polling timer {} (run {}) every {:?}", id, run, period);

    let mut interval = interval_at(anchor + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        interval.tick().await;
        if !controller.poll(id, run) {
            break;
        }
    }

    debug!("Poll loop for timer {} (run {}) finished", id, run);
}
