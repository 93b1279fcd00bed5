//! Timer configuration and display state

use std::{fmt, time::Duration};
use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use super::TimerId;

/// Configured countdown length for one timer slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    pub id: TimerId,
    pub total_seconds: u64,
}

impl TimerConfig {
    pub fn new(id: TimerId, total_seconds: u64) -> Self {
        Self { id, total_seconds }
    }
}

/// Whole-second decomposition of a time span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DurationBreakdown {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl DurationBreakdown {
    pub fn from_secs(total: u64) -> Self {
        Self {
            days: total / 86_400,
            hours: (total % 86_400) / 3600,
            minutes: (total % 3600) / 60,
            seconds: total % 60,
        }
    }

    /// Sub-second remainders are dropped
    pub fn from_duration(duration: Duration) -> Self {
        Self::from_secs(duration.as_secs())
    }

    pub fn is_zero(&self) -> bool {
        self.days == 0 && self.hours == 0 && self.minutes == 0 && self.seconds == 0
    }
}

impl fmt::Display for DurationBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.days > 0 {
            write!(f, "{}d ", self.days)?;
        }
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// Result of measuring a countdown against the clock
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Remaining {
    pub breakdown: DurationBreakdown,
    /// Fractional seconds left; negative once the deadline has passed
    pub remaining_seconds: f64,
}

/// Measure how much of a countdown anchored at `start` is left at `now`.
///
/// Works from elapsed time rather than a deadline instant, so any `u64`
/// duration is accepted.
pub fn compute_remaining(start: Instant, now: Instant, total_seconds: u64) -> Remaining {
    let total = Duration::from_secs(total_seconds);
    let elapsed = now.saturating_duration_since(start);
    let left = total.saturating_sub(elapsed);
    let remaining_seconds = if left.is_zero() {
        -elapsed.saturating_sub(total).as_secs_f64()
    } else {
        left.as_secs_f64()
    };

    Remaining {
        breakdown: DurationBreakdown::from_duration(left),
        remaining_seconds,
    }
}

/// Share of the countdown already elapsed, in percent. `None` for zero-length timers.
pub fn percent_elapsed(total_seconds: u64, remaining_seconds: f64) -> Option<f64> {
    if total_seconds == 0 {
        return None;
    }
    let total = total_seconds as f64;
    Some((total - remaining_seconds) * 100.0 / total)
}

/// What subscribers render for a timer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerDisplay {
    pub total_seconds: u64,
    /// `None` while the timer is idle
    pub remaining: Option<DurationBreakdown>,
    pub percent_elapsed: Option<f64>,
}

impl TimerDisplay {
    /// Display of a timer that is not counting down
    pub fn idle(total_seconds: u64) -> Self {
        Self {
            total_seconds,
            remaining: None,
            percent_elapsed: percent_elapsed(total_seconds, total_seconds as f64),
        }
    }

    /// Display of a running timer measured by [`compute_remaining`]
    pub fn running(total_seconds: u64, remaining: Remaining) -> Self {
        Self {
            total_seconds,
            remaining: Some(remaining.breakdown),
            percent_elapsed: percent_elapsed(total_seconds, remaining.remaining_seconds),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.remaining.is_none()
    }

    /// Remaining time as `HH:MM:SS`, if running
    pub fn formatted(&self) -> Option<String> {
        self.remaining.map(|breakdown| breakdown.to_string())
    }
}
