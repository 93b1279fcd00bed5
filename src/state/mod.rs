//! State management module
//! 
//! This module contains the timer data model, the per-timer records and the
//! controller that owns them.

pub mod app_state;
pub mod timer_controller;
pub mod timer_id;
pub mod timer_record;
pub mod timer_state;

// Re-export main types
pub use app_state::{AppState, LastAction};
pub use timer_controller::{TimerController, POLL_INTERVAL};
pub use timer_id::TimerId;
pub use timer_record::{TimerRecord, TimerSnapshot};
pub use timer_state::{
    compute_remaining, percent_elapsed, DurationBreakdown, Remaining, TimerConfig, TimerDisplay,
};
