//! Countdown Service - named countdown timers with live display updates
//! 
//! This library tracks a fixed set of named timers, runs their countdowns on
//! the tokio runtime and publishes remaining time and progress to any number
//! of subscribers through watch channels.

pub mod config;
pub mod state;
pub mod api;
pub mod lifecycle;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, TimerConfig, TimerController, TimerDisplay, TimerId};
pub use api::create_router;
pub use lifecycle::TimerPage;
pub use utils::signals::shutdown_signal;
