//! Main application state shared by the HTTP handlers

use std::{
    sync::{Mutex, PoisonError},
    time::Instant,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use super::{DurationBreakdown, TimerController, TimerId};

/// Most recent operation requested through the API
#[derive(Debug, Clone, Serialize)]
pub struct LastAction {
    pub action: String,
    pub timer: TimerId,
    pub at: DateTime<Utc>,
}

/// Application state: the timer controller plus server metadata
#[derive(Debug)]
pub struct AppState {
    pub controller: TimerController,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    last_action: Mutex<Option<LastAction>>,
}

impl AppState {
    pub fn new(controller: TimerController, port: u16, host: String) -> Self {
        Self {
            controller,
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
        }
    }

    /// Remember `action` on `timer` as the latest API operation
    pub fn record_action(&self, action: &str, timer: TimerId) {
        debug!("Recording action {} on timer {}", action, timer);
        let mut last_action = self.last_action.lock().unwrap_or_else(PoisonError::into_inner);
        *last_action = Some(LastAction {
            action: action.to_string(),
            timer,
            at: Utc::now(),
        });
    }

    pub fn last_action(&self) -> Option<LastAction> {
        self.last_action
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Server uptime formatted like a timer display
    pub fn uptime(&self) -> String {
        DurationBreakdown::from_duration(self.start_time.elapsed()).to_string()
    }
}
