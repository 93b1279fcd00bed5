//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{DurationBreakdown, LastAction, TimerDisplay, TimerId, TimerSnapshot};

/// Body of `PUT /timers/:id`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub total_seconds: u64,
}

/// Display state as sent to clients, with the rendered remaining time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayPayload {
    pub total_seconds: u64,
    pub remaining: Option<DurationBreakdown>,
    pub formatted: Option<String>,
    pub percent_elapsed: Option<f64>,
}

impl From<&TimerDisplay> for DisplayPayload {
    fn from(display: &TimerDisplay) -> Self {
        Self {
            total_seconds: display.total_seconds,
            remaining: display.remaining,
            formatted: display.formatted(),
            percent_elapsed: display.percent_elapsed,
        }
    }
}

/// One timer as reported by the lookup and listing endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerView {
    pub id: TimerId,
    pub total_seconds: u64,
    pub running: bool,
    pub ended: bool,
    pub started_at: Option<DateTime<Utc>>,
    pub display: DisplayPayload,
}

impl From<&TimerSnapshot> for TimerView {
    fn from(snapshot: &TimerSnapshot) -> Self {
        Self {
            id: snapshot.config.id,
            total_seconds: snapshot.config.total_seconds,
            running: snapshot.running,
            ended: snapshot.ended,
            started_at: snapshot.started_at,
            display: DisplayPayload::from(&snapshot.display),
        }
    }
}

/// Response for register/start/reset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerResponse {
    /// `running`, `idle` or `unregistered`
    pub status: String,
    pub id: TimerId,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub display: Option<DisplayPayload>,
}

impl TimerResponse {
    /// Build a response from the display a subscriber would see, if any
    pub fn from_display(id: TimerId, message: String, display: Option<&TimerDisplay>) -> Self {
        let status = match display {
            Some(display) if display.is_idle() => "idle",
            Some(_) => "running",
            None => "unregistered",
        };

        Self {
            status: status.to_string(),
            id,
            message,
            timestamp: Utc::now(),
            display: display.map(DisplayPayload::from),
        }
    }
}

/// Response for `POST /timers/:id/stop`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopResponse {
    pub id: TimerId,
    pub ended: bool,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Server status with every timer
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub timers: Vec<TimerView>,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<LastAction>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
