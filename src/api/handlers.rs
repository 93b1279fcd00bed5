//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use futures::stream::{Stream, StreamExt};
use tracing::{debug, info};

use crate::{
    state::{AppState, TimerConfig, TimerId},
    utils::watch_stream,
};
use super::responses::{
    HealthResponse, RegisterRequest, StatusResponse, StopResponse, TimerResponse, TimerView,
    DisplayPayload,
};

/// Handle PUT /timers/:id - Register (or replace) a timer configuration
pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<TimerId>,
    Json(request): Json<RegisterRequest>,
) -> Json<TimerResponse> {
    state.controller.register(TimerConfig::new(id, request.total_seconds));
    state.record_action("register", id);

    let display = state.controller.lookup(id).map(|snapshot| snapshot.display);
    Json(TimerResponse::from_display(
        id,
        format!("Timer {} configured for {}s", id, request.total_seconds),
        display.as_ref(),
    ))
}

/// Handle POST /timers/:id/start - Start the countdown
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<TimerId>,
) -> Json<TimerResponse> {
    let display = state.controller.start(id).map(|rx| rx.borrow().clone());
    state.record_action("start", id);

    let message = match &display {
        Some(_) => format!("Timer {} started", id),
        None => format!("Timer {} is not registered", id),
    };
    info!("Start endpoint called for timer {}", id);
    Json(TimerResponse::from_display(id, message, display.as_ref()))
}

/// Handle POST /timers/:id/stop - Stop the countdown
pub async fn stop_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<TimerId>,
) -> Json<StopResponse> {
    let ended = *state.controller.stop(id).borrow();
    state.record_action("stop", id);

    info!("Stop endpoint called for timer {}", id);
    Json(StopResponse {
        id,
        ended,
        message: if ended {
            format!("Timer {} stopped", id)
        } else {
            format!("Timer {} is not registered", id)
        },
        timestamp: chrono::Utc::now(),
    })
}

/// Handle POST /timers/:id/reset - Restart the countdown from the full duration
pub async fn reset_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<TimerId>,
) -> Json<TimerResponse> {
    let display = state.controller.reset(id).map(|rx| rx.borrow().clone());
    state.record_action("reset", id);

    let message = match &display {
        Some(_) => format!("Timer {} reset", id),
        None => format!("Timer {} is not registered", id),
    };
    info!("Reset endpoint called for timer {}", id);
    Json(TimerResponse::from_display(id, message, display.as_ref()))
}

/// Handle GET /timers/:id - Look up a single timer
pub async fn timer_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<TimerId>,
) -> Result<Json<TimerView>, StatusCode> {
    match state.controller.lookup(id) {
        Some(snapshot) => Ok(Json(TimerView::from(&snapshot))),
        None => {
            debug!("Lookup of unregistered timer {}", id);
            Err(StatusCode::NOT_FOUND)
        }
    }
}

/// Handle GET /timers - List every registered timer
pub async fn timers_handler(State(state): State<Arc<AppState>>) -> Json<Vec<TimerView>> {
    Json(state.controller.timers().iter().map(TimerView::from).collect())
}

/// Handle GET /timers/:id/events - Stream display updates as Server-Sent Events
pub async fn display_events_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<TimerId>,
) -> Result<Sse<impl Stream<Item = Result<Event, axum::Error>>>, StatusCode> {
    let receiver = state.controller.subscribe_display(id).ok_or(StatusCode::NOT_FOUND)?;
    debug!("Display subscriber attached to timer {}", id);

    let events = watch_stream(receiver)
        .map(|display| Event::default().event("display").json_data(DisplayPayload::from(&display)));
    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}

/// Handle GET /timers/:id/ended - Stream ended flags as Server-Sent Events
pub async fn ended_events_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<TimerId>,
) -> Result<Sse<impl Stream<Item = Result<Event, axum::Error>>>, StatusCode> {
    let receiver = state.controller.subscribe_ended(id).ok_or(StatusCode::NOT_FOUND)?;
    debug!("Ended subscriber attached to timer {}", id);

    let events = watch_stream(receiver).map(|ended| Event::default().event("ended").json_data(ended));
    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}

/// Handle GET /status - Return server status and every timer
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        timers: state.controller.timers().iter().map(TimerView::from).collect(),
        uptime: state.uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action: state.last_action(),
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
