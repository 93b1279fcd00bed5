//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/timers", get(timers_handler))
        .route("/timers/:id", get(timer_handler).put(register_handler))
        .route("/timers/:id/start", post(start_handler))
        .route("/timers/:id/stop", post(stop_handler))
        .route("/timers/:id/reset", post(reset_handler))
        .route("/timers/:id/events", get(display_events_handler))
        .route("/timers/:id/ended", get(ended_events_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use futures::StreamExt;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::state::{TimerConfig, TimerController, TimerId};

    fn app() -> (Router, Arc<AppState>) {
        let controller = TimerController::new();
        controller.register(TimerConfig::new(TimerId::Default, 3360));
        let state = Arc::new(AppState::new(controller, 20554, "127.0.0.1".to_string()));
        (create_router(Arc::clone(&state)), state)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app.clone().oneshot(request.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        // Rejections carry plain-text bodies.
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test(start_paused = true)]
    async fn start_reports_full_countdown() {
        let (app, _) = app();

        let (status, body) = send(&app, "POST", "/timers/default/start", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "running");
        assert_eq!(body["display"]["formatted"], "00:56:00");
        assert_eq!(body["display"]["remaining"]["minutes"], 56);
        assert_eq!(body["display"]["percent_elapsed"], 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn unregistered_timer_is_a_safe_no_op() {
        let (app, _) = app();

        let (status, body) = send(&app, "POST", "/timers/confirm/start", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "unregistered");
        assert!(body["display"].is_null());

        let (_, body) = send(&app, "POST", "/timers/confirm/stop", None).await;
        assert_eq!(body["ended"], false);

        let (status, _) = send(&app, "GET", "/timers/confirm", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_slot_is_rejected() {
        let (app, _) = app();
        let (status, _) = send(&app, "POST", "/timers/lunch/start", None).await;
        assert!(status.is_client_error());
    }

    #[tokio::test(start_paused = true)]
    async fn register_then_start_and_stop() {
        let (app, state) = app();

        let (status, body) =
            send(&app, "PUT", "/timers/confirm", Some(serde_json::json!({ "total_seconds": 90 }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "idle");
        assert_eq!(body["display"]["total_seconds"], 90);

        send(&app, "POST", "/timers/confirm/start", None).await;
        let (_, view) = send(&app, "GET", "/timers/confirm", None).await;
        assert_eq!(view["running"], true);
        assert_eq!(view["display"]["formatted"], "00:01:30");

        let (_, body) = send(&app, "POST", "/timers/confirm/stop", None).await;
        assert_eq!(body["ended"], true);
        assert!(!state.controller.lookup(TimerId::Confirm).unwrap().running);
        assert_eq!(state.last_action().unwrap().action, "stop");
    }

    #[tokio::test(start_paused = true)]
    async fn negative_duration_is_rejected() {
        let (app, _) = app();
        let (status, _) =
            send(&app, "PUT", "/timers/confirm", Some(serde_json::json!({ "total_seconds": -5 }))).await;
        assert!(status.is_client_error());
    }

    #[tokio::test(start_paused = true)]
    async fn reset_restarts_from_full_duration() {
        let (app, _) = app();
        send(&app, "POST", "/timers/default/start", None).await;
        tokio::time::sleep(std::time::Duration::from_secs(61)).await;

        let (_, view) = send(&app, "GET", "/timers/default", None).await;
        assert_eq!(view["display"]["formatted"], "00:54:59");

        let (_, body) = send(&app, "POST", "/timers/default/reset", None).await;
        assert_eq!(body["status"], "running");
        assert_eq!(body["display"]["formatted"], "00:56:00");
    }

    #[tokio::test(start_paused = true)]
    async fn status_lists_timers() {
        let (app, _) = app();
        send(&app, "POST", "/timers/default/start", None).await;

        let (status, body) = send(&app, "GET", "/status", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["timers"][0]["id"], "default");
        assert_eq!(body["timers"][0]["running"], true);
        assert_eq!(body["last_action"]["action"], "start");
        assert_eq!(body["port"], 20554);

        let (_, timers) = send(&app, "GET", "/timers", None).await;
        assert_eq!(timers.as_array().unwrap().len(), 1);
    }

    async fn first_sse_frame(app: &Router, uri: &str) -> (StatusCode, String) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        if status != StatusCode::OK {
            return (status, String::new());
        }

        let mut frames = response.into_body().into_data_stream();
        let frame = frames.next().await.unwrap().unwrap();
        (status, String::from_utf8(frame.to_vec()).unwrap())
    }

    fn frame_data(frame: &str) -> Value {
        let data = frame
            .lines()
            .find_map(|line| line.strip_prefix("data: "))
            .unwrap();
        serde_json::from_str(data).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn display_events_replay_current_display() {
        let (app, _) = app();
        send(&app, "POST", "/timers/default/start", None).await;
        tokio::time::sleep(std::time::Duration::from_secs(2)).await;

        let (status, frame) = first_sse_frame(&app, "/timers/default/events").await;

        assert_eq!(status, StatusCode::OK);
        assert!(frame.starts_with("event: display\n"), "frame was {:?}", frame);
        let data = frame_data(&frame);
        assert_eq!(data["formatted"], "00:55:58");
        assert_eq!(data["total_seconds"], 3360);
        assert_eq!(data["remaining"]["seconds"], 58);
        assert!(data["percent_elapsed"].as_f64().unwrap() > 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn ended_events_replay_current_flag() {
        let (app, _) = app();
        send(&app, "POST", "/timers/default/start", None).await;
        send(&app, "POST", "/timers/default/stop", None).await;

        let (status, frame) = first_sse_frame(&app, "/timers/default/ended").await;

        assert_eq!(status, StatusCode::OK);
        assert!(frame.starts_with("event: ended\n"), "frame was {:?}", frame);
        assert_eq!(frame_data(&frame), Value::Bool(true));
    }

    #[tokio::test(start_paused = true)]
    async fn event_streams_need_a_registered_timer() {
        let (app, _) = app();

        let (status, _) = first_sse_frame(&app, "/timers/confirm/events").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = first_sse_frame(&app, "/timers/confirm/ended").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test(start_paused = true)]
    async fn largest_duration_registers_and_starts() {
        let (app, _) = app();

        let (status, _) = send(
            &app,
            "PUT",
            "/timers/default",
            Some(serde_json::json!({ "total_seconds": u64::MAX })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, "POST", "/timers/default/start", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "running");
        assert_eq!(body["display"]["total_seconds"], u64::MAX);

        let (_, view) = send(&app, "GET", "/timers/default", None).await;
        assert_eq!(view["running"], true);
        assert!(view["started_at"].is_string());
    }

    #[tokio::test]
    async fn health_is_ok() {
        let (app, _) = app();
        let (status, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }
}
