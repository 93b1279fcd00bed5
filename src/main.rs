//! Countdown Service - named countdown timers with live display updates
//!
//! This is the main entry point for the countdown-service application.

use std::{future::IntoFuture, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use countdown_service::{
    config::Config,
    state::{AppState, TimerController, TimerId},
    api::create_router,
    lifecycle::TimerPage,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("countdown_service={},tower_http=info", config.log_level()))
        .init();

    info!("Starting countdown-service v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, duration={}s, confirm={}s",
          config.host, config.port, config.duration, config.confirm_duration);

    let controller = TimerController::new();
    for timer in config.timer_configs() {
        controller.register(timer);
    }

    // The page owns the default timer for the lifetime of the process
    let mut page = TimerPage::new(controller.clone(), TimerId::Default);
    if config.no_autostart {
        info!("Autostart disabled, timers registered but idle");
    } else {
        page.mount();
    }

    let state = Arc::new(AppState::new(controller.clone(), config.port, config.host.clone()));
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /timers            - List timers");
    info!("  GET  /timers/:id        - Inspect a timer");
    info!("  PUT  /timers/:id        - Configure a timer");
    info!("  POST /timers/:id/start  - Start a countdown");
    info!("  POST /timers/:id/stop   - Stop a countdown");
    info!("  POST /timers/:id/reset  - Restart a countdown");
    info!("  GET  /timers/:id/events - Stream display updates (SSE)");
    info!("  GET  /timers/:id/ended  - Stream ended flags (SSE)");
    info!("  GET  /status            - Server status");
    info!("  GET  /health            - Health check");

    // SSE subscribers keep connections open, so race the server against the signal
    let server = axum::serve(listener, app).into_future();

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    page.unmount();
    controller.stop_all();

    info!("Server shutdown complete");
    Ok(())
}
