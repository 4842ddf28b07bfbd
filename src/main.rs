//! Timerd - A countdown timer daemon with an alarm on expiry
//!
//! This is the main entry point for the timerd application.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use timerd::{
    alarm::TerminalBell,
    api::create_router,
    config::Config,
    state::AppState,
    tasks::alarm_trigger_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("timerd={},tower_http=info", config.log_level()))
        .init();

    info!("Starting timerd v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, alarm={}s",
        config.host, config.port, config.alarm
    );

    // Create application state with the terminal-bell alarm backend
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        config.alarm,
        Arc::new(TerminalBell::new()),
    ));

    // Start the alarm trigger background task
    let alarm_state = Arc::clone(&state);
    tokio::spawn(async move {
        alarm_trigger_task(alarm_state).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start  - Start a countdown from a duration string");
    info!("  POST /pause  - Pause the running countdown");
    info!("  POST /resume - Resume a paused countdown");
    info!("  POST /stop   - Stop the countdown and silence the alarm");
    info!("  GET  /status - Check current timer status");
    info!("  GET  /health - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

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

    // Cancel the tick task and any pending alarm-silence timer
    state.teardown();

    info!("Server shutdown complete");
    Ok(())
}
