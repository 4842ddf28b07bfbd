//! HTTP endpoint handlers

use std::sync::Arc;

use axum::{extract::State, response::Json};
use tracing::{info, warn};

use crate::{engine::StartOutcome, state::AppState};

use super::responses::{ApiResponse, HealthResponse, StartRequest, StatusResponse};

/// Handle POST /start - Begin a countdown from a duration string
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<StartRequest>,
) -> Json<ApiResponse> {
    match state.start_timer(&request.duration) {
        StartOutcome::Started(seconds) => {
            info!("Start endpoint called - counting down {} seconds", seconds);
            Json(ApiResponse::for_timer(
                format!("Countdown started for {} seconds", seconds),
                state.snapshot(),
                state.display(),
            ))
        }
        StartOutcome::InvalidInput => {
            warn!("Start endpoint called with invalid duration: {:?}", request.duration);
            Json(ApiResponse::error(
                "Invalid duration; expected tokens like \"1h 2m 3s\"".to_string(),
                state.snapshot(),
                state.display(),
            ))
        }
    }
}

/// Handle POST /pause - Suspend a running countdown
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    let timer = state.pause_timer();
    let message = if timer.state.is_paused() {
        info!("Pause endpoint called - countdown paused");
        "Countdown paused".to_string()
    } else {
        "No running countdown to pause".to_string()
    };
    Json(ApiResponse::for_timer(message, timer, state.display()))
}

/// Handle POST /resume - Continue a paused countdown
pub async fn resume_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    let timer = state.resume_timer();
    let message = if timer.state.is_running() {
        info!("Resume endpoint called - countdown resumed");
        "Countdown resumed".to_string()
    } else {
        "No paused countdown to resume".to_string()
    };
    Json(ApiResponse::for_timer(message, timer, state.display()))
}

/// Handle POST /stop - Abandon the countdown and silence the alarm
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    let timer = state.stop_timer();
    info!("Stop endpoint called - countdown stopped");
    Json(ApiResponse::for_timer(
        "Countdown stopped".to_string(),
        timer,
        state.display(),
    ))
}

/// Handle GET /status - Return current timer and server status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        timer: state.snapshot(),
        display: state.display(),
        alarm_ringing: state.is_alarm_ringing(),
        alarm_duration_secs: state.alarm_duration_secs,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /health - Health check
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
