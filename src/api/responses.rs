//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::TimerSnapshot;

/// Request body for POST /start
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartRequest {
    /// Free-form duration string, e.g. "1h 2m 3s"
    pub duration: String,
}

/// API response structure for timer control endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerSnapshot,
    pub display: String,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, timer: TimerSnapshot, display: String) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            timer,
            display,
        }
    }

    /// Create a response whose status mirrors the timer state
    pub fn for_timer(message: String, timer: TimerSnapshot, display: String) -> Self {
        Self::new(timer.state.to_string(), message, timer, display)
    }

    /// Create an error response
    pub fn error(message: String, timer: TimerSnapshot, display: String) -> Self {
        Self::new("error".to_string(), message, timer, display)
    }
}

/// Status response with timer and server information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerSnapshot,
    pub display: String,
    pub alarm_ringing: bool,
    pub alarm_duration_secs: u64,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
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
