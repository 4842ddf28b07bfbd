//! State management module
//!
//! This module contains the timer lifecycle state and the shared daemon
//! state that ties the engine, the alarm and the HTTP API together.

pub mod timer_state;
pub mod app_state;

// Re-export main types
pub use timer_state::{TimerSnapshot, TimerState};
pub use app_state::AppState;
