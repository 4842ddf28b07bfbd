//! Timerd - A countdown timer engine with an HTTP control surface
//!
//! This library provides a small countdown state machine (start, pause,
//! resume, stop) that ticks at one-second resolution and notifies an
//! observer, plus the daemon plumbing to drive it over HTTP and ring an
//! alarm when the countdown finishes.

pub mod config;
pub mod parse;
pub mod state;
pub mod engine;
pub mod alarm;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::AppState;
pub use engine::{CountdownEngine, StartOutcome, TimerObserver};
pub use api::create_router;
pub use utils::shutdown_signal;
