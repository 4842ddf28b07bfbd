//! Countdown engine module
//!
//! This module contains the countdown state machine, the observer seam it
//! reports through, and the display formatting for remaining time.

pub mod countdown;
pub mod format;
pub mod observer;

// Re-export main types
pub use countdown::{CountdownEngine, StartOutcome};
pub use format::format_hms;
pub use observer::{TimerEvent, TimerObserver, IDLE_LABEL, PAUSED_LABEL};
