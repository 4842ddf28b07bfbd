//! Alarm playback module
//!
//! This module rings an alarm for a bounded duration when a countdown
//! finishes. The actual sound backend stays behind the [`AlarmPlayer`]
//! trait; the daemon ships a terminal-bell implementation.

pub mod player;
pub mod ringer;

// Re-export main types
pub use player::{AlarmPlayer, TerminalBell};
pub use ringer::AlarmRinger;
