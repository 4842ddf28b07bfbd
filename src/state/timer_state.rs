//! Timer lifecycle state

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle state of a countdown.
///
/// Exactly one value holds at any time and it is the sole authority for
/// which operations are currently valid: `pause` only applies while
/// `Running`, `resume` only while `Paused`, `stop` always applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Stopped,
    Running,
    Paused,
}

impl TimerState {
    /// Check if a countdown is currently ticking
    pub fn is_running(&self) -> bool {
        matches!(self, TimerState::Running)
    }

    /// Check if a countdown is suspended with time remaining
    pub fn is_paused(&self) -> bool {
        matches!(self, TimerState::Paused)
    }

    /// Check if no countdown is in progress
    pub fn is_stopped(&self) -> bool {
        matches!(self, TimerState::Stopped)
    }
}

impl Default for TimerState {
    fn default() -> Self {
        TimerState::Stopped
    }
}

impl fmt::Display for TimerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimerState::Stopped => "stopped",
            TimerState::Running => "running",
            TimerState::Paused => "paused",
        };
        f.write_str(name)
    }
}

/// Point-in-time view of a countdown, as reported by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub state: TimerState,
    pub remaining_seconds: u64,
}

impl TimerSnapshot {
    /// Snapshot of an idle timer
    pub fn idle() -> Self {
        Self {
            state: TimerState::Stopped,
            remaining_seconds: 0,
        }
    }
}

impl Default for TimerSnapshot {
    fn default() -> Self {
        Self::idle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_predicates() {
        assert!(TimerState::Running.is_running());
        assert!(!TimerState::Running.is_paused());
        assert!(TimerState::Paused.is_paused());
        assert!(TimerState::Stopped.is_stopped());
        assert_eq!(TimerState::default(), TimerState::Stopped);
    }

    #[test]
    fn state_serializes_lowercase() {
        let json = serde_json::to_string(&TimerState::Paused).unwrap();
        assert_eq!(json, "\"paused\"");
    }

    #[test]
    fn idle_snapshot_is_stopped_at_zero() {
        let snapshot = TimerSnapshot::idle();
        assert!(snapshot.state.is_stopped());
        assert_eq!(snapshot.remaining_seconds, 0);
    }
}
