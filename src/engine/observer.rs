//! Observer seam between the engine and its presentation layer

use serde::{Deserialize, Serialize};

/// Label reported when no countdown is in progress
pub const IDLE_LABEL: &str = "Timer";

/// Label reported while a countdown is paused
pub const PAUSED_LABEL: &str = "Paused";

/// Callbacks the engine invokes to report state and time changes.
///
/// The engine has no knowledge of any presentation technology; whoever
/// owns it supplies an observer and renders the callbacks however it
/// likes (panel label, log line, broadcast channel, ...).
///
/// Callbacks are invoked from the engine's tick task while its internal
/// state is locked. Implementations must return promptly and must not
/// call back into the engine.
pub trait TimerObserver: Send + Sync {
    /// A countdown tick, with the remaining time already formatted as
    /// zero-padded `HH:MM:SS`. The final tick of a countdown reports
    /// `00:00:00` before [`TimerObserver::on_finished`] fires.
    fn on_tick(&self, formatted_time: &str);

    /// A non-numeric label replacing the time display: [`IDLE_LABEL`]
    /// when the timer stops or finishes, [`PAUSED_LABEL`] on pause.
    /// The idle label is also the caller's cue to clear any pending
    /// input buffer it owns.
    fn on_status_text(&self, label: &str);

    /// A countdown reached zero. Fires exactly once per completed
    /// countdown; this is the trigger for alarm playback.
    fn on_finished(&self);

    /// A `start` call carried no usable duration. Non-fatal; the
    /// engine's state is unchanged.
    fn on_invalid_input(&self);
}

/// Owned mirror of the observer callbacks, for fanning out over channels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimerEvent {
    Tick { display: String },
    StatusText { label: String },
    Finished,
    InvalidInput,
}
