//! Pluggable alarm sound backends

use std::io::{self, Write};

use tracing::{info, warn};

/// Sound backend the alarm rings through.
///
/// Implementations must tolerate `stop` without a preceding `play` and
/// repeated calls to either method.
pub trait AlarmPlayer: Send + Sync {
    /// Begin playing the alarm sound
    fn play(&self);

    /// Silence the alarm sound
    fn stop(&self);
}

/// Alarm backend that rings the terminal bell.
///
/// The bell is a single BEL character, so `stop` only logs; there is no
/// continuous sound to cut off.
#[derive(Debug, Default)]
pub struct TerminalBell;

impl TerminalBell {
    pub fn new() -> Self {
        Self
    }
}

impl AlarmPlayer for TerminalBell {
    fn play(&self) {
        info!("Alarm ringing");
        let mut stdout = io::stdout();
        if let Err(e) = stdout.write_all(b"\x07").and_then(|_| stdout.flush()) {
            warn!("Failed to ring terminal bell: {}", e);
        }
    }

    fn stop(&self) {
        info!("Alarm silenced");
    }
}
