//! Bounded alarm playback with a cancellable silence timer

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::debug;

use super::player::AlarmPlayer;

/// Rings an [`AlarmPlayer`] for a bounded duration.
///
/// `ring` starts playback and schedules a one-shot task that stops it
/// after the configured ring duration. The ringer owns that task's
/// handle: ringing again replaces it, and `silence` cancels it, so a
/// stale stop can never fire after teardown.
pub struct AlarmRinger {
    player: Arc<dyn AlarmPlayer>,
    ring_duration: Duration,
    silence_handle: Option<JoinHandle<()>>,
}

impl AlarmRinger {
    pub fn new(player: Arc<dyn AlarmPlayer>, ring_duration: Duration) -> Self {
        Self {
            player,
            ring_duration,
            silence_handle: None,
        }
    }

    /// Start playback and schedule the stop after the ring duration.
    ///
    /// Must be called from within a tokio runtime. A ring already in
    /// progress is replaced; its pending stop is cancelled first.
    pub fn ring(&mut self) {
        self.cancel_pending();
        self.player.play();

        let player = Arc::clone(&self.player);
        let ring_duration = self.ring_duration;
        self.silence_handle = Some(tokio::spawn(async move {
            sleep(ring_duration).await;
            player.stop();
        }));
        debug!("Alarm scheduled to stop in {:?}", self.ring_duration);
    }

    /// Stop playback immediately and cancel the pending stop. Idempotent.
    pub fn silence(&mut self) {
        let was_pending = self.cancel_pending();
        if was_pending {
            self.player.stop();
        }
    }

    /// Whether a ring is in progress (its stop has not fired yet)
    pub fn is_ringing(&self) -> bool {
        self.silence_handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    fn cancel_pending(&mut self) -> bool {
        match self.silence_handle.take() {
            Some(handle) => {
                let live = !handle.is_finished();
                handle.abort();
                live
            }
            None => false,
        }
    }
}

impl Drop for AlarmRinger {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
