//! Alarm trigger background task

use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use crate::{engine::TimerEvent, state::AppState};

/// Background task that watches the engine's event stream and rings the
/// alarm when a countdown finishes.
pub async fn alarm_trigger_task(state: Arc<AppState>) {
    info!("Starting alarm trigger task");

    let mut events = state.subscribe();

    loop {
        match events.recv().await {
            Ok(TimerEvent::Finished) => {
                info!(
                    "Countdown finished, ringing alarm for {} seconds",
                    state.alarm_duration_secs
                );
                state.trigger_alarm();
            }
            Ok(TimerEvent::Tick { display: shown }) => {
                debug!("Countdown tick: {}", shown);
            }
            Ok(TimerEvent::StatusText { label }) => {
                debug!("Timer status: {}", label);
            }
            Ok(TimerEvent::InvalidInput) => {
                warn!("Rejected an invalid duration input");
            }
            Err(RecvError::Lagged(skipped)) => {
                // Ticks are droppable, but a Finished may be among the
                // skipped events; log loudly.
                warn!("Alarm trigger task lagged, skipped {} events", skipped);
            }
            Err(RecvError::Closed) => {
                info!("Event channel closed, alarm trigger task exiting");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alarm::AlarmPlayer;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::time::sleep;

    #[derive(Default)]
    struct CountingPlayer {
        plays: AtomicUsize,
    }

    impl AlarmPlayer for CountingPlayer {
        fn play(&self) {
            self.plays.fetch_add(1, Ordering::SeqCst);
        }

        fn stop(&self) {}
    }

    #[tokio::test(start_paused = true)]
    async fn finished_countdown_rings_the_alarm_once() {
        let player = Arc::new(CountingPlayer::default());
        let state = Arc::new(AppState::new(
            0,
            "127.0.0.1".to_string(),
            10,
            Arc::clone(&player) as Arc<dyn AlarmPlayer>,
        ));

        tokio::spawn(alarm_trigger_task(Arc::clone(&state)));
        // Let the task subscribe before events start flowing.
        sleep(Duration::from_millis(10)).await;

        state.start_timer("1s");
        sleep(Duration::from_secs(5)).await;

        assert_eq!(player.plays.load(Ordering::SeqCst), 1);
        assert!(state.is_alarm_ringing());
    }

    #[tokio::test(start_paused = true)]
    async fn pause_and_stop_do_not_ring_the_alarm() {
        let player = Arc::new(CountingPlayer::default());
        let state = Arc::new(AppState::new(
            0,
            "127.0.0.1".to_string(),
            10,
            Arc::clone(&player) as Arc<dyn AlarmPlayer>,
        ));

        tokio::spawn(alarm_trigger_task(Arc::clone(&state)));
        sleep(Duration::from_millis(10)).await;

        state.start_timer("1h");
        sleep(Duration::from_millis(1500)).await;
        state.pause_timer();
        state.resume_timer();
        sleep(Duration::from_millis(1500)).await;
        state.stop_timer();
        sleep(Duration::from_secs(2)).await;

        assert_eq!(player.plays.load(Ordering::SeqCst), 0);
    }
}
