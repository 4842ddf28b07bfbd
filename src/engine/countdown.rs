//! Countdown state machine and tick loop

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::parse::parse_duration;
use crate::state::{TimerSnapshot, TimerState};

use super::format::format_hms;
use super::observer::{TimerObserver, IDLE_LABEL, PAUSED_LABEL};

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Synchronous answer from [`CountdownEngine::start`].
///
/// Invalid input is a value, never an error: the observer is notified via
/// `on_invalid_input` and the engine's state is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// A countdown began for this many seconds
    Started(u64),
    /// The text carried no usable duration; nothing changed
    InvalidInput,
}

/// State shared between the engine and its tick task
#[derive(Debug)]
struct Shared {
    state: TimerState,
    remaining_seconds: u64,
}

/// Countdown state machine.
///
/// Owns the lifecycle state, the remaining-seconds counter and the
/// periodic tick task, and reports every change through a caller-supplied
/// [`TimerObserver`]. One engine drives one countdown at a time; starting
/// again replaces the previous countdown.
///
/// All methods must be called from within a tokio runtime, since the tick
/// loop is a spawned task. Cancellation is synchronous with respect to
/// observable effects: once `pause`, `stop` or `destroy` returns, no
/// further tick callback fires, because the tick task re-checks the
/// lifecycle state under the shared lock before emitting anything.
///
/// Tick boundary: each tick reports the current remaining time *before*
/// decrementing, so the final tick of a countdown displays `00:00:00` and
/// `on_finished` fires on that same tick. A countdown of `n` seconds
/// therefore produces `n + 1` ticks.
pub struct CountdownEngine {
    shared: Arc<Mutex<Shared>>,
    observer: Arc<dyn TimerObserver>,
    tick_handle: Option<JoinHandle<()>>,
}

impl CountdownEngine {
    /// Create an idle engine reporting to the given observer
    pub fn new(observer: Arc<dyn TimerObserver>) -> Self {
        Self {
            shared: Arc::new(Mutex::new(Shared {
                state: TimerState::Stopped,
                remaining_seconds: 0,
            })),
            observer,
            tick_handle: None,
        }
    }

    /// Parse a duration string and start counting it down.
    ///
    /// A result of zero seconds is treated as invalid input: the observer
    /// receives `on_invalid_input` and the engine keeps whatever state it
    /// was in, including a paused countdown. Otherwise any previous tick
    /// task is cancelled, the remaining time is set to the parsed total
    /// and the engine transitions to `Running`; the first tick arrives
    /// about one second later.
    pub fn start(&mut self, text: &str) -> StartOutcome {
        let total_seconds = parse_duration(text);
        if total_seconds == 0 {
            debug!("Rejected duration input: {:?}", text);
            self.observer.on_invalid_input();
            return StartOutcome::InvalidInput;
        }

        // Cancel before replace: never two live tick tasks for one engine.
        self.cancel_tick();
        {
            let mut shared = lock(&self.shared);
            shared.state = TimerState::Running;
            shared.remaining_seconds = total_seconds;
        }
        self.spawn_tick();

        info!("Countdown started: {} seconds", total_seconds);
        StartOutcome::Started(total_seconds)
    }

    /// Suspend a running countdown, keeping the remaining time.
    ///
    /// A silent no-op unless the engine is `Running`.
    pub fn pause(&mut self) {
        {
            let mut shared = lock(&self.shared);
            if !shared.state.is_running() {
                return;
            }
            shared.state = TimerState::Paused;
        }
        self.cancel_tick();
        self.observer.on_status_text(PAUSED_LABEL);
        info!("Countdown paused");
    }

    /// Continue a paused countdown from its remaining time.
    ///
    /// A silent no-op unless the engine is `Paused`. The duration is not
    /// re-parsed; ticking resumes from the preserved counter.
    pub fn resume(&mut self) {
        {
            let mut shared = lock(&self.shared);
            if !shared.state.is_paused() {
                return;
            }
            shared.state = TimerState::Running;
        }
        self.cancel_tick();
        self.spawn_tick();
        info!("Countdown resumed");
    }

    /// Abandon the countdown from any state.
    ///
    /// Cancels the tick task, resets the remaining time to zero and
    /// reports the idle label, which is also the caller's cue to clear
    /// any input buffer it owns.
    pub fn stop(&mut self) {
        {
            let mut shared = lock(&self.shared);
            shared.state = TimerState::Stopped;
            shared.remaining_seconds = 0;
        }
        self.cancel_tick();
        self.observer.on_status_text(IDLE_LABEL);
        info!("Countdown stopped");
    }

    /// Tear the engine down. Idempotent; emits nothing.
    pub fn destroy(&mut self) {
        {
            let mut shared = lock(&self.shared);
            shared.state = TimerState::Stopped;
            shared.remaining_seconds = 0;
        }
        self.cancel_tick();
        debug!("Countdown engine destroyed");
    }

    /// Current lifecycle state
    pub fn state(&self) -> TimerState {
        lock(&self.shared).state
    }

    /// Seconds left on the countdown
    pub fn remaining_seconds(&self) -> u64 {
        lock(&self.shared).remaining_seconds
    }

    /// Point-in-time view of the countdown
    pub fn snapshot(&self) -> TimerSnapshot {
        let shared = lock(&self.shared);
        TimerSnapshot {
            state: shared.state,
            remaining_seconds: shared.remaining_seconds,
        }
    }

    /// Whether a tick task is currently scheduled and alive
    pub fn has_live_tick(&self) -> bool {
        self.tick_handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    fn cancel_tick(&mut self) {
        if let Some(handle) = self.tick_handle.take() {
            handle.abort();
        }
    }

    fn spawn_tick(&mut self) {
        let shared = Arc::clone(&self.shared);
        let observer = Arc::clone(&self.observer);

        self.tick_handle = Some(tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                let mut shared = lock(&shared);

                // A transition beat us to the lock; this tick is stale.
                if !shared.state.is_running() {
                    break;
                }

                // Report before decrementing, so the boundary tick at
                // zero still displays 00:00:00.
                observer.on_tick(&format_hms(shared.remaining_seconds));

                if shared.remaining_seconds == 0 {
                    shared.state = TimerState::Stopped;
                    observer.on_status_text(IDLE_LABEL);
                    observer.on_finished();
                    break;
                }
                shared.remaining_seconds -= 1;
            }
        }));
    }
}

impl Drop for CountdownEngine {
    fn drop(&mut self) {
        self.cancel_tick();
    }
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::observer::TimerEvent;
    use std::time::Duration;
    use tokio::time::sleep;

    /// Observer that records every callback for later assertions
    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<TimerEvent>>,
    }

    impl Recorder {
        fn events(&self) -> Vec<TimerEvent> {
            self.events.lock().unwrap().clone()
        }

        fn finished_count(&self) -> usize {
            self.events()
                .iter()
                .filter(|event| matches!(event, TimerEvent::Finished))
                .count()
        }
    }

    impl TimerObserver for Recorder {
        fn on_tick(&self, formatted_time: &str) {
            self.events.lock().unwrap().push(TimerEvent::Tick {
                display: formatted_time.to_string(),
            });
        }

        fn on_status_text(&self, label: &str) {
            self.events.lock().unwrap().push(TimerEvent::StatusText {
                label: label.to_string(),
            });
        }

        fn on_finished(&self) {
            self.events.lock().unwrap().push(TimerEvent::Finished);
        }

        fn on_invalid_input(&self) {
            self.events.lock().unwrap().push(TimerEvent::InvalidInput);
        }
    }

    fn engine() -> (CountdownEngine, Arc<Recorder>) {
        let recorder = Arc::new(Recorder::default());
        let engine = CountdownEngine::new(Arc::clone(&recorder) as Arc<dyn TimerObserver>);
        (engine, recorder)
    }

    fn tick(display: &str) -> TimerEvent {
        TimerEvent::Tick {
            display: display.to_string(),
        }
    }

    fn status(label: &str) -> TimerEvent {
        TimerEvent::StatusText {
            label: label.to_string(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn two_second_countdown_sequence() {
        let (mut engine, recorder) = engine();

        assert_eq!(engine.start("2s"), StartOutcome::Started(2));
        sleep(Duration::from_millis(3500)).await;

        assert_eq!(
            recorder.events(),
            vec![
                tick("00:00:02"),
                tick("00:00:01"),
                tick("00:00:00"),
                status(IDLE_LABEL),
                TimerEvent::Finished,
            ]
        );
        assert_eq!(engine.state(), TimerState::Stopped);
        assert_eq!(engine.remaining_seconds(), 0);

        // Nothing more fires after completion.
        sleep(Duration::from_secs(5)).await;
        assert_eq!(recorder.finished_count(), 1);
        assert_eq!(recorder.events().len(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn one_second_countdown_boundary() {
        let (mut engine, recorder) = engine();

        engine.start("1s");
        sleep(Duration::from_millis(2500)).await;

        assert_eq!(
            recorder.events(),
            vec![
                tick("00:00:01"),
                tick("00:00:00"),
                status(IDLE_LABEL),
                TimerEvent::Finished,
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_input_changes_nothing() {
        let (mut engine, recorder) = engine();

        assert_eq!(engine.start("abc"), StartOutcome::InvalidInput);
        assert_eq!(engine.state(), TimerState::Stopped);
        assert!(!engine.has_live_tick());

        sleep(Duration::from_secs(3)).await;
        assert_eq!(recorder.events(), vec![TimerEvent::InvalidInput]);
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_input_keeps_a_paused_countdown() {
        let (mut engine, recorder) = engine();

        engine.start("5s");
        sleep(Duration::from_millis(1500)).await;
        engine.pause();

        engine.start("garbage");
        assert_eq!(engine.state(), TimerState::Paused);
        assert_eq!(engine.remaining_seconds(), 4);
        assert!(recorder
            .events()
            .iter()
            .any(|event| matches!(event, TimerEvent::InvalidInput)));
    }

    #[tokio::test(start_paused = true)]
    async fn pause_resume_round_trip_preserves_remaining() {
        let (mut engine, recorder) = engine();

        engine.start("10s");
        sleep(Duration::from_millis(2500)).await;
        assert_eq!(
            recorder.events(),
            vec![tick("00:00:10"), tick("00:00:09")]
        );

        engine.pause();
        assert_eq!(engine.state(), TimerState::Paused);
        assert_eq!(engine.remaining_seconds(), 8);

        // Paused means no ticks at all, however long we wait.
        sleep(Duration::from_secs(30)).await;
        assert_eq!(
            recorder.events(),
            vec![
                tick("00:00:10"),
                tick("00:00:09"),
                status(PAUSED_LABEL),
            ]
        );

        engine.resume();
        sleep(Duration::from_millis(2500)).await;
        assert_eq!(
            recorder.events(),
            vec![
                tick("00:00:10"),
                tick("00:00:09"),
                status(PAUSED_LABEL),
                tick("00:00:08"),
                tick("00:00:07"),
            ]
        );
        assert_eq!(engine.remaining_seconds(), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_resets_and_silences() {
        let (mut engine, recorder) = engine();

        engine.start("1h");
        sleep(Duration::from_millis(1500)).await;
        engine.stop();

        assert_eq!(engine.state(), TimerState::Stopped);
        assert_eq!(engine.remaining_seconds(), 0);
        let after_stop = recorder.events();
        assert_eq!(after_stop, vec![tick("01:00:00"), status(IDLE_LABEL)]);

        sleep(Duration::from_secs(10)).await;
        assert_eq!(recorder.events(), after_stop);
        assert_eq!(recorder.finished_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_while_paused_resets_remaining() {
        let (mut engine, _recorder) = engine();

        engine.start("30s");
        sleep(Duration::from_millis(1500)).await;
        engine.pause();
        engine.stop();

        assert_eq!(engine.state(), TimerState::Stopped);
        assert_eq!(engine.remaining_seconds(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn pause_outside_running_is_noop() {
        let (mut engine, recorder) = engine();

        engine.pause();
        assert_eq!(engine.state(), TimerState::Stopped);
        assert!(recorder.events().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn resume_outside_paused_is_noop() {
        let (mut engine, recorder) = engine();

        engine.resume();
        assert_eq!(engine.state(), TimerState::Stopped);
        assert!(!engine.has_live_tick());
        assert!(recorder.events().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn stop_from_stopped_still_reports_idle() {
        let (mut engine, recorder) = engine();

        engine.stop();
        assert_eq!(recorder.events(), vec![status(IDLE_LABEL)]);
    }

    #[tokio::test(start_paused = true)]
    async fn restart_replaces_the_tick_source() {
        let (mut engine, recorder) = engine();

        engine.start("5s");
        sleep(Duration::from_millis(1500)).await;
        engine.start("3s");
        assert_eq!(engine.remaining_seconds(), 3);

        sleep(Duration::from_millis(1500)).await;
        assert_eq!(
            recorder.events(),
            vec![tick("00:00:05"), tick("00:00:03")]
        );
        assert_eq!(engine.remaining_seconds(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn destroy_is_idempotent_and_silences_ticks() {
        let (mut engine, recorder) = engine();

        engine.start("10s");
        sleep(Duration::from_millis(1500)).await;
        engine.destroy();
        engine.destroy();

        assert_eq!(engine.state(), TimerState::Stopped);
        sleep(Duration::from_secs(5)).await;
        assert_eq!(recorder.events(), vec![tick("00:00:10")]);
    }
}
