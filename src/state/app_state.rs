//! Shared daemon state

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tokio::sync::broadcast;
use tracing::info;

use crate::alarm::{AlarmPlayer, AlarmRinger};
use crate::engine::{CountdownEngine, StartOutcome, TimerEvent, TimerObserver, IDLE_LABEL};
use crate::state::TimerSnapshot;

/// Observer that bridges engine callbacks into the daemon.
///
/// Caches the most recent display text for `/status` and fans every
/// callback out on a broadcast channel for background tasks. It never
/// calls back into the engine, per the observer contract.
struct EventBridge {
    event_tx: broadcast::Sender<TimerEvent>,
    display: Arc<Mutex<String>>,
}

impl EventBridge {
    fn set_display(&self, text: &str) {
        let mut display = self
            .display
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *display = text.to_string();
    }

    fn publish(&self, event: TimerEvent) {
        // Send only fails with no receivers, which is fine: the cached
        // display text still serves /status.
        let _ = self.event_tx.send(event);
    }
}

impl TimerObserver for EventBridge {
    fn on_tick(&self, formatted_time: &str) {
        self.set_display(formatted_time);
        self.publish(TimerEvent::Tick {
            display: formatted_time.to_string(),
        });
    }

    fn on_status_text(&self, label: &str) {
        self.set_display(label);
        self.publish(TimerEvent::StatusText {
            label: label.to_string(),
        });
    }

    fn on_finished(&self) {
        self.publish(TimerEvent::Finished);
    }

    fn on_invalid_input(&self) {
        self.publish(TimerEvent::InvalidInput);
    }
}

/// Main application state tying the engine, the alarm and the API together
pub struct AppState {
    /// Countdown engine, serialized behind a lock
    engine: Mutex<CountdownEngine>,
    /// Alarm playback with its pending-silence timer
    alarm: Mutex<AlarmRinger>,
    /// Fan-out of engine events to background tasks
    pub event_tx: broadcast::Sender<TimerEvent>,
    /// Most recent display text ("HH:MM:SS", "Timer" or "Paused")
    display: Arc<Mutex<String>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    pub alarm_duration_secs: u64,
    /// Last action tracking
    last_action: Mutex<Option<String>>,
    last_action_time: Mutex<Option<DateTime<Utc>>>,
    /// Keep one receiver alive to prevent channel closure
    _event_rx: broadcast::Receiver<TimerEvent>,
}

impl AppState {
    /// Create a new AppState with an idle engine
    pub fn new(port: u16, host: String, alarm_duration_secs: u64, player: Arc<dyn AlarmPlayer>) -> Self {
        let (event_tx, event_rx) = broadcast::channel(100);
        let display = Arc::new(Mutex::new(IDLE_LABEL.to_string()));

        let bridge = Arc::new(EventBridge {
            event_tx: event_tx.clone(),
            display: Arc::clone(&display),
        });
        let engine = CountdownEngine::new(bridge);
        let alarm = AlarmRinger::new(player, Duration::from_secs(alarm_duration_secs));

        Self {
            engine: Mutex::new(engine),
            alarm: Mutex::new(alarm),
            event_tx,
            display,
            start_time: Instant::now(),
            port,
            host,
            alarm_duration_secs,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
            _event_rx: event_rx,
        }
    }

    /// Subscribe to the engine's event stream
    pub fn subscribe(&self) -> broadcast::Receiver<TimerEvent> {
        self.event_tx.subscribe()
    }

    /// Start a countdown from a free-form duration string
    pub fn start_timer(&self, text: &str) -> StartOutcome {
        self.record_action("start");
        self.engine_lock().start(text)
    }

    /// Pause the countdown; no-op unless running
    pub fn pause_timer(&self) -> TimerSnapshot {
        self.record_action("pause");
        let mut engine = self.engine_lock();
        engine.pause();
        engine.snapshot()
    }

    /// Resume the countdown; no-op unless paused
    pub fn resume_timer(&self) -> TimerSnapshot {
        self.record_action("resume");
        let mut engine = self.engine_lock();
        engine.resume();
        engine.snapshot()
    }

    /// Stop the countdown from any state and silence the alarm
    pub fn stop_timer(&self) -> TimerSnapshot {
        self.record_action("stop");
        self.alarm_lock().silence();
        let mut engine = self.engine_lock();
        engine.stop();
        engine.snapshot()
    }

    /// Current countdown snapshot
    pub fn snapshot(&self) -> TimerSnapshot {
        self.engine_lock().snapshot()
    }

    /// Most recent display text
    pub fn display(&self) -> String {
        self.display
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Ring the alarm for the configured duration
    pub fn trigger_alarm(&self) {
        self.alarm_lock().ring();
    }

    /// Whether the alarm is currently ringing
    pub fn is_alarm_ringing(&self) -> bool {
        self.alarm_lock().is_ringing()
    }

    /// Tear down the engine and the alarm; safe to call more than once
    pub fn teardown(&self) {
        info!("Tearing down timer state");
        self.engine_lock().destroy();
        self.alarm_lock().silence();
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self
            .last_action
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        let last_action_time = *self
            .last_action_time
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        (last_action, last_action_time)
    }

    fn record_action(&self, action: &str) {
        let mut last_action = self
            .last_action
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *last_action = Some(action.to_string());
        drop(last_action);

        let mut last_time = self
            .last_action_time
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *last_time = Some(Utc::now());
    }

    fn engine_lock(&self) -> MutexGuard<'_, CountdownEngine> {
        self.engine.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn alarm_lock(&self) -> MutexGuard<'_, AlarmRinger> {
        self.alarm.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
