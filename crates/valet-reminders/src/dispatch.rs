//! Due-reminder presentation with duplicate suppression.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};
use valet_core::traits::{AlertSink, SpeechSink};

use crate::model::Reminder;

/// Shared last-notified map keyed by reminder id.
///
/// Both the scheduler's dispatcher and the tray-style watcher claim ids
/// here before presenting anything; a claim inside the window is refused,
/// so the same reminder never notifies twice within it.
pub struct DedupGate {
    window: Duration,
    seen: Mutex<HashMap<String, DateTime<Utc>>>,
}

impl DedupGate {
    pub fn new(window_secs: u64) -> Self {
        Self {
            window: Duration::seconds(window_secs as i64),
            seen: Mutex::new(HashMap::new()),
        }
    }

    /// Claim `id` at `now`. Returns false when a notification for the same
    /// id already fired inside the window.
    pub fn try_claim(&self, id: &str, now: DateTime<Utc>) -> bool {
        let mut seen = self.seen.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        seen.retain(|_, stamped| now.signed_duration_since(*stamped) < self.window);
        if seen.contains_key(id) {
            return false;
        }
        seen.insert(id.to_string(), now);
        true
    }
}

/// Presents due reminders through the visual and spoken sinks.
pub struct Dispatcher {
    alert: Arc<dyn AlertSink>,
    speech: Option<Arc<dyn SpeechSink>>,
    gate: Arc<DedupGate>,
}

impl Dispatcher {
    pub fn new(
        alert: Arc<dyn AlertSink>,
        speech: Option<Arc<dyn SpeechSink>>,
        gate: Arc<DedupGate>,
    ) -> Self {
        Self { alert, speech, gate }
    }

    /// Present `reminder`, unless the dedup gate suppresses it.
    ///
    /// Sink failures are logged and swallowed — the lifecycle transition is
    /// the caller's concern either way; due-time correctness does not hinge
    /// on delivery. Returns whether a notification actually fired.
    pub async fn dispatch(&self, reminder: &Reminder, now: DateTime<Utc>) -> bool {
        if !self.gate.try_claim(&reminder.id, now) {
            debug!(
                "reminder {}: notification suppressed by dedup window",
                reminder.id
            );
            return false;
        }

        let title = format!("Reminder: {}", reminder.text);
        let body = format!(
            "Time: {}\n{}",
            reminder.due_time.format("%Y-%m-%d %H:%M"),
            reminder.text
        );
        if let Err(e) = self.alert.alert(&title, &body).await {
            warn!(
                "alert sink '{}' failed for reminder {}: {e}",
                self.alert.name(),
                reminder.id
            );
        }
        if let Some(speech) = &self.speech {
            if let Err(e) = speech.say(&title).await {
                warn!(
                    "speech sink '{}' failed for reminder {}: {e}",
                    speech.name(),
                    reminder.id
                );
            }
        }
        true
    }
}
