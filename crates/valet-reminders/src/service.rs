//! Command-facing reminder API — the surface the rest of the assistant
//! calls.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use valet_core::error::ValetError;
use valet_core::traits::Clock;

use crate::model::{Recurrence, Reminder};
use crate::parse;
use crate::store::ReminderStore;

pub struct ReminderService {
    store: Arc<ReminderStore>,
    clock: Arc<dyn Clock>,
}

impl ReminderService {
    pub fn new(store: Arc<ReminderStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Parse a natural-language request and store the result.
    ///
    /// `Ok(None)` means the text held nothing to remind about — callers
    /// should ask the user to rephrase, not treat it as an error.
    pub fn add_from_text(&self, raw: &str) -> Result<Option<Reminder>, ValetError> {
        let now = self.clock.now();
        let Some(parsed) = parse::parse(raw, now) else {
            return Ok(None);
        };
        self.store
            .add(&parsed.text, parsed.due_time, parsed.recurrence, now)
            .map(Some)
    }

    /// Store a reminder with explicit fields, bypassing the parser.
    ///
    /// Past due times are accepted here; such a reminder simply surfaces on
    /// the very next poll.
    pub fn add_structured(
        &self,
        text: &str,
        due_time: DateTime<Utc>,
        recurrence: Option<Recurrence>,
    ) -> Result<Reminder, ValetError> {
        self.store.add(text, due_time, recurrence, self.clock.now())
    }

    pub fn cancel(&self, id: &str) -> Result<bool, ValetError> {
        self.store.remove(id)
    }

    pub fn upcoming(&self, limit: usize) -> Vec<Reminder> {
        self.store.upcoming(limit)
    }

    pub fn due_now(&self) -> Vec<Reminder> {
        self.store.due(self.clock.now())
    }

    /// Confirmation line echoed back after a successful add, e.g.
    /// "I'll remind you to call mom every day at 3:00 PM on Tuesday, January 2."
    pub fn confirmation(reminder: &Reminder) -> String {
        let when = format_due(reminder.due_time);
        match reminder.recurring_interval {
            Some(interval) => format!(
                "I'll remind you to {} {} at {when}.",
                reminder.text,
                interval.describe()
            ),
            None => format!("I'll remind you to {} at {when}.", reminder.text),
        }
    }
}

/// "3:00 PM on Tuesday, January 2" — the assistant's spoken-style timestamp.
pub fn format_due(due: DateTime<Utc>) -> String {
    due.format("%-I:%M %p on %A, %B %-d").to_string()
}
