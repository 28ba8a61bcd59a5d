use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};

/// How a recurring reminder's due time advances after it fires.
///
/// Serialized externally tagged, so the snapshot file holds `{"days": 1}`,
/// `{"weeks": 2}`, or `{"months": 1}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    Days(u32),
    Weeks(u32),
    Months(u32),
}

impl Recurrence {
    /// Next due instant after `from`.
    ///
    /// Month addition is calendar-aware: the day of month clamps to the
    /// target month's length, so Jan 31 + 1 month lands on Feb 28 (or 29).
    pub fn advance(&self, from: DateTime<Utc>) -> DateTime<Utc> {
        match *self {
            Recurrence::Days(n) => from + Duration::days(i64::from(n)),
            Recurrence::Weeks(n) => from + Duration::weeks(i64::from(n)),
            // Overflow is only possible at the far end of chrono's range;
            // pinning to MAX keeps the due time strictly increasing.
            Recurrence::Months(n) => from
                .checked_add_months(Months::new(n))
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    /// Human phrasing for confirmations: "every day", "every 2 weeks", ...
    pub fn describe(&self) -> String {
        let (n, unit) = match *self {
            Recurrence::Days(n) => (n, "day"),
            Recurrence::Weeks(n) => (n, "week"),
            Recurrence::Months(n) => (n, "month"),
        };
        if n == 1 {
            format!("every {unit}")
        } else {
            format!("every {n} {unit}s")
        }
    }
}

/// A single reminder record.
///
/// Records are owned exclusively by the [`crate::store::ReminderStore`];
/// everything else sees clones handed out under the store's lock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    /// Unique id, derived from the creation instant. Immutable.
    pub id: String,
    /// Normalized content, free of trigger phrases and time expressions.
    pub text: String,
    /// Absolute instant at which the reminder becomes due.
    pub due_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub recurring: bool,
    #[serde(default)]
    pub recurring_interval: Option<Recurrence>,
    #[serde(default)]
    pub last_triggered: Option<DateTime<Utc>>,
}

impl Reminder {
    pub(crate) fn new(
        id: String,
        text: &str,
        due_time: DateTime<Utc>,
        created_at: DateTime<Utc>,
        recurrence: Option<Recurrence>,
    ) -> Self {
        Self {
            id,
            text: text.to_string(),
            due_time,
            created_at,
            completed: false,
            recurring: recurrence.is_some(),
            recurring_interval: recurrence,
            last_triggered: None,
        }
    }

    /// Whether the reminder should fire at `now`.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        !self.completed && self.due_time <= now
    }

    /// Apply the post-fire lifecycle transition: recurring reminders advance
    /// their due time and stay pending, one-shots complete.
    pub(crate) fn fire(&mut self, now: DateTime<Utc>) {
        self.last_triggered = Some(now);
        match self.recurring_interval {
            Some(interval) => {
                self.due_time = interval.advance(self.due_time);
                self.completed = false;
            }
            None => self.completed = true,
        }
    }
}
