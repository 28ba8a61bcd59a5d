//! JSON-snapshot reminder store.
//!
//! An in-memory map of id → [`Reminder`], mirrored to a pretty-printed JSON
//! file after every mutation. Snapshots are written to a temp path and
//! renamed into place, so the file on disk is never half-written. Every
//! operation — mutating or scanning — serializes through one store-scoped
//! lock.


use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use valet_core::error::ValetError;

use crate::model::{Recurrence, Reminder};

pub struct ReminderStore {
    path: PathBuf,
    inner: Mutex<BTreeMap<String, Reminder>>,
}

impl ReminderStore {
    /// Open the store, loading any existing snapshot.
    ///
    /// A missing file yields an empty store. A corrupt or unreadable file is
    /// logged and treated as empty rather than refusing to boot.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let reminders = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<BTreeMap<String, Reminder>>(&content) {
                Ok(map) => map,
                Err(e) => {
                    warn!(
                        "reminder snapshot at {} is corrupt, starting empty: {e}",
                        path.display()
                    );
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                warn!(
                    "failed to read reminder snapshot at {}: {e}",
                    path.display()
                );
                BTreeMap::new()
            }
        };
        if !reminders.is_empty() {
            info!(
                "loaded {} reminder(s) from {}",
                reminders.len(),
                path.display()
            );
        }
        Self {
            path,
            inner: Mutex::new(reminders),
        }
    }

    /// Insert a new reminder and persist. Returns the stored record.
    pub fn add(
        &self,
        text: &str,
        due_time: DateTime<Utc>,
        recurrence: Option<Recurrence>,
        now: DateTime<Utc>,
    ) -> Result<Reminder, ValetError> {
        let mut map = self.lock();
        let id = allocate_id(&map, now);
        let reminder = Reminder::new(id.clone(), text, due_time, now, recurrence);
        map.insert(id, reminder.clone());
        self.persist(&map)?;
        Ok(reminder)
    }

    /// Delete a reminder. Returns whether a record existed.
    pub fn remove(&self, id: &str) -> Result<bool, ValetError> {
        let mut map = self.lock();
        if map.remove(id).is_none() {
            return Ok(false);
        }
        self.persist(&map)?;
        Ok(true)
    }

    /// Mark a reminder completed. Idempotent: a second call is a no-op and
    /// leaves `last_triggered` untouched. Returns whether a record existed.
    pub fn mark_completed(&self, id: &str, now: DateTime<Utc>) -> Result<bool, ValetError> {
        let mut map = self.lock();
        let Some(reminder) = map.get_mut(id) else {
            return Ok(false);
        };
        if reminder.completed {
            return Ok(true);
        }
        reminder.completed = true;
        reminder.last_triggered = Some(now);
        self.persist(&map)?;
        Ok(true)
    }

    pub fn get(&self, id: &str) -> Option<Reminder> {
        self.lock().get(id).cloned()
    }

    /// Pending reminders sorted by ascending due time, capped at `limit`.
    pub fn upcoming(&self, limit: usize) -> Vec<Reminder> {
        let map = self.lock();
        let mut pending: Vec<Reminder> = map.values().filter(|r| !r.completed).cloned().collect();
        pending.sort_by_key(|r| r.due_time);
        pending.truncate(limit);
        pending
    }

    /// All reminders due at `now`.
    pub fn due(&self, now: DateTime<Utc>) -> Vec<Reminder> {
        self.lock()
            .values()
            .filter(|r| r.is_due(now))
            .cloned()
            .collect()
    }

    /// Apply post-fire lifecycle transitions for one scheduler batch —
    /// recurring reminders advance, one-shots complete — and persist once.
    pub fn settle_fired(&self, ids: &[String], now: DateTime<Utc>) -> Result<usize, ValetError> {
        let mut map = self.lock();
        let mut settled = 0;
        for id in ids {
            if let Some(reminder) = map.get_mut(id) {
                reminder.fire(now);
                settled += 1;
            }
        }
        if settled > 0 {
            self.persist(&map)?;
        }
        Ok(settled)
    }

    /// (pending, completed) counts for status display.
    pub fn counts(&self) -> (usize, usize) {
        let map = self.lock();
        let completed = map.values().filter(|r| r.completed).count();
        (map.len() - completed, completed)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, Reminder>> {
        // Poisoning only marks the lock; keep serving the map.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Write the full snapshot: temp file first, then an atomic rename.
    fn persist(&self, map: &BTreeMap<String, Reminder>) -> Result<(), ValetError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| ValetError::Storage(format!("failed to create data dir: {e}")))?;
            }
        }
        let json = serde_json::to_string_pretty(map)?;
        let mut tmp = self.path.as_os_str().to_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, json)
            .map_err(|e| ValetError::Storage(format!("failed to write {}: {e}", tmp.display())))?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            ValetError::Storage(format!("failed to replace {}: {e}", self.path.display()))
        })?;
        Ok(())
    }
}

/// Ids derive from the creation instant at millisecond resolution, bumped
/// under the store lock until unique — two reminders created in the same
/// instant never collide, in-process or across restarts.
fn allocate_id(map: &BTreeMap<String, Reminder>, created_at: DateTime<Utc>) -> String {
    let mut stamp = created_at.timestamp_millis();
    loop {
        let id = stamp.to_string();
        if !map.contains_key(&id) {
            return id;
        }
        stamp += 1;
    }
}
