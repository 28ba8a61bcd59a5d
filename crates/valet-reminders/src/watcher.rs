//! Tray-style secondary observer.
//!
//! Polls the store for due reminders on its own cadence and surfaces them
//! through the visual sink. The shared [`DedupGate`] keeps it from repeating
//! anything the scheduler already announced (and vice versa). It never
//! touches reminder state — lifecycle transitions belong to the scheduler
//! loop alone.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{error, info, warn};
use valet_core::traits::{AlertSink, Clock};

use crate::dispatch::DedupGate;
use crate::scheduler::LoopState;
use crate::store::ReminderStore;

pub struct Watcher {
    store: Arc<ReminderStore>,
    alert: Arc<dyn AlertSink>,
    gate: Arc<DedupGate>,
    clock: Arc<dyn Clock>,
    poll_interval: Duration,
    state: tokio::sync::Mutex<LoopState>,
}

impl Watcher {
    pub fn new(
        store: Arc<ReminderStore>,
        alert: Arc<dyn AlertSink>,
        gate: Arc<DedupGate>,
        clock: Arc<dyn Clock>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            store,
            alert,
            gate,
            clock,
            poll_interval,
            state: tokio::sync::Mutex::new(LoopState::default()),
        }
    }

    /// Spawn the watcher task. No-op when already running.
    pub async fn start(&self) {
        let mut state = self.state.lock().await;
        if state.handle.is_some() {
            return;
        }
        let (tx, rx) = watch::channel(false);
        let store = self.store.clone();
        let alert = self.alert.clone();
        let gate = self.gate.clone();
        let clock = self.clock.clone();
        let poll_interval = self.poll_interval;
        state.shutdown = Some(tx);
        state.handle = Some(tokio::spawn(async move {
            run_loop(store, alert, gate, clock, poll_interval, rx).await;
        }));
        info!("reminder watcher started (poll every {poll_interval:?})");
    }

    /// Signal the watcher to stop and wait for the in-flight pass to finish.
    pub async fn stop(&self) {
        let (handle, shutdown) = {
            let mut state = self.state.lock().await;
            (state.handle.take(), state.shutdown.take())
        };
        let Some(handle) = handle else { return };
        if let Some(tx) = shutdown {
            let _ = tx.send(true);
        }
        if let Err(e) = handle.await {
            error!("watcher task ended abnormally: {e}");
        }
        info!("reminder watcher stopped");
    }
}

async fn run_loop(
    store: Arc<ReminderStore>,
    alert: Arc<dyn AlertSink>,
    gate: Arc<DedupGate>,
    clock: Arc<dyn Clock>,
    poll_interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    loop {
        if *shutdown.borrow() {
            break;
        }
        let now = clock.now();
        for reminder in store.due(now) {
            if !gate.try_claim(&reminder.id, now) {
                continue;
            }
            if let Err(e) = alert.alert("⏰ Reminder", &reminder.text).await {
                warn!(
                    "watcher: alert sink '{}' failed for reminder {}: {e}",
                    alert.name(),
                    reminder.id
                );
            }
        }
        tokio::select! {
            _ = tokio::time::sleep(poll_interval) => {}
            _ = shutdown.changed() => break,
        }
    }
}
