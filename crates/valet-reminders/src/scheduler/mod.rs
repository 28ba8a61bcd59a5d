//! Background polling loop: fires due reminders and applies lifecycle
//! transitions.
//!
//! One long-lived tokio task per scheduler. `stop()` is cooperative — the
//! shutdown flag is observed at the top of each iteration and at the sleep
//! boundary, and the caller is joined against the task, so no poll runs
//! after `stop()` returns. An in-flight dispatch is never interrupted.


use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};
use valet_core::error::ValetError;
use valet_core::traits::Clock;

use crate::dispatch::Dispatcher;
use crate::store::ReminderStore;

/// Spawn/join bookkeeping shared by the scheduler and the watcher.
#[derive(Default)]
pub(crate) struct LoopState {
    pub(crate) handle: Option<JoinHandle<()>>,
    pub(crate) shutdown: Option<watch::Sender<bool>>,
}

pub struct Scheduler {
    store: Arc<ReminderStore>,
    dispatcher: Arc<Dispatcher>,
    clock: Arc<dyn Clock>,
    poll_interval: Duration,
    error_backoff: Duration,
    state: tokio::sync::Mutex<LoopState>,
}

impl Scheduler {
    pub fn new(
        store: Arc<ReminderStore>,
        dispatcher: Arc<Dispatcher>,
        clock: Arc<dyn Clock>,
        poll_interval: Duration,
        error_backoff: Duration,
    ) -> Self {
        Self {
            store,
            dispatcher,
            clock,
            poll_interval,
            error_backoff,
            state: tokio::sync::Mutex::new(LoopState::default()),
        }
    }

    /// Spawn the polling task. No-op when already running.
    pub async fn start(&self) {
        let mut state = self.state.lock().await;
        if state.handle.is_some() {
            return;
        }
        let (tx, rx) = watch::channel(false);
        let store = self.store.clone();
        let dispatcher = self.dispatcher.clone();
        let clock = self.clock.clone();
        let poll_interval = self.poll_interval;
        let error_backoff = self.error_backoff;
        state.shutdown = Some(tx);
        state.handle = Some(tokio::spawn(async move {
            run_loop(store, dispatcher, clock, poll_interval, error_backoff, rx).await;
        }));
        info!("reminder scheduler started (poll every {poll_interval:?})");
    }

    /// Signal the loop to stop and wait for the in-flight iteration —
    /// including its lifecycle transitions and persistence — to finish.
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
            error!("scheduler task ended abnormally: {e}");
        }
        info!("reminder scheduler stopped");
    }

    pub async fn is_running(&self) -> bool {
        self.state.lock().await.handle.is_some()
    }
}

async fn run_loop(
    store: Arc<ReminderStore>,
    dispatcher: Arc<Dispatcher>,
    clock: Arc<dyn Clock>,
    poll_interval: Duration,
    error_backoff: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    loop {
        if *shutdown.borrow() {
            break;
        }
        let pause = match poll_once(&store, &dispatcher, clock.as_ref()).await {
            Ok(fired) => {
                if fired > 0 {
                    info!("processed {fired} due reminder(s)");
                }
                poll_interval
            }
            Err(e) => {
                error!("reminder poll failed: {e}; backing off");
                error_backoff
            }
        };
        tokio::select! {
            _ = tokio::time::sleep(pause) => {}
            _ = shutdown.changed() => break,
        }
    }
}

/// One poll iteration: dispatch everything due, then apply all lifecycle
/// transitions and persist them as a single batch.
///
/// Transitions apply even when a dispatch was suppressed or its sinks
/// failed — scheduling correctness does not hinge on delivery.
async fn poll_once(
    store: &ReminderStore,
    dispatcher: &Dispatcher,
    clock: &dyn Clock,
) -> Result<usize, ValetError> {
    let due = store.due(clock.now());
    if due.is_empty() {
        return Ok(0);
    }
    let mut fired = Vec::with_capacity(due.len());
    for reminder in &due {
        dispatcher.dispatch(reminder, clock.now()).await;
        fired.push(reminder.id.clone());
    }
    store.settle_fired(&fired, clock.now())
}
