//! # valet-reminders
//!
//! The reminder scheduling and notification engine: natural-language time
//! extraction, the durable snapshot store, the polling scheduler loop, and
//! dedup-guarded notification dispatch.

pub mod dispatch;
pub mod model;
pub mod parse;
pub mod scheduler;
pub mod service;
pub mod store;
pub mod watcher;

#[cfg(test)]
pub(crate) mod testutil;

pub use model::{Recurrence, Reminder};
pub use service::ReminderService;
pub use store::ReminderStore;
