use crate::error::ValetError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Visual alert sink — shows a due reminder to the user.
///
/// Implementations are thin wrappers over an OS or terminal facility
/// (toast, modal, styled stdout). The engine never cares which.
#[async_trait]
pub trait AlertSink: Send + Sync {
    /// Human-readable sink name.
    fn name(&self) -> &str;

    /// Present an alert with a title and body.
    async fn alert(&self, title: &str, body: &str) -> Result<(), ValetError>;
}

/// Spoken output sink — renders a line of text as audio.
#[async_trait]
pub trait SpeechSink: Send + Sync {
    /// Human-readable sink name.
    fn name(&self) -> &str;

    /// Speak the given text. Returns once playback has been handed off.
    async fn say(&self, text: &str) -> Result<(), ValetError>;
}

/// Wall-clock time source.
///
/// The scheduler, store, and dispatcher take their notion of "now" from here
/// so tests can drive time explicitly.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
