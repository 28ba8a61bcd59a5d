//! Shared test doubles: a hand-driven clock and instrumented sinks.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use valet_core::error::ValetError;
use valet_core::traits::{AlertSink, Clock, SpeechSink};

pub fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

/// A clock that only moves when told to.
pub struct ManualClock(Mutex<DateTime<Utc>>);

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self(Mutex::new(start))
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

/// Alert sink that records every call.
#[derive(Default)]
pub struct CountingAlert {
    fired: AtomicUsize,
    titles: Mutex<Vec<String>>,
}

impl CountingAlert {
    pub fn fired(&self) -> usize {
        self.fired.load(Ordering::SeqCst)
    }

    pub fn titles(&self) -> Vec<String> {
        self.titles.lock().unwrap().clone()
    }
}

#[async_trait]
impl AlertSink for CountingAlert {
    fn name(&self) -> &str {
        "counting"
    }

    async fn alert(&self, title: &str, _body: &str) -> Result<(), ValetError> {
        self.fired.fetch_add(1, Ordering::SeqCst);
        self.titles.lock().unwrap().push(title.to_string());
        Ok(())
    }
}

/// Alert sink that always fails, like a missing notifier binary.
pub struct FailingAlert;

#[async_trait]
impl AlertSink for FailingAlert {
    fn name(&self) -> &str {
        "failing"
    }

    async fn alert(&self, _title: &str, _body: &str) -> Result<(), ValetError> {
        Err(ValetError::Dispatch("sink unavailable".to_string()))
    }
}

/// Alert sink that takes a while, for exercising stop-while-dispatching.
pub struct SlowAlert {
    delay: StdDuration,
    fired: AtomicUsize,
}

impl SlowAlert {
    pub fn new(delay: StdDuration) -> Self {
        Self {
            delay,
            fired: AtomicUsize::new(0),
        }
    }

    pub fn fired(&self) -> usize {
        self.fired.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AlertSink for SlowAlert {
    fn name(&self) -> &str {
        "slow"
    }

    async fn alert(&self, _title: &str, _body: &str) -> Result<(), ValetError> {
        tokio::time::sleep(self.delay).await;
        self.fired.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Speech sink that counts utterances.
#[derive(Default)]
pub struct CountingSpeech {
    spoken: AtomicUsize,
}

impl CountingSpeech {
    pub fn spoken(&self) -> usize {
        self.spoken.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechSink for CountingSpeech {
    fn name(&self) -> &str {
        "counting-speech"
    }

    async fn say(&self, _text: &str) -> Result<(), ValetError> {
        self.spoken.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
