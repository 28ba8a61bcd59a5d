//! Spoken output sink — shells out to a text-to-speech command.

use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;
use valet_core::error::ValetError;
use valet_core::traits::SpeechSink;

/// A stuck audio backend must not wedge the dispatch path.
const SPEECH_TIMEOUT: Duration = Duration::from_secs(30);

/// Runs a TTS binary (`say` on macOS, `espeak` on Linux) per utterance.
pub struct CommandSpeech {
    command: String,
}

impl CommandSpeech {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

#[async_trait]
impl SpeechSink for CommandSpeech {
    fn name(&self) -> &str {
        "tts"
    }

    async fn say(&self, text: &str) -> Result<(), ValetError> {
        debug!("speaking via {}: {text}", self.command);
        let run = Command::new(&self.command).arg(text).output();
        let output = tokio::time::timeout(SPEECH_TIMEOUT, run)
            .await
            .map_err(|_| ValetError::Dispatch(format!("{} timed out", self.command)))??;
        if !output.status.success() {
            return Err(ValetError::Dispatch(format!(
                "{} exited with {}",
                self.command, output.status
            )));
        }
        Ok(())
    }
}
