//! Desktop alert sink — shells out to a notifier command.

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;
use valet_core::error::ValetError;
use valet_core::traits::AlertSink;

/// Runs a notifier binary (`notify-send` on Linux, or anything with the
/// same `<cmd> <title> <body>` shape) per alert.
pub struct DesktopAlert {
    command: String,
}

impl DesktopAlert {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

#[async_trait]
impl AlertSink for DesktopAlert {
    fn name(&self) -> &str {
        "desktop"
    }

    async fn alert(&self, title: &str, body: &str) -> Result<(), ValetError> {
        debug!("desktop alert via {}: {title}", self.command);
        let output = Command::new(&self.command)
            .arg(title)
            .arg(body)
            .output()
            .await?;
        if !output.status.success() {
            return Err(ValetError::Dispatch(format!(
                "{} exited with {}",
                self.command, output.status
            )));
        }
        Ok(())
    }
}
