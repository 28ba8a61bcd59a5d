//! Console alert sink — prints alerts to stdout.

use async_trait::async_trait;
use valet_core::error::ValetError;
use valet_core::traits::AlertSink;

/// Writes alerts as indented stdout blocks. Works everywhere, which makes it
/// the default backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleAlert;

#[async_trait]
impl AlertSink for ConsoleAlert {
    fn name(&self) -> &str {
        "console"
    }

    async fn alert(&self, title: &str, body: &str) -> Result<(), ValetError> {
        println!("\n⏰ {title}");
        for line in body.lines() {
            println!("   {line}");
        }
        Ok(())
    }
}
