//! # valet-notify
//!
//! Alert and speech sink implementations for Valet. All of them are thin
//! wrappers — the terminal, a desktop notifier binary, a text-to-speech
//! binary — behind the seams defined in `valet-core`.

pub mod console;
pub mod desktop;
pub mod speech;

pub use console::ConsoleAlert;
pub use desktop::DesktopAlert;
pub use speech::CommandSpeech;
