//! Platform layer
//!
//! Terminal-specific plumbing:
//! - Input events (keyboard, resize)
//! - Raw mode / alternate screen lifecycle
//! - End-of-session report

pub mod input;
pub mod terminal;

pub use input::{map_event, spawn_input_thread};
pub use terminal::{ConsoleSink, TerminalGuard};
