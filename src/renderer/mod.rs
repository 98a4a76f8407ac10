//! Rendering module

pub mod terminal;

pub use terminal::TerminalRenderer;
