//! TUI module for interactive browsing.
//!
//! Uses `ratatui` + `crossterm` for rendering.

mod browser;
/// Browser state types.
pub mod state;
mod ui;

pub use browser::{BrowserSettings, run_browser};
