//! Frontend abstraction layer
//!
//! This module defines the `Frontend` trait the terminal frontend implements.
//! It provides a unified interface for event polling, rendering, and cleanup.

pub mod events;
pub mod tui;

use crate::core::AppCore;
use anyhow::Result;
pub use events::FrontendEvent;
pub use tui::TuiFrontend;

/// Frontend trait - separates rendering concerns from application logic
pub trait Frontend {
    /// Poll for user input events
    ///
    /// Returns all pending events (keyboard, mouse, resize, etc.) converted to
    /// the frontend-agnostic `FrontendEvent` enum, or an empty list.
    fn poll_events(&mut self) -> Result<Vec<FrontendEvent>>;

    /// Render the current application state
    ///
    /// Takes a mutable reference because rendering clamps some view state
    /// (e.g. the detail scroll offset) to what actually fits.
    fn render(&mut self, core: &mut AppCore) -> Result<()>;

    /// Restore the terminal before exit
    fn cleanup(&mut self) -> Result<()>;

    /// Current terminal size as `(width, height)`
    fn size(&self) -> (u16, u16);
}
