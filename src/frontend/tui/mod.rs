//! TUI Frontend (ratatui-based)
//!
//! This module implements the Frontend trait using ratatui for terminal rendering.
//! It wraps crossterm for event handling and terminal management.

pub mod app;
pub mod image;
pub mod recipe_details;
pub mod recipe_list;
pub mod search_input;

pub use app::TuiFrontend;
