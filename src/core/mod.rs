//! Core application logic
//!
//! This module contains navigation, the recipe list controller, input routing
//! and the app state that ties them together.
//! NO imports from frontend/ or rendering code.
//! Core publishes state, frontends read and render.

pub mod app_core;
pub mod input;
pub mod messages;
pub mod navigation;
pub mod recipes;

pub use app_core::{AppCore, ImageSlot};
pub use input::{route_key, Action};
pub use messages::AppMessage;
pub use navigation::Navigation;
