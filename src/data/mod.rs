//! Data layer - Pure state without UI coupling
//!
//! This module contains the recipe records and the catalogue that serves them.
//! NO imports from frontend/ or any rendering code.

pub mod recipe;
pub mod store;

pub use recipe::*;
pub use store::RecipeStore;
