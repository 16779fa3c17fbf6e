//! Recipe records as loaded from the catalogue.
//!
//! These are plain data: no rendering, no I/O. Frontends and the CLI format
//! them through the small display helpers defined here.

use serde::{Deserialize, Serialize};

/// Stable recipe identifier
pub type RecipeId = u32;

/// A recipe in the catalogue (immutable once loaded)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub calories: u32,
    /// Cooking time in minutes
    #[serde(default)]
    pub cooking_time: u32,
    #[serde(default = "default_servings")]
    pub servings: u32,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// An ingredient line owned by a single recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity_unit: Option<String>,
    #[serde(default = "default_icon")]
    pub icon: String,
}

/// A preparation step (positions are 1-based)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub position: u32,
    pub description: String,
    /// Preparation time estimate in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prep_time: Option<u32>,
}

fn default_servings() -> u32 {
    1
}

fn default_icon() -> String {
    "ic_ingredient.png".to_string()
}

impl Recipe {
    /// Create a recipe with only an id and a title (other fields defaulted)
    #[cfg(test)]
    pub fn new(id: RecipeId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            image_url: None,
            calories: 0,
            cooking_time: 0,
            servings: default_servings(),
            ingredients: Vec::new(),
            steps: Vec::new(),
        }
    }

    /// "876 cal • 90 min"
    pub fn summary(&self) -> String {
        format!("{} cal • {} min", self.calories, self.cooking_time)
    }

    /// "5 ingrédients"
    pub fn ingredient_count_label(&self) -> String {
        format!("{} ingrédients", self.ingredients.len())
    }

    /// Case-insensitive substring match on the title
    pub fn title_matches(&self, query: &str) -> bool {
        self.title.to_lowercase().contains(&query.to_lowercase())
    }
}

impl Ingredient {
    /// "300 g", or just "2" when there is no unit
    pub fn quantity_label(&self) -> String {
        match &self.quantity_unit {
            Some(unit) => format!("{} {}", self.quantity, unit),
            None => self.quantity.to_string(),
        }
    }
}

impl Step {
    pub fn title(&self) -> String {
        format!("Etape {}", self.position)
    }
}
