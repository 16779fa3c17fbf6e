//! Recipe store - the fixed, in-memory catalogue
//!
//! The catalogue is compiled into the binary as TOML and parsed once at
//! startup. Lookups never fail: a missing id is simply `None`.

use super::recipe::{Recipe, RecipeId};
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashSet;

const EMBEDDED_CATALOGUE: &str = include_str!("../../defaults/recipes.toml");

#[derive(Deserialize)]
struct CatalogueFile {
    #[serde(default)]
    recipes: Vec<Recipe>,
}

/// Read-only recipe catalogue
#[derive(Debug, Clone)]
pub struct RecipeStore {
    recipes: Vec<Recipe>,
}

impl RecipeStore {
    /// Load the catalogue shipped with the binary
    pub fn embedded() -> Result<Self> {
        Self::from_toml(EMBEDDED_CATALOGUE).context("Embedded recipe catalogue is invalid")
    }

    /// Parse and validate a catalogue document
    pub fn from_toml(contents: &str) -> Result<Self> {
        let file: CatalogueFile =
            toml::from_str(contents).context("Failed to parse recipe catalogue")?;
        Self::from_recipes(file.recipes)
    }

    /// Build a store from recipes, checking id and step invariants
    pub fn from_recipes(recipes: Vec<Recipe>) -> Result<Self> {
        let mut seen = HashSet::new();
        for recipe in &recipes {
            if !seen.insert(recipe.id) {
                bail!("Duplicate recipe id {}", recipe.id);
            }
            validate_recipe(recipe)?;
        }

        tracing::debug!("Loaded {} recipes", recipes.len());
        Ok(Self { recipes })
    }

    /// All recipes in catalogue order
    pub fn get_all(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn get_by_id(&self, id: RecipeId) -> Option<&Recipe> {
        self.recipes.iter().find(|recipe| recipe.id == id)
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

fn validate_recipe(recipe: &Recipe) -> Result<()> {
    let mut ingredient_ids = HashSet::new();
    for ingredient in &recipe.ingredients {
        if !ingredient_ids.insert(ingredient.id) {
            bail!(
                "Recipe {} ('{}') has duplicate ingredient id {}",
                recipe.id,
                recipe.title,
                ingredient.id
            );
        }
    }

    // Positions are 1-based and strictly increasing
    let mut previous = 0;
    for step in &recipe.steps {
        if step.position <= previous {
            bail!(
                "Recipe {} ('{}') has step {} out of order (after {})",
                recipe.id,
                recipe.title,
                step.position,
                previous
            );
        }
        previous = step.position;
    }

    Ok(())
}
