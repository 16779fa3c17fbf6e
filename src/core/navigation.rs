//! Screen navigation
//!
//! Two states only: the recipe list, or the details of one recipe. There is
//! no history beyond the single step back to the list.

use crate::data::RecipeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Navigation {
    #[default]
    List,
    Detail(RecipeId),
}

impl Navigation {
    /// Open a recipe. From `Detail` this replaces the shown recipe.
    pub fn select(&mut self, id: RecipeId) {
        *self = Navigation::Detail(id);
    }

    /// Leave the detail view
    pub fn back(&mut self) {
        if let Navigation::Detail(_) = self {
            *self = Navigation::List;
        }
    }

    /// Escape hatch: always lands on the list
    pub fn cancel(&mut self) {
        *self = Navigation::List;
    }

    pub fn is_detail(&self) -> bool {
        matches!(self, Navigation::Detail(_))
    }

    pub fn recipe_id(&self) -> Option<RecipeId> {
        match self {
            Navigation::List => None,
            Navigation::Detail(id) => Some(*id),
        }
    }
}
