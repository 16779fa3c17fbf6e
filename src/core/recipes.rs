//! Recipe list controller
//!
//! Holds the current search query and publishes two pieces of state through
//! `tokio::sync::watch` channels: the visible recipe list and the recipe shown
//! in the detail view. Work runs on spawned tasks and publishes on completion.
//! Nothing is cancelled when superseded, so the last task to finish wins.

use crate::data::{Recipe, RecipeId, RecipeStore};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Default for `search.min_query_chars`
pub const DEFAULT_MIN_QUERY_CHARS: usize = 3;

pub struct RecipesController {
    store: Arc<RecipeStore>,
    min_query_chars: usize,
    query: String,
    recipes: Arc<watch::Sender<Vec<Recipe>>>,
    recipe: Arc<watch::Sender<Option<Recipe>>>,
}

impl RecipesController {
    pub fn new(store: Arc<RecipeStore>, min_query_chars: usize) -> Self {
        let (recipes, _) = watch::channel(Vec::new());
        let (recipe, _) = watch::channel(None);
        Self {
            store,
            min_query_chars,
            query: String::new(),
            recipes: Arc::new(recipes),
            recipe: Arc::new(recipe),
        }
    }

    /// Publish the full catalogue as the visible list
    pub fn fetch_recipes(&self) -> JoinHandle<()> {
        let store = Arc::clone(&self.store);
        let recipes = Arc::clone(&self.recipes);
        tokio::spawn(async move {
            let all = store.get_all().to_vec();
            tracing::debug!("Fetched {} recipes", all.len());
            recipes.send_replace(all);
        })
    }

    /// Store the query and re-derive the visible list from it
    ///
    /// Non-empty queries shorter than `min_query_chars` leave the visible
    /// list as it was.
    pub fn set_query(&mut self, query: impl Into<String>) -> JoinHandle<()> {
        self.query = query.into();

        let store = Arc::clone(&self.store);
        let recipes = Arc::clone(&self.recipes);
        let query = self.query.clone();
        let min_query_chars = self.min_query_chars;
        tokio::spawn(async move {
            match filter_recipes(store.get_all(), &query, min_query_chars) {
                Some(visible) => {
                    tracing::debug!("Query {:?} matched {} recipes", query, visible.len());
                    recipes.send_replace(visible);
                }
                None => {
                    tracing::trace!("Query {:?} too short, visible list unchanged", query);
                }
            }
        })
    }

    /// Look a recipe up and publish it as the current detail recipe
    pub fn select_recipe(&self, id: RecipeId) -> JoinHandle<()> {
        let store = Arc::clone(&self.store);
        let recipe = Arc::clone(&self.recipe);
        tokio::spawn(async move {
            let found = store.get_by_id(id).cloned();
            if found.is_none() {
                tracing::debug!("Recipe {} not found", id);
            }
            recipe.send_replace(found);
        })
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Snapshot of the visible list
    pub fn visible(&self) -> Vec<Recipe> {
        self.recipes.borrow().clone()
    }

    pub fn visible_len(&self) -> usize {
        self.recipes.borrow().len()
    }

    pub fn visible_id_at(&self, index: usize) -> Option<RecipeId> {
        self.recipes.borrow().get(index).map(|recipe| recipe.id)
    }

    /// Snapshot of the current detail recipe
    pub fn current_recipe(&self) -> Option<Recipe> {
        self.recipe.borrow().clone()
    }

    pub fn subscribe_recipes(&self) -> watch::Receiver<Vec<Recipe>> {
        self.recipes.subscribe()
    }

    pub fn subscribe_recipe(&self) -> watch::Receiver<Option<Recipe>> {
        self.recipe.subscribe()
    }
}

/// Derive the visible list for `query`
///
/// Returns `None` when the visible list should be left unchanged.
pub fn filter_recipes(all: &[Recipe], query: &str, min_query_chars: usize) -> Option<Vec<Recipe>> {
    if query.is_empty() {
        return Some(all.to_vec());
    }

    if query.chars().count() < min_query_chars {
        return None;
    }

    Some(
        all.iter()
            .filter(|recipe| recipe.title_matches(query))
            .cloned()
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> RecipesController {
        let store = Arc::new(RecipeStore::embedded().unwrap());
        RecipesController::new(store, DEFAULT_MIN_QUERY_CHARS)
    }

    fn titles(recipes: &[Recipe]) -> Vec<String> {
        recipes.iter().map(|r| r.title.clone()).collect()
    }

    #[tokio::test]
    async fn test_fetch_publishes_full_set() {
        let controller = controller();
        let mut rx = controller.subscribe_recipes();

        controller.fetch_recipes().await.unwrap();

        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 5);
    }

    #[tokio::test]
    async fn test_scenario_ris_then_empty() {
        let mut controller = controller();
        controller.fetch_recipes().await.unwrap();
        let all = titles(&controller.visible());

        controller.set_query("ris").await.unwrap();
        assert_eq!(
            titles(&controller.visible()),
            vec!["Risotto d'asperges sauvages".to_string()]
        );
        assert_eq!(controller.query(), "ris");

        controller.set_query("").await.unwrap();
        assert_eq!(titles(&controller.visible()), all);
    }

    #[tokio::test]
    async fn test_short_query_leaves_visible_unchanged() {
        let mut controller = controller();
        controller.fetch_recipes().await.unwrap();
        controller.set_query("les").await.unwrap();
        let before = controller.visible();
        assert_eq!(before.len(), 1);

        let mut rx = controller.subscribe_recipes();
        controller.set_query("b").await.unwrap();
        assert_eq!(controller.visible(), before);
        controller.set_query("bo").await.unwrap();
        assert_eq!(controller.visible(), before);
        assert!(!rx.has_changed().unwrap());

        // The query itself is still stored
        assert_eq!(controller.query(), "bo");
    }

    #[tokio::test]
    async fn test_select_recipe_publishes_lookup() {
        let controller = controller();
        let mut rx = controller.subscribe_recipe();

        controller.select_recipe(1).await.unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(
            rx.borrow_and_update().as_ref().map(|r| r.title.as_str()),
            Some("Le boeuf bourguignon")
        );

        controller.select_recipe(404).await.unwrap();
        assert!(controller.current_recipe().is_none());
    }

    #[test]
    fn test_filter_matches_exactly_the_titles_containing_query() {
        let store = RecipeStore::embedded().unwrap();
        let all = store.get_all();

        for query in ["ris", "LES", "boeuf", "sauvages", "zzz", "e d"] {
            let visible = filter_recipes(all, query, DEFAULT_MIN_QUERY_CHARS).unwrap();
            let lowered = query.to_lowercase();
            for recipe in all {
                let expected = recipe.title.to_lowercase().contains(&lowered);
                assert_eq!(visible.contains(recipe), expected, "query {:?}", query);
            }
        }
    }

    #[test]
    fn test_filter_preserves_catalogue_order() {
        let store = RecipeStore::embedded().unwrap();
        let visible = filter_recipes(store.get_all(), "les", DEFAULT_MIN_QUERY_CHARS).unwrap();
        assert_eq!(titles(&visible), vec!["Les Nuggets".to_string()]);

        let visible = filter_recipes(store.get_all(), "e", 1).unwrap();
        let ids: Vec<_> = visible.iter().map(|r| r.id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_filter_thresholds() {
        let all = vec![Recipe::new(0, "Abc")];
        assert_eq!(filter_recipes(&all, "", 3), Some(all.clone()));
        assert_eq!(filter_recipes(&all, "a", 3), None);
        assert_eq!(filter_recipes(&all, "ab", 3), None);
        assert_eq!(filter_recipes(&all, "abc", 3), Some(all.clone()));
        // Counted in characters, not bytes
        assert_eq!(filter_recipes(&all, "éé", 3), None);
        assert_eq!(filter_recipes(&all, "a", 1), Some(all));
    }
}
