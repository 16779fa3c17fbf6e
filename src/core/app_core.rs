use crate::config::Config;
use crate::core::input::Action;
use crate::core::messages::AppMessage;
use crate::core::navigation::Navigation;
use crate::core::recipes::RecipesController;
use crate::data::{Recipe, RecipeId, RecipeStore};
use crate::images::{Bitmap, ImageLoader};
use crate::theme::AppTheme;
use anyhow::Result;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// Per-reference state of an image load
#[derive(Debug, Clone)]
pub enum ImageSlot {
    Loading,
    Ready(Arc<Bitmap>),
    Failed,
}

/// Core application state (frontend-agnostic)
///
/// AppCore owns every piece of mutable UI state: navigation, the recipe list
/// controller, the list cursor, detail scroll and expanded steps, image slots,
/// and the active theme. All of it is mutated from the UI loop only;
/// background work reports back through watch channels (recipes) and the
/// message channel (images).
pub struct AppCore {
    /// Application configuration
    pub config: Config,

    /// Active palette, handed to the renderer every frame
    pub theme: AppTheme,

    /// Which screen is shown
    pub nav: Navigation,

    /// Search query and visible/detail recipe publication
    pub recipes: RecipesController,

    /// Cursor position in the visible list
    pub selected: usize,

    /// Scroll offset of the detail view (clamped by the renderer)
    pub detail_scroll: u16,

    /// Step positions currently shown in full
    pub expanded_steps: HashSet<u32>,

    /// Image loads keyed by image reference
    pub images: HashMap<String, ImageSlot>,

    /// Application running flag
    pub running: bool,

    /// Set whenever something visible changed
    pub needs_render: bool,

    visible_rx: watch::Receiver<Vec<Recipe>>,
    detail_rx: watch::Receiver<Option<Recipe>>,
    loader: Option<ImageLoader>,
    message_tx: mpsc::UnboundedSender<AppMessage>,
}

impl AppCore {
    pub fn new(
        config: Config,
        store: Arc<RecipeStore>,
        message_tx: mpsc::UnboundedSender<AppMessage>,
    ) -> Result<Self> {
        let loader = if config.images.enabled {
            Some(ImageLoader::new(&config.images)?)
        } else {
            tracing::info!("Image loading disabled");
            None
        };

        let recipes = RecipesController::new(store, config.search.min_query_chars);
        let visible_rx = recipes.subscribe_recipes();
        let detail_rx = recipes.subscribe_recipe();

        Ok(Self {
            theme: AppTheme::for_mode(config.ui.theme),
            config,
            nav: Navigation::default(),
            recipes,
            selected: 0,
            detail_scroll: 0,
            expanded_steps: HashSet::new(),
            images: HashMap::new(),
            running: true,
            needs_render: true,
            visible_rx,
            detail_rx,
            loader,
            message_tx,
        })
    }

    /// Kick off the initial catalogue fetch
    pub fn start(&self) -> JoinHandle<()> {
        self.recipes.fetch_recipes()
    }

    /// Execute one routed action
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Quit => {
                tracing::info!("Quit requested");
                self.running = false;
            }
            Action::Cancel => self.nav.cancel(),
            Action::Back => self.nav.back(),
            Action::ToggleTheme => {
                self.theme = AppTheme::for_mode(self.theme.mode.toggled());
                let name = if self.theme.is_dark() { "dark" } else { "light" };
                tracing::debug!("Switched to {} theme", name);
            }
            Action::MoveUp(n) => self.selected = self.selected.saturating_sub(n),
            Action::MoveDown(n) => {
                let last = self.recipes.visible_len().saturating_sub(1);
                self.selected = (self.selected + n).min(last);
            }
            Action::Open => match self.recipes.visible_id_at(self.selected) {
                Some(id) => self.open(id),
                None => return,
            },
            Action::ScrollUp(n) => self.detail_scroll = self.detail_scroll.saturating_sub(n),
            Action::ScrollDown(n) => self.detail_scroll = self.detail_scroll.saturating_add(n),
            Action::ToggleStep(position) => {
                if !self.current_has_step(position) {
                    return;
                }
                if !self.expanded_steps.remove(&position) {
                    self.expanded_steps.insert(position);
                }
            }
            Action::ExpandAllSteps => {
                if let Some(recipe) = self.current_recipe() {
                    self.expanded_steps = recipe.steps.iter().map(|s| s.position).collect();
                }
            }
            Action::CollapseAllSteps => self.expanded_steps.clear(),
            // Search editing goes through the frontend's input widget
            Action::EditQuery | Action::ClearQuery | Action::None => return,
        }
        self.needs_render = true;
    }

    /// Show a recipe's details
    pub fn open(&mut self, id: RecipeId) {
        tracing::debug!("Opening recipe {}", id);
        self.nav.select(id);
        self.recipes.select_recipe(id);
    }

    /// Replace the search query
    pub fn set_query(&mut self, query: impl Into<String>) -> JoinHandle<()> {
        self.selected = 0;
        self.needs_render = true;
        self.recipes.set_query(query)
    }

    /// Pick up state published by background tasks
    ///
    /// Returns true if anything changed.
    pub fn sync(&mut self) -> bool {
        let mut changed = false;

        if self.visible_rx.has_changed().unwrap_or(false) {
            let len = self.visible_rx.borrow_and_update().len();
            self.selected = self.selected.min(len.saturating_sub(1));
            changed = true;
        }

        if self.detail_rx.has_changed().unwrap_or(false) {
            let image_url = self
                .detail_rx
                .borrow_and_update()
                .as_ref()
                .and_then(|recipe| recipe.image_url.clone());
            self.detail_scroll = 0;
            self.expanded_steps.clear();
            if let Some(url) = image_url {
                self.request_image(url);
            }
            changed = true;
        }

        if changed {
            self.needs_render = true;
        }
        changed
    }

    /// Apply a completion from a background task
    pub fn handle_message(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::ImageLoaded { reference, bitmap } => {
                let slot = match bitmap {
                    Some(bitmap) => ImageSlot::Ready(Arc::new(bitmap)),
                    None => ImageSlot::Failed,
                };
                self.images.insert(reference, slot);
                self.needs_render = true;
            }
        }
    }

    /// Start loading an image unless it is already loaded or in flight
    fn request_image(&mut self, reference: String) {
        let Some(loader) = self.loader.clone() else {
            return;
        };
        if self.images.contains_key(&reference) {
            return;
        }

        self.images.insert(reference.clone(), ImageSlot::Loading);
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let bitmap = match loader.load(&reference).await {
                Ok(bitmap) => Some(bitmap),
                Err(e) => {
                    tracing::warn!(error = ?e, "Failed to load image {}", reference);
                    None
                }
            };
            let _ = tx.send(AppMessage::ImageLoaded { reference, bitmap });
        });
    }

    pub fn current_recipe(&self) -> Option<Recipe> {
        self.recipes.current_recipe()
    }

    /// Image slot for a recipe, if one was requested
    pub fn image_for(&self, recipe: &Recipe) -> Option<&ImageSlot> {
        recipe
            .image_url
            .as_ref()
            .and_then(|url| self.images.get(url))
    }

    fn current_has_step(&self, position: u32) -> bool {
        self.current_recipe()
            .map(|recipe| recipe.steps.iter().any(|s| s.position == position))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ThemeMode;
    use crate::data::Step;

    fn core_with(store: RecipeStore, images: bool) -> (AppCore, mpsc::UnboundedReceiver<AppMessage>) {
        let mut config = Config::default();
        config.images.enabled = images;
        let (tx, rx) = mpsc::unbounded_channel();
        let core = AppCore::new(config, Arc::new(store), tx).unwrap();
        (core, rx)
    }

    fn embedded_core() -> AppCore {
        core_with(RecipeStore::embedded().unwrap(), false).0
    }

    async fn open_selected(core: &mut AppCore) {
        let mut rx = core.recipes.subscribe_recipe();
        core.apply(Action::Open);
        rx.changed().await.unwrap();
        core.sync();
    }

    #[tokio::test]
    async fn test_start_publishes_catalogue() {
        let mut core = embedded_core();
        core.start().await.unwrap();
        assert!(core.sync());
        assert_eq!(core.recipes.visible_len(), 5);
        assert!(!core.sync());
    }

    #[tokio::test]
    async fn test_cursor_is_clamped() {
        let mut core = embedded_core();
        core.start().await.unwrap();
        core.sync();

        core.apply(Action::MoveUp(1));
        assert_eq!(core.selected, 0);
        core.apply(Action::MoveDown(100));
        assert_eq!(core.selected, 4);

        core.set_query("ris").await.unwrap();
        core.sync();
        assert_eq!(core.selected, 0);
        core.apply(Action::MoveDown(3));
        assert_eq!(core.selected, 0);
    }

    #[tokio::test]
    async fn test_open_and_escape() {
        let mut core = embedded_core();
        core.start().await.unwrap();
        core.sync();

        core.apply(Action::MoveDown(2));
        open_selected(&mut core).await;
        assert_eq!(core.nav, Navigation::Detail(2));
        assert_eq!(
            core.current_recipe().map(|r| r.title),
            Some("Risotto d'asperges sauvages".to_string())
        );

        core.apply(Action::Cancel);
        assert_eq!(core.nav, Navigation::List);
    }

    #[tokio::test]
    async fn test_open_with_empty_list_does_nothing() {
        let mut core = embedded_core();
        core.start().await.unwrap();
        core.set_query("zzz").await.unwrap();
        core.sync();
        assert_eq!(core.recipes.visible_len(), 0);

        core.apply(Action::Open);
        assert_eq!(core.nav, Navigation::List);
    }

    #[tokio::test]
    async fn test_missing_recipe_gives_empty_detail() {
        let mut core = embedded_core();
        let mut rx = core.recipes.subscribe_recipe();
        core.open(77);
        rx.changed().await.unwrap();
        core.sync();
        assert_eq!(core.nav, Navigation::Detail(77));
        assert!(core.current_recipe().is_none());
    }

    #[tokio::test]
    async fn test_step_toggling() {
        let mut core = embedded_core();
        core.start().await.unwrap();
        core.sync();
        open_selected(&mut core).await;

        core.apply(Action::ToggleStep(2));
        assert!(core.expanded_steps.contains(&2));
        core.apply(Action::ToggleStep(2));
        assert!(!core.expanded_steps.contains(&2));

        // Ballotine has five steps
        core.apply(Action::ToggleStep(9));
        assert!(core.expanded_steps.is_empty());

        core.apply(Action::ExpandAllSteps);
        assert_eq!(core.expanded_steps.len(), 5);
        core.apply(Action::CollapseAllSteps);
        assert!(core.expanded_steps.is_empty());
    }

    #[tokio::test]
    async fn test_new_detail_resets_scroll_and_steps() {
        let mut core = embedded_core();
        core.start().await.unwrap();
        core.sync();
        open_selected(&mut core).await;

        core.apply(Action::ScrollDown(4));
        core.apply(Action::ExpandAllSteps);
        core.apply(Action::Back);
        core.apply(Action::MoveDown(1));
        open_selected(&mut core).await;

        assert_eq!(core.detail_scroll, 0);
        assert!(core.expanded_steps.is_empty());
    }

    #[tokio::test]
    async fn test_toggle_theme_and_quit() {
        let mut core = embedded_core();
        assert_eq!(core.theme.mode, ThemeMode::Light);
        core.apply(Action::ToggleTheme);
        assert_eq!(core.theme.mode, ThemeMode::Dark);

        core.apply(Action::Quit);
        assert!(!core.running);
    }

    #[tokio::test]
    async fn test_image_load_completes_into_slot() {
        use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nuggets.png");
        let mut buf = Vec::new();
        DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb([1, 2, 3])))
            .write_to(&mut std::io::Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        std::fs::write(&path, buf).unwrap();

        let mut recipe = Recipe::new(4, "Les Nuggets");
        recipe.image_url = Some(path.to_string_lossy().into_owned());
        recipe.steps.push(Step {
            position: 1,
            description: "Frire".to_string(),
            prep_time: Some(10),
        });
        let store = RecipeStore::from_recipes(vec![recipe.clone()]).unwrap();

        let (mut core, mut messages) = core_with(store, true);
        core.start().await.unwrap();
        core.sync();
        open_selected(&mut core).await;
        assert!(matches!(core.image_for(&recipe), Some(ImageSlot::Loading)));

        let msg = messages.recv().await.unwrap();
        core.handle_message(msg);
        match core.image_for(&recipe) {
            Some(ImageSlot::Ready(bitmap)) => assert_eq!(bitmap.pixel(0, 0), [1, 2, 3]),
            other => panic!("expected a ready image, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_image_failure_marks_slot_failed() {
        let mut recipe = Recipe::new(0, "Pancakes et fraises");
        recipe.image_url = Some("/definitely/not/here.png".to_string());
        let store = RecipeStore::from_recipes(vec![recipe.clone()]).unwrap();

        let (mut core, mut messages) = core_with(store, true);
        core.start().await.unwrap();
        core.sync();
        open_selected(&mut core).await;

        let msg = messages.recv().await.unwrap();
        core.handle_message(msg);
        assert!(matches!(core.image_for(&recipe), Some(ImageSlot::Failed)));
    }
}
