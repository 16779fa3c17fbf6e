//! Recipeek - terminal recipe browser
//!
//! Browse a fixed recipe catalogue, filter it by title and open a recipe to
//! see its ingredients and preparation steps.

mod config;
mod core;
mod data;
mod frontend;
mod images;
mod theme;

use anyhow::{bail, Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use frontend::{Frontend, FrontendEvent, TuiFrontend};
use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(ClapParser)]
#[command(name = "recipeek")]
#[command(about = "Terminal recipe browser", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Custom data directory (default: ~/.recipeek)
    /// Can also be set via RECIPEEK_DIR environment variable
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Palette to start with (overrides config)
    #[arg(long, value_enum)]
    theme: Option<config::ThemeMode>,

    /// Do not download recipe images
    #[arg(long)]
    no_images: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the recipes matching a query and exit
    List {
        /// Title filter (same rules as the search field)
        #[arg(short, long, default_value = "")]
        query: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print one recipe and exit
    Show {
        /// Recipe id
        id: data::RecipeId,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn init_logging() -> Result<()> {
    // TUI apps can't log to stdout, so we write to a file
    // (use RUST_LOG env var to control level, e.g. RUST_LOG=debug)
    let log_path = config::Config::log_path()?;
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)
            .context(format!("Failed to create data directory: {:?}", parent))?;
    }
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .context(format!("Failed to open log file: {:?}", log_path))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false) // No color codes in log file
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set custom data directory if specified, before anything resolves paths
    if let Some(data_dir) = &cli.data_dir {
        std::env::set_var(config::DATA_DIR_ENV, data_dir);
    }

    init_logging()?;
    if let Some(data_dir) = &cli.data_dir {
        tracing::info!("Using custom data directory: {:?}", data_dir);
    }

    let mut config = if let Some(config_path) = &cli.config {
        config::Config::load_from_path(config_path)?
    } else {
        config::Config::load()?
    };
    if let Some(theme) = cli.theme {
        config.ui.theme = theme;
    }
    if cli.no_images {
        config.images.enabled = false;
    }

    let store = Arc::new(data::RecipeStore::embedded()?);
    if store.is_empty() {
        tracing::warn!("Recipe catalogue is empty");
    } else {
        tracing::info!("Loaded {} recipes", store.len());
    }

    match cli.command {
        Some(Commands::List { query, json }) => {
            print!("{}", list_output(&store, &config, &query, json)?);
            Ok(())
        }
        Some(Commands::Show { id, json }) => {
            print!("{}", recipe_output(&store, id, json)?);
            Ok(())
        }
        None => run_tui(config, store),
    }
}

/// Text (or JSON) printed by `recipeek list`
fn list_output(
    store: &data::RecipeStore,
    config: &config::Config,
    query: &str,
    json: bool,
) -> Result<String> {
    // Starting from the full list, a too-short query leaves it unchanged
    let recipes = crate::core::recipes::filter_recipes(
        store.get_all(),
        query,
        config.search.min_query_chars,
    )
    .unwrap_or_else(|| store.get_all().to_vec());

    if json {
        return Ok(serde_json::to_string_pretty(&recipes)? + "\n");
    }

    let mut out = String::new();
    for recipe in &recipes {
        writeln!(out, "{:>3}  {:<32}  {}", recipe.id, recipe.title, recipe.summary())?;
    }
    Ok(out)
}

/// Text (or JSON) printed by `recipeek show`
fn recipe_output(store: &data::RecipeStore, id: data::RecipeId, json: bool) -> Result<String> {
    let Some(recipe) = store.get_by_id(id) else {
        bail!("No recipe with id {}", id);
    };

    if json {
        return Ok(serde_json::to_string_pretty(recipe)? + "\n");
    }

    let mut out = String::new();
    writeln!(out, "{}", recipe.title)?;
    writeln!(out, "{} • {} pers.", recipe.summary(), recipe.servings)?;
    if !recipe.description.is_empty() {
        writeln!(out, "\n{}", recipe.description)?;
    }
    if !recipe.ingredients.is_empty() {
        writeln!(out, "\nIngrédients")?;
        for ingredient in &recipe.ingredients {
            writeln!(out, "  • {} ({})", ingredient.name, ingredient.quantity_label())?;
        }
    }
    if !recipe.steps.is_empty() {
        writeln!(out, "\nPréparation")?;
        for step in &recipe.steps {
            writeln!(out, "  {}: {}", step.title(), step.description)?;
        }
    }
    Ok(out)
}

/// Run TUI frontend
fn run_tui(config: config::Config, store: Arc<data::RecipeStore>) -> Result<()> {
    // Use tokio runtime for background loading
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async_run_tui(config, store))
}

/// Async TUI main loop
async fn async_run_tui(config: config::Config, store: Arc<data::RecipeStore>) -> Result<()> {
    use crate::core::{AppCore, AppMessage};
    use tokio::sync::mpsc;

    // Channel for background task completions (image loads)
    let (message_tx, mut message_rx) = mpsc::unbounded_channel::<AppMessage>();

    let poll_interval = std::time::Duration::from_millis(config.ui.poll_interval_ms);
    let mut app_core = AppCore::new(config, store, message_tx)?;

    let mut frontend = TuiFrontend::new()?;
    frontend.set_poll_timeout(poll_interval);

    app_core.start();
    let (width, height) = frontend.size();
    tracing::info!("Recipeek started ({}x{})", width, height);

    // Main event loop
    while app_core.running {
        for event in frontend.poll_events()? {
            handle_frontend_event(&mut app_core, &mut frontend, event);
        }

        while let Ok(msg) = message_rx.try_recv() {
            app_core.handle_message(msg);
        }

        app_core.sync();

        if app_core.needs_render {
            frontend.render(&mut app_core)?;
            app_core.needs_render = false;
        }
    }

    frontend.cleanup()?;
    tracing::info!("Recipeek exiting");
    Ok(())
}

/// Route one frontend event to the search field or the app core
fn handle_frontend_event(
    app_core: &mut crate::core::AppCore,
    frontend: &mut TuiFrontend,
    event: FrontendEvent,
) {
    use crossterm::event::MouseEventKind;
    use crate::core::Action;

    match event {
        FrontendEvent::Key { .. } => {
            let Some(key) = event.key_event() else {
                return;
            };
            match crate::core::route_key(key, &app_core.nav) {
                Action::EditQuery => {
                    if let Some(text) = frontend.search.input(key) {
                        app_core.set_query(text);
                    }
                    app_core.needs_render = true;
                }
                Action::ClearQuery => {
                    if frontend.search.clear() {
                        app_core.set_query("");
                    }
                }
                action => app_core.apply(action),
            }
        }
        FrontendEvent::Paste { text } => {
            if app_core.nav.is_detail() {
                return;
            }
            if let Some(query) = frontend.search.paste(&text) {
                app_core.set_query(query);
            }
        }
        FrontendEvent::Mouse { kind } => {
            let action = match (kind, app_core.nav.is_detail()) {
                (MouseEventKind::ScrollUp, true) => Action::ScrollUp(3),
                (MouseEventKind::ScrollDown, true) => Action::ScrollDown(3),
                (MouseEventKind::ScrollUp, false) => Action::MoveUp(1),
                (MouseEventKind::ScrollDown, false) => Action::MoveDown(1),
                _ => Action::None,
            };
            app_core.apply(action);
        }
        FrontendEvent::Resize { width, height } => {
            tracing::debug!("Terminal resized to {}x{}", width, height);
            app_core.needs_render = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> data::RecipeStore {
        data::RecipeStore::embedded().unwrap()
    }

    #[test]
    fn test_list_short_query_prints_everything() {
        let config = config::Config::default();
        let out = list_output(&store(), &config, "ri", false).unwrap();
        assert_eq!(out.lines().count(), 5);
        assert!(out.lines().next().unwrap().contains("Ballotine de dinde automnale"));
    }

    #[test]
    fn test_list_filters_by_title() {
        let config = config::Config::default();
        let out = list_output(&store(), &config, "RIS", false).unwrap();
        assert_eq!(out.lines().count(), 1);
        assert!(out.contains("Risotto d'asperges sauvages"));
        assert!(out.contains("1200 cal • 45 min"));
    }

    #[test]
    fn test_list_json() {
        let config = config::Config::default();
        let out = list_output(&store(), &config, "les", true).unwrap();
        let recipes: Vec<data::Recipe> = serde_json::from_str(&out).unwrap();
        let titles: Vec<&str> = recipes.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Les Nuggets"]);
    }

    #[test]
    fn test_show_recipe() {
        let out = recipe_output(&store(), 0, false).unwrap();
        assert!(out.starts_with("Ballotine de dinde automnale\n"));
        assert!(out.contains("876 cal • 90 min • 1 pers."));
        assert!(out.contains("Ingrédients"));
        assert!(out.contains("  Etape 5: "));
    }

    #[test]
    fn test_show_missing_recipe_fails() {
        let err = recipe_output(&store(), 404, false).unwrap_err();
        assert_eq!(err.to_string(), "No recipe with id 404");
        assert!(recipe_output(&store(), 404, true).is_err());
    }
}
