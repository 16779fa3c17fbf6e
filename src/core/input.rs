//! Input routing
//!
//! Routes keyboard input to an `Action` based on the current screen:
//! - List view: cursor movement, opening a recipe, editing the search query
//! - Detail view: scrolling, expanding steps, going back
//!
//! A few keys are global (quit, cancel, theme toggle).

use super::navigation::Navigation;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Number of rows moved by PageUp/PageDown
pub const PAGE_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Escape: force the list view
    Cancel,
    /// Leave the detail view
    Back,
    ToggleTheme,
    MoveUp(usize),
    MoveDown(usize),
    /// Open the recipe under the cursor
    Open,
    /// Forward the key to the search input
    EditQuery,
    ClearQuery,
    ScrollUp(u16),
    ScrollDown(u16),
    /// Toggle the step at this 1-based position
    ToggleStep(u32),
    ExpandAllSteps,
    CollapseAllSteps,
    None,
}

/// Route a key event to an Action based on current navigation state
pub fn route_key(key: KeyEvent, nav: &Navigation) -> Action {
    if let Some(action) = route_global(key) {
        return action;
    }

    match nav {
        Navigation::List => route_list(key),
        Navigation::Detail(_) => route_detail(key),
    }
}

fn route_global(key: KeyEvent) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('q') if ctrl => Some(Action::Quit),
        KeyCode::Char('t') if ctrl => Some(Action::ToggleTheme),
        KeyCode::Esc => Some(Action::Cancel),
        _ => None,
    }
}

fn route_list(key: KeyEvent) -> Action {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Up => Action::MoveUp(1),
        KeyCode::Down => Action::MoveDown(1),
        KeyCode::PageUp => Action::MoveUp(PAGE_SIZE),
        KeyCode::PageDown => Action::MoveDown(PAGE_SIZE),
        KeyCode::Enter => Action::Open,
        KeyCode::Char('u') if ctrl => Action::ClearQuery,
        KeyCode::Char(_) if !ctrl && !alt => Action::EditQuery,
        KeyCode::Backspace
        | KeyCode::Delete
        | KeyCode::Left
        | KeyCode::Right
        | KeyCode::Home
        | KeyCode::End => Action::EditQuery,
        _ => Action::None,
    }
}

fn route_detail(key: KeyEvent) -> Action {
    if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return Action::None;
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Action::ScrollUp(1),
        KeyCode::Down | KeyCode::Char('j') => Action::ScrollDown(1),
        KeyCode::PageUp => Action::ScrollUp(PAGE_SIZE as u16 * 2),
        KeyCode::PageDown => Action::ScrollDown(PAGE_SIZE as u16 * 2),
        KeyCode::Char(c @ '1'..='9') => Action::ToggleStep(c as u32 - '0' as u32),
        KeyCode::Char('e') => Action::ExpandAllSteps,
        KeyCode::Char('c') => Action::CollapseAllSteps,
        KeyCode::Backspace | KeyCode::Left | KeyCode::Char('q') => Action::Back,
        _ => Action::None,
    }
}
