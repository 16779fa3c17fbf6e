//! Home screen: title bar, search field and the visible recipes

use super::search_input::SearchInput;
use crate::core::AppCore;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

pub fn render(
    frame: &mut Frame,
    area: Rect,
    core: &AppCore,
    search: &mut SearchInput,
    focused: bool,
) {
    let theme = core.theme;
    let [header, search_area, list_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Fill(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(" RECIPEEK").style(theme.header_bar()),
        header,
    );

    search.render(frame, search_area, &theme, focused);

    let visible = core.recipes.visible();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Recipes ({}) ", visible.len()))
        .border_style(theme.border(focused))
        .style(theme.base());

    if visible.is_empty() {
        let message = if core.recipes.query().is_empty() {
            "No recipes".to_string()
        } else {
            format!("No recipes match \"{}\"", core.recipes.query())
        };
        frame.render_widget(
            Paragraph::new(message).style(theme.hint()).block(block),
            list_area,
        );
        return;
    }

    let items: Vec<ListItem> = visible
        .iter()
        .map(|recipe| {
            ListItem::new(vec![
                Line::from(Span::styled(
                    recipe.title.clone(),
                    theme.base().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(recipe.summary(), theme.hint())),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(theme.highlight())
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(core.selected.min(visible.len() - 1)));
    frame.render_stateful_widget(list, list_area, &mut state);
}
