//! Detail screen: image, title card, ingredients and preparation steps

use super::image::{image_rows, HalfBlockImage};
use crate::core::{AppCore, ImageSlot};
use crate::data::Recipe;
use crate::theme::AppTheme;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::collections::HashSet;

/// Lines shown for a collapsed step
const COLLAPSED_STEP_LINES: usize = 3;

pub fn render(frame: &mut Frame, area: Rect, core: &mut AppCore, focused: bool) {
    let theme = core.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Recipe ")
        .border_style(theme.border(focused))
        .style(theme.base());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(recipe) = core.current_recipe() else {
        let message = match core.nav.recipe_id() {
            Some(id) => format!("Recipe {} not found", id),
            None => "Select a recipe".to_string(),
        };
        frame.render_widget(
            Paragraph::new(message)
                .style(theme.hint())
                .alignment(Alignment::Center),
            inner,
        );
        return;
    };

    let image_height = match core.image_for(&recipe) {
        Some(ImageSlot::Ready(bitmap)) => image_rows(bitmap, inner.width, inner.height / 2),
        Some(ImageSlot::Loading) => 1,
        _ => 0,
    };
    let [image_area, body] =
        Layout::vertical([Constraint::Length(image_height), Constraint::Fill(1)]).areas(inner);

    match core.image_for(&recipe) {
        Some(ImageSlot::Ready(bitmap)) => {
            frame.render_widget(HalfBlockImage::new(bitmap), image_area);
        }
        Some(ImageSlot::Loading) => {
            frame.render_widget(
                Paragraph::new("Loading image…")
                    .style(theme.hint())
                    .alignment(Alignment::Center),
                image_area,
            );
        }
        _ => {}
    }

    let lines = detail_lines(&recipe, &core.expanded_steps, &theme, body.width);
    let paragraph = Paragraph::new(lines)
        .style(theme.base())
        .wrap(Wrap { trim: false });

    // Keep the scroll offset within the wrapped content
    let total = paragraph.line_count(body.width).min(u16::MAX as usize) as u16;
    let max_scroll = total.saturating_sub(body.height);
    core.detail_scroll = core.detail_scroll.min(max_scroll);

    frame.render_widget(paragraph.scroll((core.detail_scroll, 0)), body);
}

/// Build the scrollable body of the detail view
pub fn detail_lines(
    recipe: &Recipe,
    expanded: &HashSet<u32>,
    theme: &AppTheme,
    width: u16,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    lines.push(
        Line::from(Span::styled(recipe.title.clone(), theme.heading())).alignment(Alignment::Center),
    );
    lines.push(
        Line::from(Span::styled(recipe.ingredient_count_label(), theme.hint()))
            .alignment(Alignment::Center),
    );
    lines.push(
        Line::from(Span::styled(
            format!("{} • {} pers.", recipe.summary(), recipe.servings),
            theme.hint(),
        ))
        .alignment(Alignment::Center),
    );

    if !recipe.description.is_empty() {
        lines.push(Line::default());
        for paragraph in recipe.description.lines() {
            lines.push(Line::from(Span::styled(paragraph.to_string(), theme.base())));
        }
    }

    if !recipe.ingredients.is_empty() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled("Ingrédients", theme.heading())));
        for ingredient in &recipe.ingredients {
            let mut spans = vec![
                Span::styled("• ", Style::default().fg(theme.main)),
                Span::styled(ingredient.name.clone(), theme.base()),
                Span::styled(format!("  {}", ingredient.quantity_label()), theme.hint()),
            ];
            if let Some(desc) = &ingredient.description {
                spans.push(Span::styled(format!("  ({})", desc), theme.hint()));
            }
            lines.push(Line::from(spans));
        }
    }

    if !recipe.steps.is_empty() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled("Préparation", theme.heading())));

        let step_style = Style::default().fg(theme.text).bg(theme.step_background);
        for step in &recipe.steps {
            let mut title = vec![Span::styled(
                step.title(),
                Style::default().fg(theme.main).add_modifier(Modifier::BOLD),
            )];
            if let Some(minutes) = step.prep_time {
                title.push(Span::styled(format!("  {} min", minutes), theme.hint()));
            }
            lines.push(Line::from(title));

            let text = if expanded.contains(&step.position) {
                step.description.clone()
            } else {
                truncate_to_rows(&step.description, width, COLLAPSED_STEP_LINES)
            };
            lines.push(Line::from(Span::styled(text, step_style)));
            lines.push(Line::default());
        }
    }

    lines
}

/// Cut `text` so it word-wraps into at most `rows` rows at `width`,
/// ending with an ellipsis when cut
pub fn truncate_to_rows(text: &str, width: u16, rows: usize) -> String {
    if width == 0 || wrapped_rows(text, width) <= rows {
        return text.to_string();
    }

    // Longest prefix that still fits once the ellipsis is appended
    let chars: Vec<char> = text.chars().collect();
    let (mut lo, mut hi) = (0, chars.len());
    while lo < hi {
        let mid = (lo + hi).div_ceil(2);
        if wrapped_rows(&with_ellipsis(&chars[..mid]), width) <= rows {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }
    with_ellipsis(&chars[..lo])
}

fn with_ellipsis(chars: &[char]) -> String {
    let prefix: String = chars.iter().collect();
    let mut cut = prefix.trim_end().to_string();
    cut.push('…');
    cut
}

/// Rows `text` takes with the same wrapping the detail body uses
fn wrapped_rows(text: &str, width: u16) -> usize {
    Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .line_count(width)
}
