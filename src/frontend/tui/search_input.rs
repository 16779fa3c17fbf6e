//! Single-line search field backed by tui-textarea

use crate::theme::AppTheme;
use crossterm::event::KeyEvent;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders},
    Frame,
};
use tui_textarea::TextArea;

const PLACEHOLDER: &str = "Search for recipes";

pub struct SearchInput {
    textarea: TextArea<'static>,
}

impl SearchInput {
    pub fn new() -> Self {
        let mut textarea = TextArea::default();
        textarea.set_placeholder_text(PLACEHOLDER);
        textarea.set_cursor_line_style(Style::default());
        Self { textarea }
    }

    pub fn text(&self) -> String {
        self.textarea.lines().join("")
    }

    /// Feed a key to the field; returns the new text if it changed
    pub fn input(&mut self, key: KeyEvent) -> Option<String> {
        let before = self.text();
        self.textarea.input(key);
        let after = self.text();
        (after != before).then_some(after)
    }

    /// Insert pasted text (newlines dropped); returns the new text if it changed
    pub fn paste(&mut self, text: &str) -> Option<String> {
        let flat: String = text.chars().filter(|c| *c != '\n' && *c != '\r').collect();
        if flat.is_empty() {
            return None;
        }
        self.textarea.insert_str(flat);
        Some(self.text())
    }

    /// Empty the field; returns true if there was anything to clear
    pub fn clear(&mut self) -> bool {
        if self.text().is_empty() {
            return false;
        }
        *self = Self::new();
        true
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &AppTheme, focused: bool) {
        let field = Style::default()
            .fg(theme.text)
            .bg(theme.text_field_background);

        self.textarea.set_style(field);
        self.textarea
            .set_placeholder_style(Style::default().fg(theme.text_hint).bg(theme.text_field_background));
        self.textarea.set_cursor_style(if focused {
            field.add_modifier(Modifier::REVERSED)
        } else {
            field
        });
        self.textarea.set_block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Search ")
                .border_style(theme.border(focused))
                .style(field),
        );

        frame.render_widget(&self.textarea, area);
    }
}

impl Default for SearchInput {
    fn default() -> Self {
        Self::new()
    }
}
