//! Application palette
//!
//! Two built-in palettes (light and dark). The active palette is a plain
//! value owned by the app core and handed to the renderer every frame;
//! switching themes replaces the value.

use crate::config::ThemeMode;
use ratatui::style::{Color, Modifier, Style};

const GREEN: Color = Color::Rgb(0x00, 0xb3, 0x88);
const GREEN_DARK: Color = Color::Rgb(0x00, 0x8a, 0x69);
const BLACK: Color = Color::Rgb(0x12, 0x12, 0x12);
const BLACK_SOFT: Color = Color::Rgb(0x2b, 0x2b, 0x2b);
const WHITE: Color = Color::Rgb(0xff, 0xff, 0xff);
const WHITE_SOFT: Color = Color::Rgb(0xf2, 0xf2, 0xf2);
const GREY_LIGHTER: Color = Color::Rgb(0xec, 0xec, 0xec);
const IRON_GREY: Color = Color::Rgb(0x6f, 0x6f, 0x6f);
const CASAL: Color = Color::Rgb(0x2f, 0x4f, 0x4f);
const BROOKLYN_WHITE: Color = Color::Rgb(0xb8, 0xb8, 0xb8);
const STEP_TINT_LIGHT: Color = Color::Rgb(0xcc, 0xf0, 0xe7);
const STEP_TINT_DARK: Color = Color::Rgb(0x0d, 0x33, 0x2a);

/// Complete palette used by the terminal frontend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppTheme {
    pub mode: ThemeMode,

    pub main: Color,
    pub secondary: Color,
    pub background: Color,
    pub text: Color,
    pub text_hint: Color,
    pub text_field_background: Color,
    pub selection_background: Color,
    pub selection_text: Color,
    pub step_background: Color,
    pub border: Color,
    pub border_focused: Color,
}

impl AppTheme {
    pub fn light() -> Self {
        Self {
            mode: ThemeMode::Light,
            main: GREEN,
            secondary: BLACK_SOFT,
            background: WHITE,
            text: BLACK,
            text_hint: IRON_GREY,
            text_field_background: GREY_LIGHTER,
            selection_background: GREEN_DARK,
            selection_text: WHITE,
            step_background: STEP_TINT_LIGHT,
            border: BROOKLYN_WHITE,
            border_focused: GREEN,
        }
    }

    pub fn dark() -> Self {
        Self {
            mode: ThemeMode::Dark,
            main: GREEN_DARK,
            secondary: WHITE_SOFT,
            background: BLACK,
            text: WHITE,
            text_hint: BROOKLYN_WHITE,
            text_field_background: CASAL,
            selection_background: GREEN,
            selection_text: BLACK,
            step_background: STEP_TINT_DARK,
            border: IRON_GREY,
            border_focused: GREEN,
        }
    }

    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    pub fn is_dark(&self) -> bool {
        self.mode == ThemeMode::Dark
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn hint(&self) -> Style {
        Style::default().fg(self.text_hint).bg(self.background)
    }

    pub fn heading(&self) -> Style {
        self.base().add_modifier(Modifier::BOLD)
    }

    pub fn header_bar(&self) -> Style {
        Style::default()
            .fg(self.text)
            .bg(self.main)
            .add_modifier(Modifier::BOLD)
    }

    pub fn highlight(&self) -> Style {
        Style::default()
            .fg(self.selection_text)
            .bg(self.selection_background)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border(&self, focused: bool) -> Style {
        let color = if focused {
            self.border_focused
        } else {
            self.border
        };
        Style::default().fg(color).bg(self.background)
    }
}

impl Default for AppTheme {
    fn default() -> Self {
        Self::light()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_mode() {
        assert!(!AppTheme::for_mode(ThemeMode::Light).is_dark());
        assert!(AppTheme::for_mode(ThemeMode::Dark).is_dark());
        assert_ne!(AppTheme::light().background, AppTheme::dark().background);
    }

    #[test]
    fn test_focused_border_differs() {
        let theme = AppTheme::dark();
        assert_ne!(theme.border(true), theme.border(false));
    }
}
