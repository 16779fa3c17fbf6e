use super::search_input::SearchInput;
use super::{recipe_details, recipe_list};
use crate::core::{AppCore, Navigation};
use crate::frontend::{Frontend, FrontendEvent};
use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
        Event, KeyEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    widgets::{Block, Paragraph},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

/// TUI Frontend using ratatui
///
/// Renders the recipe screens with ratatui and reads input via crossterm.
/// The search field lives here since it is a widget with its own editing state.
pub struct TuiFrontend {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    poll_timeout: Duration,
    pub search: SearchInput,
    restored: bool,
}

impl TuiFrontend {
    /// Create a new TUI frontend
    ///
    /// Initializes terminal in raw mode, enables mouse capture and bracketed
    /// paste, and enters alternate screen.
    pub fn new() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste
        )
        .context("Failed to setup terminal")?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor()?;

        Ok(Self {
            terminal,
            poll_timeout: Duration::from_millis(16), // ~60 FPS
            search: SearchInput::new(),
            restored: false,
        })
    }

    /// Set poll timeout (for controlling frame rate)
    pub fn set_poll_timeout(&mut self, timeout: Duration) {
        self.poll_timeout = timeout;
    }

    /// Convert crossterm event to FrontendEvent
    fn convert_event(event: Event) -> Option<FrontendEvent> {
        match event {
            Event::Key(key_event) => {
                // Only process key press events (ignore repeats and releases)
                if key_event.kind != KeyEventKind::Press {
                    return None;
                }
                Some(FrontendEvent::Key {
                    code: key_event.code,
                    modifiers: key_event.modifiers,
                })
            }
            Event::Mouse(mouse_event) => Some(FrontendEvent::Mouse {
                kind: mouse_event.kind,
            }),
            Event::Resize(w, h) => Some(FrontendEvent::Resize {
                width: w,
                height: h,
            }),
            Event::Paste(text) => Some(FrontendEvent::Paste { text }),
            _ => None,
        }
    }
}

impl Frontend for TuiFrontend {
    fn poll_events(&mut self) -> Result<Vec<FrontendEvent>> {
        let mut events = Vec::new();

        // First poll waits up to the frame time, the rest drain what is queued
        let mut timeout = self.poll_timeout;
        while event::poll(timeout)? {
            if let Some(frontend_event) = Self::convert_event(event::read()?) {
                events.push(frontend_event);
            }
            timeout = Duration::ZERO;
        }

        Ok(events)
    }

    fn render(&mut self, core: &mut AppCore) -> Result<()> {
        let search = &mut self.search;
        self.terminal.draw(|f| draw(f, core, search))?;
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;

        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            DisableBracketedPaste
        )?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    fn size(&self) -> (u16, u16) {
        let size = self.terminal.size().unwrap_or_default();
        (size.width, size.height)
    }
}

impl Drop for TuiFrontend {
    fn drop(&mut self) {
        // Ensure terminal is restored even if cleanup() wasn't called
        let _ = self.cleanup();
    }
}

/// Whether the list and details are shown side by side
pub fn is_two_column(width: u16, min_width: u16) -> bool {
    width >= min_width
}

/// Draw one frame
pub fn draw(frame: &mut Frame, core: &mut AppCore, search: &mut SearchInput) {
    let area = frame.area();
    frame.render_widget(Block::default().style(core.theme.base()), area);

    let [body, footer] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);

    let in_detail = core.nav.is_detail();
    if is_two_column(area.width, core.config.ui.two_column_min_width) {
        let [left, right] =
            Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
                .areas(body);
        recipe_list::render(frame, left, core, search, !in_detail);
        recipe_details::render(frame, right, core, in_detail);
    } else {
        match core.nav {
            Navigation::List => recipe_list::render(frame, body, core, search, true),
            Navigation::Detail(_) => recipe_details::render(frame, body, core, true),
        }
    }

    render_footer(frame, footer, core);
}

fn render_footer(frame: &mut Frame, area: Rect, core: &AppCore) {
    let hints = match core.nav {
        Navigation::List => "Type to search | ↑↓ Navigate | Enter Open | Ctrl+T Theme | Ctrl+Q Quit",
        Navigation::Detail(_) => {
            "↑↓/jk Scroll | 1-9 Toggle step | e/c Expand/Collapse | Esc Back | Ctrl+Q Quit"
        }
    };
    frame.render_widget(Paragraph::new(hints).style(core.theme.hint()).centered(), area);
}
