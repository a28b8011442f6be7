//! Application controller.
//!
//! This module orchestrates the main application loop:
//! - Terminal initialization and cleanup (raw mode, alternate screen,
//!   mouse capture)
//! - Event polling and handling
//! - Notification expiry and rendering

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::info;
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::clipboard::Clipboard;
use crate::event::{apply_action, handle_event, poll_event};
use crate::model::AppState;
use crate::ui::glyphs::Glyphs;
use crate::ui::render;

/// The main application controller.
pub struct App {
    /// Terminal backend
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application state
    state: AppState,
    /// Where finalized selections are copied
    clipboard: Box<dyn Clipboard>,
    /// Glyph set for markers and separators
    glyphs: Glyphs,
    /// Event poll timeout
    tick_rate: Duration,
}

impl App {
    /// Creates a new application with the given state.
    pub fn new(state: AppState, clipboard: Box<dyn Clipboard>, glyphs: Glyphs) -> Result<Self> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            state,
            clipboard,
            glyphs,
            tick_rate: Duration::from_millis(50),
        })
    }

    /// Runs the main application loop.
    pub fn run(&mut self) -> Result<()> {
        let size = self.terminal.size()?;
        self.state.set_terminal_size(size.width, size.height);
        info!("started on a {}x{} terminal", size.width, size.height);

        loop {
            self.state.expire_notification(Instant::now());

            // Render
            self.terminal.draw(|frame| {
                render(frame, &self.state, &self.glyphs);
            })?;

            // Handle events
            if let Some(event) = poll_event(self.tick_rate) {
                let action = handle_event(event, &self.state);
                if !apply_action(&mut self.state, action, self.clipboard.as_mut(), Instant::now()) {
                    break;
                }
            }
        }

        info!("quit");
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        // Restore terminal
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        let _ = self.terminal.show_cursor();
    }
}

/// Convenience function to run the application.
pub fn run_app(state: AppState, clipboard: Box<dyn Clipboard>, glyphs: Glyphs) -> Result<()> {
    let mut app = App::new(state, clipboard, glyphs)?;
    app.run()
}
