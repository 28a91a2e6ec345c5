//! Application state.
//!
//! `State` is what the draw loop and the terminal event handler share. It
//! owns the content builder; the form screen only holds it weakly.

mod error;

pub use error::StateError;

use crate::form::FormContentBuilder;
use crate::logger::LogBuffer;
use crate::screen::{FormScreen, ScreenHandle};
use crate::ui::Theme;
use ratatui::layout::Rect;
use std::sync::{Arc, Mutex};

/// Screen type the application runs.
///
pub type AppScreen = FormScreen<FormContentBuilder>;

/// Shared handle to the content builder.
///
pub type BuilderHandle = Arc<Mutex<FormContentBuilder>>;

pub struct State {
    builder: BuilderHandle,
    screen: ScreenHandle<FormContentBuilder>,
    theme: Theme,
    logs: Arc<LogBuffer>,
    show_log: bool,
    terminal_size: Rect,
}

impl State {
    pub fn new(
        builder: BuilderHandle,
        screen: ScreenHandle<FormContentBuilder>,
        logs: Arc<LogBuffer>,
    ) -> Self {
        State {
            builder,
            screen,
            theme: Theme::default(),
            logs,
            show_log: false,
            terminal_size: Rect::default(),
        }
    }

    pub fn screen(&self) -> &ScreenHandle<FormContentBuilder> {
        &self.screen
    }

    /// Run `f` with the screen locked.
    ///
    pub fn with_screen<R>(&self, f: impl FnOnce(&mut AppScreen) -> R) -> Result<R, StateError> {
        let mut screen = self
            .screen
            .lock()
            .map_err(|_| StateError::ScreenLockPoisoned)?;
        Ok(f(&mut screen))
    }

    /// Run `f` with the content builder locked.
    ///
    #[cfg(test)]
    pub fn with_builder<R>(
        &self,
        f: impl FnOnce(&mut FormContentBuilder) -> R,
    ) -> Result<R, StateError> {
        let mut builder = self
            .builder
            .lock()
            .map_err(|_| StateError::BuilderLockPoisoned)?;
        Ok(f(&mut builder))
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Switch to the named theme.
    ///
    pub fn set_theme(&mut self, name: &str) -> Result<(), StateError> {
        self.theme = Theme::from_name(name).ok_or_else(|| StateError::UnknownTheme(name.to_string()))?;
        Ok(())
    }

    pub fn logs(&self) -> &LogBuffer {
        &self.logs
    }

    pub fn is_log_visible(&self) -> bool {
        self.show_log
    }

    pub fn toggle_log(&mut self) {
        self.show_log = !self.show_log;
    }

    pub fn terminal_size(&self) -> Rect {
        self.terminal_size
    }

    pub fn set_terminal_size(&mut self, size: Rect) {
        self.terminal_size = size;
    }

    /// Number of submissions received so far.
    ///
    pub fn submission_count(&self) -> usize {
        self.with_screen(|screen| screen.submissions().len())
            .unwrap_or(0)
    }
}
