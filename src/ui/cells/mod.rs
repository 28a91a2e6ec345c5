//! Cell renderers.
//!
//! One cell type per item variant, plus an inert fallback:
//! - `TextCell`: single-line text input emitting `(value, position)`
//! - `DateCell`: keyboard date picker emitting `(value, position)`
//! - `ButtonCell`: emits a tap on Enter/Space
//! - `EmptyCell`: renders nothing and accepts no input

mod button;
mod date;
mod empty;
mod text;

pub use button::ButtonCell;
pub use date::DateCell;
pub use empty::EmptyCell;
pub use text::TextCell;

use super::diffable::ReusableCell;
use super::theme::Theme;
use super::Frame;
use crate::form::ComponentKind;
use crossterm::event::KeyEvent;
use ratatui::layout::Rect;

/// Render-time state of a cell.
///
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellState {
    pub focused: bool,
    pub transitioning: bool,
}

/// A live cell of any kind.
///
pub enum FormCell {
    Text(TextCell),
    Date(DateCell),
    Button(ButtonCell),
    Empty(EmptyCell),
}

impl FormCell {
    /// Kind of item this cell renders. The fallback reports `Unsupported`.
    ///
    pub fn kind(&self) -> ComponentKind {
        match self {
            FormCell::Text(_) => ComponentKind::Text,
            FormCell::Date(_) => ComponentKind::Date,
            FormCell::Button(_) => ComponentKind::Button,
            FormCell::Empty(_) => ComponentKind::Unsupported,
        }
    }

    /// Offer a key to the cell. Returns whether the cell consumed it.
    ///
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match self {
            FormCell::Text(cell) => cell.handle_key(key),
            FormCell::Date(cell) => cell.handle_key(key),
            FormCell::Button(cell) => cell.handle_key(key),
            FormCell::Empty(_) => false,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, state: CellState, theme: &Theme) {
        match self {
            FormCell::Text(cell) => cell.render(frame, area, state, theme),
            FormCell::Date(cell) => cell.render(frame, area, state, theme),
            FormCell::Button(cell) => cell.render(frame, area, state, theme),
            FormCell::Empty(cell) => cell.render(frame, area),
        }
    }
}

impl ReusableCell for FormCell {
    fn prepare_for_reuse(&mut self) {
        match self {
            FormCell::Text(cell) => cell.prepare_for_reuse(),
            FormCell::Date(cell) => cell.prepare_for_reuse(),
            FormCell::Button(cell) => cell.prepare_for_reuse(),
            FormCell::Empty(cell) => cell.prepare_for_reuse(),
        }
    }
}
