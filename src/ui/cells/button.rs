use super::CellState;
use crate::form::ButtonData;
use crate::reactive::{Observable, Subject};
use crate::ui::theme::Theme;
use crate::ui::widgets::styling;
use crate::ui::Frame;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    text::Span,
    widgets::{Block, Borders, Paragraph},
};

/// Push button. Enter or Space emits a tap.
///
pub struct ButtonCell {
    title: String,
    taps: Subject<()>,
}

impl ButtonCell {
    pub fn new() -> Self {
        ButtonCell {
            title: String::new(),
            taps: Subject::new(),
        }
    }

    pub fn taps(&self) -> Observable<()> {
        self.taps.observable()
    }

    pub fn bind(&mut self, item: &ButtonData) {
        self.title = item.title.clone();
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.taps.send(());
                true
            }
            _ => false,
        }
    }

    pub fn prepare_for_reuse(&mut self) {
        self.title.clear();
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, state: CellState, theme: &Theme) {
        let (style, border_style) = if state.focused {
            (
                styling::active_button_style(theme),
                styling::active_block_border_style(theme),
            )
        } else {
            (
                styling::normal_text_style(theme),
                styling::normal_block_border_style(theme),
            )
        };
        let button = Paragraph::new(Span::styled(format!(" {} ", self.title), style))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style),
            );
        frame.render_widget(button, area);
    }
}

impl Default for ButtonCell {
    fn default() -> Self {
        ButtonCell::new()
    }
}
