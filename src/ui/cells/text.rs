use super::CellState;
use crate::form::{FieldValue, Keyboard, Position, TextData};
use crate::reactive::{Observable, Subject};
use crate::ui::theme::Theme;
use crate::ui::widgets::styling;
use crate::ui::Frame;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        block::{Position as TitlePosition, Title},
        Block, Borders, Paragraph,
    },
};
use tui_textarea::{CursorMove, TextArea};

/// Single-line text input. Every edit emits the full new text together with
/// the position the cell is bound to.
///
pub struct TextCell {
    textarea: TextArea<'static>,
    label: String,
    placeholder: String,
    keyboard: Keyboard,
    error: Option<String>,
    position: Option<Position>,
    changes: Subject<(FieldValue, Position)>,
}

impl TextCell {
    pub fn new() -> Self {
        TextCell {
            textarea: TextArea::default(),
            label: String::new(),
            placeholder: String::new(),
            keyboard: Keyboard::Default,
            error: None,
            position: None,
            changes: Subject::new(),
        }
    }

    pub fn value_changes(&self) -> Observable<(FieldValue, Position)> {
        self.changes.observable()
    }

    /// Configure the cell for `item` at `at`. The edit buffer is only
    /// replaced when its text differs, so the cursor survives rebinding.
    ///
    pub fn bind(&mut self, item: &TextData, at: Position) {
        self.label = item.label.clone();
        self.placeholder = item.placeholder.clone();
        self.keyboard = item.keyboard;
        self.error = item.error.clone();
        self.position = Some(at);
        if self.text() != item.value {
            self.textarea = TextArea::new(vec![item.value.clone()]);
            self.textarea.move_cursor(CursorMove::End);
        }
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }

    pub fn text(&self) -> String {
        self.textarea.lines().first().cloned().unwrap_or_default()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let edited = match key.code {
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.textarea.insert_char(c);
                true
            }
            KeyCode::Backspace => self.textarea.delete_char(),
            KeyCode::Delete => self.textarea.delete_next_char(),
            KeyCode::Left => {
                self.textarea.move_cursor(CursorMove::Back);
                false
            }
            KeyCode::Right => {
                self.textarea.move_cursor(CursorMove::Forward);
                false
            }
            KeyCode::Home => {
                self.textarea.move_cursor(CursorMove::Head);
                false
            }
            KeyCode::End => {
                self.textarea.move_cursor(CursorMove::End);
                false
            }
            _ => return false,
        };
        if edited {
            if let Some(at) = self.position {
                self.changes.send((FieldValue::Text(self.text()), at));
            }
        }
        true
    }

    pub fn prepare_for_reuse(&mut self) {
        self.textarea = TextArea::default();
        self.label.clear();
        self.placeholder.clear();
        self.keyboard = Keyboard::Default;
        self.error = None;
        self.position = None;
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, state: CellState, theme: &Theme) {
        let border_style = if state.transitioning {
            styling::transition_style(theme)
        } else if state.focused {
            styling::active_block_border_style(theme)
        } else {
            styling::normal_block_border_style(theme)
        };
        let mut title = vec![Span::styled(
            self.label.clone(),
            if state.focused {
                styling::active_block_title_style()
            } else {
                styling::normal_text_style(theme)
            },
        )];
        if self.keyboard == Keyboard::Email {
            title.push(Span::styled(" (email)", styling::muted_text_style(theme)));
        }
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(Line::from(title));
        if let Some(error) = &self.error {
            block = block.title(
                Title::from(Span::styled(error.clone(), styling::error_text_style(theme)))
                    .position(TitlePosition::Bottom),
            );
        }

        if self.text().is_empty() && !state.focused {
            let placeholder = Paragraph::new(Span::styled(
                self.placeholder.clone(),
                styling::muted_text_style(theme),
            ))
            .block(block);
            frame.render_widget(placeholder, area);
            return;
        }

        self.textarea.set_block(block);
        self.textarea.set_style(styling::normal_text_style(theme));
        self.textarea.set_cursor_line_style(Style::default());
        self.textarea.set_cursor_style(if state.focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        });
        frame.render_widget(self.textarea.widget(), area);
    }
}

impl Default for TextCell {
    fn default() -> Self {
        TextCell::new()
    }
}
