use super::CellState;
use crate::form::{DateData, FieldValue, Position};
use crate::reactive::{Observable, Subject};
use crate::ui::theme::Theme;
use crate::ui::widgets::styling;
use crate::ui::Frame;
use chrono::{Local, Months, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{
        block::{Position as TitlePosition, Title},
        Block, Borders, Paragraph,
    },
};

/// Keyboard date picker.
///
/// Left/Right step one day, PageUp/PageDown one month, `[`/`]` one year and
/// `t` jumps to today. Every change emits the new date with the bound
/// position.
///
pub struct DateCell {
    label: String,
    value: Option<NaiveDate>,
    date_format: String,
    error: Option<String>,
    position: Option<Position>,
    changes: Subject<(FieldValue, Position)>,
}

impl DateCell {
    pub fn new(date_format: &str) -> Self {
        DateCell {
            label: String::new(),
            value: None,
            date_format: date_format.to_string(),
            error: None,
            position: None,
            changes: Subject::new(),
        }
    }

    pub fn value_changes(&self) -> Observable<(FieldValue, Position)> {
        self.changes.observable()
    }

    pub fn bind(&mut self, item: &DateData, at: Position) {
        self.label = item.label.clone();
        self.value = Some(item.value);
        self.error = item.error.clone();
        self.position = Some(at);
    }

    pub fn value(&self) -> Option<NaiveDate> {
        self.value
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let Some(current) = self.value else {
            return false;
        };
        let next = match key.code {
            KeyCode::Left => current.pred_opt(),
            KeyCode::Right => current.succ_opt(),
            KeyCode::PageUp => current.checked_add_months(Months::new(1)),
            KeyCode::PageDown => current.checked_sub_months(Months::new(1)),
            KeyCode::Char(']') => current.checked_add_months(Months::new(12)),
            KeyCode::Char('[') => current.checked_sub_months(Months::new(12)),
            KeyCode::Char('t') => Some(Local::now().date_naive()),
            _ => return false,
        };
        if let Some(next) = next.filter(|next| *next != current) {
            self.value = Some(next);
            if let Some(at) = self.position {
                self.changes.send((FieldValue::Date(next), at));
            }
        }
        true
    }

    pub fn prepare_for_reuse(&mut self) {
        self.label.clear();
        self.value = None;
        self.error = None;
        self.position = None;
    }

    fn formatted(&self) -> String {
        self.value
            .map(|value| value.format(&self.date_format).to_string())
            .unwrap_or_default()
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, state: CellState, theme: &Theme) {
        let border_style = if state.transitioning {
            styling::transition_style(theme)
        } else if state.focused {
            styling::active_block_border_style(theme)
        } else {
            styling::normal_block_border_style(theme)
        };
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(Span::styled(
                self.label.clone(),
                if state.focused {
                    styling::active_block_title_style()
                } else {
                    styling::normal_text_style(theme)
                },
            ));
        if let Some(error) = &self.error {
            block = block.title(
                Title::from(Span::styled(error.clone(), styling::error_text_style(theme)))
                    .position(TitlePosition::Bottom),
            );
        }
        let mut line = vec![Span::styled(self.formatted(), styling::normal_text_style(theme))];
        if state.focused {
            line.push(Span::styled(
                "  ←/→ day  PgUp/PgDn month  [/] year  t today",
                styling::muted_text_style(theme),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(line)).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use std::sync::{Arc, Mutex};
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn item(value: NaiveDate) -> DateData {
        DateData {
            id: Uuid::new_v4(),
            field: "dob".to_string(),
            label: "Date of birth".to_string(),
            value,
            rules: vec![],
            error: None,
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn stepping_emits_dates_with_position() {
        let mut cell = DateCell::new("%Y-%m-%d");
        cell.bind(&item(date(2000, 1, 31)), Position::new(0, 3));
        let seen = Arc::new(Mutex::new(vec![]));
        let sink = Arc::clone(&seen);
        let _subscription = cell
            .value_changes()
            .subscribe(move |event: &(FieldValue, Position)| sink.lock().unwrap().push(event.clone()));

        cell.handle_key(key(KeyCode::Right));
        cell.handle_key(key(KeyCode::PageUp));
        cell.handle_key(key(KeyCode::Char('[')));

        let at = Position::new(0, 3);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                (FieldValue::Date(date(2000, 2, 1)), at),
                (FieldValue::Date(date(2000, 3, 1)), at),
                (FieldValue::Date(date(1999, 3, 1)), at),
            ]
        );
    }

    #[test]
    fn month_step_clamps_to_month_end() {
        let mut cell = DateCell::new("%Y-%m-%d");
        cell.bind(&item(date(2001, 1, 31)), Position::new(0, 0));
        cell.handle_key(key(KeyCode::PageUp));
        assert_eq!(cell.value(), Some(date(2001, 2, 28)));
    }

    #[test]
    fn other_keys_are_not_consumed() {
        let mut cell = DateCell::new("%Y-%m-%d");
        cell.bind(&item(date(2001, 1, 1)), Position::new(0, 0));
        assert!(!cell.handle_key(key(KeyCode::Char('x'))));
        assert!(!cell.handle_key(key(KeyCode::Enter)));
    }

    #[test]
    fn formatted_uses_configured_format() {
        let mut cell = DateCell::new("%d/%m/%Y");
        cell.bind(&item(date(1815, 12, 10)), Position::new(0, 0));
        assert_eq!(cell.formatted(), "10/12/1815");
    }

    #[test]
    fn unbound_cell_ignores_keys() {
        let mut cell = DateCell::new("%Y-%m-%d");
        assert!(!cell.handle_key(key(KeyCode::Right)));
    }
}
