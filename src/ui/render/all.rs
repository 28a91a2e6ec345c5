use super::{banner, footer, log, Frame};
use crate::state::State;
use ratatui::layout::{Constraint, Direction, Layout};

/// Width of the log panel in percent of the terminal width.
///
const LOG_PANEL_PERCENT: u16 = 40;

/// Render all widgets according to state.
///
pub fn all(frame: &mut Frame, state: &mut State) {
    let size = frame.size();
    state.set_terminal_size(size);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(size);

    banner(frame, rows[0], state);

    let body = if state.is_log_visible() {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(100 - LOG_PANEL_PERCENT),
                Constraint::Percentage(LOG_PANEL_PERCENT),
            ])
            .split(rows[1]);
        log(frame, columns[1], state);
        columns[0]
    } else {
        rows[1]
    };

    let theme = state.theme().clone();
    if state
        .with_screen(|screen| screen.render(frame, body, &theme))
        .is_err()
    {
        ::log::error!("Failed to render form, screen lock poisoned");
    }

    footer(frame, rows[2], state);
}
