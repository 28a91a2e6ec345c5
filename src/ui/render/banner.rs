use super::Frame;
use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Alignment, Rect},
    text::Span,
    widgets::{Block, Borders, Paragraph},
};

const TITLE: &str = "form-tui";

/// Render banner widget.
///
pub fn banner(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.theme();
    let submitted = state.submission_count();
    let status = if submitted == 0 {
        " Fill in the form and confirm ".to_string()
    } else {
        format!(" Submitted {} time(s) ", submitted)
    };
    let paragraph = Paragraph::new(Span::styled(status, styling::normal_text_style(theme)))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(styling::normal_block_border_style(theme))
                .title(Span::styled(TITLE, styling::banner_style(theme))),
        );
    frame.render_widget(paragraph, size);
}
