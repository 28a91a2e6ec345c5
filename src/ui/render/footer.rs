use super::Frame;
use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

const SHORTCUTS: [(&str, &str); 4] = [
    ("Tab/↓", "next field"),
    ("Shift+Tab/↑", "previous field"),
    ("F2", "log"),
    ("Esc", "quit"),
];

/// Render footer widget.
///
pub fn footer(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.theme();
    let mut spans = vec![];
    for (idx, (key, action)) in SHORTCUTS.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled(", ", styling::muted_text_style(theme)));
        }
        spans.push(Span::styled(*key, styling::active_block_title_style()));
        spans.push(Span::styled(
            format!(": {}", action),
            styling::muted_text_style(theme),
        ));
    }
    let paragraph = Paragraph::new(Line::from(spans)).alignment(Alignment::Left);
    frame.render_widget(paragraph, size);
}
