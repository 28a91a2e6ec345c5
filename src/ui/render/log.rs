use super::Frame;
use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::Span,
    widgets::{Block, Borders, List, ListItem},
};

/// Render log widget according to state. Shows the newest entries that fit.
///
pub fn log(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.theme();
    let block = Block::default()
        .title("Log (F2 to hide)")
        .borders(Borders::ALL)
        .border_style(styling::normal_block_border_style(theme));

    let visible = size.height.saturating_sub(2) as usize;
    let items: Vec<ListItem> = state
        .logs()
        .tail(visible)
        .into_iter()
        .map(|entry| {
            let style = if entry.contains("ERROR") || entry.contains("WARN") {
                styling::error_text_style(theme)
            } else {
                styling::normal_text_style(theme)
            };
            ListItem::new(Span::styled(entry, style))
        })
        .collect();

    let list = List::new(items)
        .style(styling::normal_text_style(theme))
        .block(block);
    frame.render_widget(list, size);
}
