use crate::form::FormComponent;
use crate::ui::Frame;
use log::*;
use ratatui::{layout::Rect, widgets::Clear};

/// Fallback for items no other cell renders. Draws an empty row.
///
#[derive(Default)]
pub struct EmptyCell {
    field: Option<String>,
}

impl EmptyCell {
    pub fn new() -> Self {
        EmptyCell::default()
    }

    pub fn bind(&mut self, item: &FormComponent) {
        debug!("Rendering field '{}' with the fallback cell", item.field());
        self.field = Some(item.field().to_string());
    }

    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    pub fn prepare_for_reuse(&mut self) {
        self.field = None;
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Clear, area);
    }
}
