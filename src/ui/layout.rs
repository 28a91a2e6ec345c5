//! Form layout.
//!
//! `FormLayout` turns the flattened rows of a snapshot (section headers,
//! spacers and items) into screen areas. When the rows do not fit, a window
//! of rows is chosen so the focused row stays visible, roughly centered.

use crate::form::ComponentKind;
use ratatui::layout::Rect;

/// Kind of a laid-out row.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Spacer,
    Header,
    Item(ComponentKind),
}

/// Screen area assigned to a row.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub row: usize,
    pub area: Rect,
}

/// Row heights of the form list.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormLayout {
    pub text_height: u16,
    pub date_height: u16,
    pub button_height: u16,
    pub fallback_height: u16,
    pub header_height: u16,
    pub section_spacing: u16,
}

impl Default for FormLayout {
    fn default() -> Self {
        FormLayout {
            text_height: 3,
            date_height: 3,
            button_height: 3,
            fallback_height: 1,
            header_height: 1,
            section_spacing: 1,
        }
    }
}

impl FormLayout {
    pub fn height_of(&self, kind: RowKind) -> u16 {
        match kind {
            RowKind::Spacer => self.section_spacing,
            RowKind::Header => self.header_height,
            RowKind::Item(ComponentKind::Text) => self.text_height,
            RowKind::Item(ComponentKind::Date) => self.date_height,
            RowKind::Item(ComponentKind::Button) => self.button_height,
            RowKind::Item(ComponentKind::Unsupported) => self.fallback_height,
        }
    }

    /// Place rows top to bottom inside `area`, scrolled so that `focused`
    /// is visible. Rows that do not fit are left out.
    ///
    pub fn place(&self, rows: &[RowKind], area: Rect, focused: Option<usize>) -> Vec<Placement> {
        if rows.is_empty() || area.height == 0 {
            return vec![];
        }
        let heights: Vec<u16> = rows.iter().map(|row| self.height_of(*row)).collect();
        let available = area.height;
        let focus = focused.unwrap_or(0).min(rows.len() - 1);

        // Walk back from the focused row, using at most half the height.
        let mut start = focus;
        let mut height_before = 0u16;
        for idx in (0..focus).rev() {
            if height_before.saturating_add(heights[idx]) <= available / 2 {
                height_before += heights[idx];
                start = idx;
            } else {
                break;
            }
        }

        // If the tail fits with room to spare, scroll back to use the room.
        let tail: u32 = heights[start..].iter().map(|height| u32::from(*height)).sum();
        if tail < u32::from(available) {
            let mut room = available - tail as u16;
            while start > 0 && heights[start - 1] <= room {
                start -= 1;
                room -= heights[start];
            }
        }

        let mut placements = vec![];
        let mut used = 0u16;
        for (row, height) in heights.iter().enumerate().skip(start) {
            if used.saturating_add(*height) > available {
                if placements.is_empty() {
                    // Always show at least one row, clipped.
                    placements.push(Placement {
                        row,
                        area: Rect::new(area.x, area.y, area.width, available),
                    });
                }
                break;
            }
            placements.push(Placement {
                row,
                area: Rect::new(area.x, area.y + used, area.width, *height),
            });
            used += height;
        }
        placements
    }
}
