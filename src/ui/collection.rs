//! The rendering surface of the form screen.
//!
//! A `CollectionView` is created with its layout, receives a data source
//! during screen setup and is installed into the body area, which it fills
//! edge to edge. It owns keyboard focus and the short highlight shown for
//! rows inserted by an animated apply.

use super::cells::{CellState, FormCell};
use super::diffable::{CellProvider, DataSource, Patch, Snapshot, SnapshotError};
use super::layout::{FormLayout, RowKind};
use super::theme::Theme;
use super::widgets::styling;
use super::Frame;
use crate::form::{FormComponent, FormSectionComponent, SectionHeader};
use crossterm::event::KeyEvent;
use log::*;
use ratatui::{layout::Rect, text::Span, widgets::Paragraph};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// How long rows stay highlighted after an animated apply.
///
const TRANSITION: Duration = Duration::from_millis(400);

pub type FormSnapshot = Snapshot<SectionHeader, FormComponent>;
pub type FormPatch = Patch<Uuid, Uuid>;

impl Snapshot<SectionHeader, FormComponent> {
    /// Build a snapshot from builder content.
    ///
    pub fn from_sections(sections: Vec<FormSectionComponent>) -> Result<Self, SnapshotError> {
        let mut snapshot = Snapshot::new();
        for section in sections {
            let header = section.header();
            let id = header.id;
            snapshot.append_sections(std::iter::once(header))?;
            snapshot.append_items(section.items, &id)?;
        }
        Ok(snapshot)
    }
}

enum Row {
    Spacer,
    Header(String),
    Item(Uuid, RowKind),
}

impl Row {
    fn kind(&self) -> RowKind {
        match self {
            Row::Spacer => RowKind::Spacer,
            Row::Header(_) => RowKind::Header,
            Row::Item(_, kind) => *kind,
        }
    }
}

pub struct CollectionView<P>
where
    P: CellProvider<FormComponent, Cell = FormCell>,
{
    layout: FormLayout,
    data_source: Option<DataSource<SectionHeader, FormComponent, P>>,
    focused: Option<Uuid>,
    transitions: HashMap<Uuid, Instant>,
    installed: bool,
}

impl<P> CollectionView<P>
where
    P: CellProvider<FormComponent, Cell = FormCell>,
{
    pub fn new(layout: FormLayout) -> Self {
        CollectionView {
            layout,
            data_source: None,
            focused: None,
            transitions: HashMap::new(),
            installed: false,
        }
    }

    pub fn set_data_source(&mut self, data_source: DataSource<SectionHeader, FormComponent, P>) {
        self.data_source = Some(data_source);
    }

    pub fn data_source(&self) -> Option<&DataSource<SectionHeader, FormComponent, P>> {
        self.data_source.as_ref()
    }

    /// Mark the view as placed in the screen; only installed views render.
    ///
    pub fn install(&mut self) {
        self.installed = true;
    }

    pub fn is_installed(&self) -> bool {
        self.installed
    }

    /// Diff `snapshot` against the displayed one and apply the delta.
    /// Returns `None` when no data source is set.
    ///
    pub fn apply(&mut self, snapshot: FormSnapshot, animated: bool) -> Option<FormPatch> {
        let Some(data_source) = self.data_source.as_mut() else {
            warn!("Snapshot applied before a data source was set");
            return None;
        };
        let patch = data_source.apply(snapshot);
        if animated {
            let now = Instant::now();
            for id in patch.inserted_items() {
                self.transitions.insert(*id, now);
            }
        }
        self.ensure_focus();
        Some(patch)
    }

    fn interactive_items(&self) -> Vec<Uuid> {
        self.data_source
            .as_ref()
            .map(|source| {
                source
                    .snapshot()
                    .iter_items()
                    .filter(|(_, item)| item.is_interactive())
                    .map(|(_, item)| item.id())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Keep focus on a live interactive item, defaulting to the first one.
    ///
    fn ensure_focus(&mut self) {
        let interactive = self.interactive_items();
        let still_valid = self
            .focused
            .map(|id| interactive.contains(&id))
            .unwrap_or(false);
        if !still_valid {
            self.focused = interactive.first().copied();
        }
    }

    pub fn focused(&self) -> Option<Uuid> {
        self.focused
    }

    /// Focus the given item if it is live and interactive.
    ///
    pub fn set_focus(&mut self, id: Uuid) -> bool {
        if self.interactive_items().contains(&id) {
            self.focused = Some(id);
            true
        } else {
            false
        }
    }

    pub fn focus_next(&mut self) {
        self.step_focus(1);
    }

    pub fn focus_previous(&mut self) {
        self.step_focus(-1);
    }

    fn step_focus(&mut self, step: isize) {
        let interactive = self.interactive_items();
        if interactive.is_empty() {
            self.focused = None;
            return;
        }
        let len = interactive.len() as isize;
        let current = self
            .focused
            .and_then(|id| interactive.iter().position(|candidate| *candidate == id))
            .map(|idx| idx as isize)
            .unwrap_or(-step.signum());
        let next = (current + step).rem_euclid(len) as usize;
        self.focused = Some(interactive[next]);
    }

    /// Offer a key to the focused cell.
    ///
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let (Some(id), Some(data_source)) = (self.focused, self.data_source.as_mut()) else {
            return false;
        };
        match data_source.slot_mut(&id) {
            Some(slot) => slot.cell_mut().handle_key(key),
            None => false,
        }
    }

    fn rows(&self) -> Vec<Row> {
        let mut rows = vec![];
        let Some(data_source) = self.data_source.as_ref() else {
            return rows;
        };
        let snapshot = data_source.snapshot();
        for (section_idx, header) in snapshot.sections().iter().enumerate() {
            if section_idx > 0 {
                rows.push(Row::Spacer);
            }
            if let Some(title) = &header.title {
                rows.push(Row::Header(title.clone()));
            }
            for item in snapshot.items(section_idx) {
                rows.push(Row::Item(item.id(), RowKind::Item(item.kind())));
            }
        }
        rows
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if !self.installed {
            return;
        }
        let now = Instant::now();
        self.transitions
            .retain(|_, started| now.duration_since(*started) < TRANSITION);

        let rows = self.rows();
        let kinds: Vec<RowKind> = rows.iter().map(Row::kind).collect();
        let focused_row = rows
            .iter()
            .position(|row| matches!(row, Row::Item(id, _) if Some(*id) == self.focused));
        let placements = self.layout.place(&kinds, area, focused_row);

        let focused = self.focused;
        let CollectionView {
            data_source,
            transitions,
            ..
        } = self;
        let Some(data_source) = data_source.as_mut() else {
            return;
        };
        for placement in placements {
            match &rows[placement.row] {
                Row::Spacer => {}
                Row::Header(title) => {
                    let header = Paragraph::new(Span::styled(title.clone(), styling::banner_style(theme)));
                    frame.render_widget(header, placement.area);
                }
                Row::Item(id, _) => {
                    if let Some(slot) = data_source.slot_mut(id) {
                        let state = CellState {
                            focused: focused == Some(*id),
                            transitioning: transitions.contains_key(id),
                        };
                        slot.cell_mut().render(frame, placement.area, state, theme);
                    }
                }
            }
        }
    }

    /// Drop all cells and their subscriptions; the view stops rendering.
    ///
    pub fn teardown(&mut self) {
        if let Some(data_source) = self.data_source.as_mut() {
            data_source.teardown();
        }
        self.focused = None;
        self.transitions.clear();
        self.installed = false;
    }
}
