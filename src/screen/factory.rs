use crate::form::{ComponentKind, ContentBuilder, FieldValue, FormComponent, Position};
use crate::ui::cells::{ButtonCell, DateCell, EmptyCell, FormCell, TextCell};
use crate::ui::diffable::{CellProvider, CellSlot};
use log::*;
use std::sync::{Arc, Mutex, Weak};

/// Called after an event reached the builder. The screen uses it to schedule
/// a refresh.
///
pub type ChangeHook = Arc<dyn Fn() + Send + Sync>;

/// Creates form cells and wires their events to the content builder.
///
/// Sinks hold the builder weakly: once its owner drops it, late events are
/// discarded.
///
pub struct FormCellFactory<B: ContentBuilder> {
    builder: Weak<Mutex<B>>,
    on_change: ChangeHook,
    date_format: String,
}

impl<B: ContentBuilder> FormCellFactory<B> {
    pub fn new(builder: Weak<Mutex<B>>, on_change: ChangeHook, date_format: &str) -> Self {
        FormCellFactory {
            builder,
            on_change,
            date_format: date_format.to_string(),
        }
    }

    fn update_sink(&self) -> impl Fn(&(FieldValue, Position)) + Send + Sync + 'static {
        let builder = self.builder.clone();
        let on_change = Arc::clone(&self.on_change);
        move |event: &(FieldValue, Position)| {
            let (value, at) = event;
            let Some(builder) = builder.upgrade() else {
                debug!("Dropping value for {}, builder is gone", at);
                return;
            };
            match builder.lock() {
                Ok(mut builder) => builder.update(value.clone(), *at),
                Err(_) => {
                    error!("Content builder lock poisoned, dropping value for {}", at);
                    return;
                }
            }
            on_change();
        }
    }

    fn validate_sink(&self) -> impl Fn(&()) + Send + Sync + 'static {
        let builder = self.builder.clone();
        let on_change = Arc::clone(&self.on_change);
        move |_: &()| {
            let Some(builder) = builder.upgrade() else {
                debug!("Dropping tap, builder is gone");
                return;
            };
            match builder.lock() {
                Ok(mut builder) => builder.validate(),
                Err(_) => {
                    error!("Content builder lock poisoned, dropping tap");
                    return;
                }
            }
            on_change();
        }
    }
}

impl<B: ContentBuilder> CellProvider<FormComponent> for FormCellFactory<B> {
    type Cell = FormCell;
    type ReuseId = ComponentKind;

    fn reuse_identifier(&self, item: &FormComponent) -> ComponentKind {
        item.kind()
    }

    fn make_cell(&self, reuse_id: &ComponentKind) -> FormCell {
        trace!("Making {:?} cell", reuse_id);
        match reuse_id {
            ComponentKind::Text => FormCell::Text(TextCell::new()),
            ComponentKind::Date => FormCell::Date(DateCell::new(&self.date_format)),
            ComponentKind::Button => FormCell::Button(ButtonCell::new()),
            ComponentKind::Unsupported => FormCell::Empty(EmptyCell::new()),
        }
    }

    fn configure(&mut self, slot: &mut CellSlot<FormCell>, item: &FormComponent, at: Position) {
        let subscription = match (item, slot.cell_mut()) {
            (FormComponent::Text(data), FormCell::Text(cell)) => {
                cell.bind(data, at);
                Some(cell.value_changes().subscribe(self.update_sink()))
            }
            (FormComponent::Date(data), FormCell::Date(cell)) => {
                cell.bind(data, at);
                Some(cell.value_changes().subscribe(self.update_sink()))
            }
            (FormComponent::Button(data), FormCell::Button(cell)) => {
                cell.bind(data);
                Some(cell.taps().subscribe(self.validate_sink()))
            }
            (item, FormCell::Empty(cell)) => {
                cell.bind(item);
                None
            }
            (item, cell) => {
                warn!(
                    "Cannot bind {:?} item '{}' into a {:?} cell",
                    item.kind(),
                    item.field(),
                    cell.kind()
                );
                None
            }
        };
        if let Some(subscription) = subscription {
            slot.install(subscription);
        }
    }
}
