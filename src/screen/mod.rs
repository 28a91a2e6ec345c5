//! Form screen controller.
//!
//! `FormScreen` connects a `ContentBuilder` to a `CollectionView`:
//! - builder content becomes a snapshot that is diffed into the view
//! - cell events flow back to the builder through `FormCellFactory`
//! - every builder change schedules a refresh on the UI executor
//! - successful submissions are observed for the lifetime of the screen
//!
//! The screen never owns the builder. Whoever created both keeps the builder
//! alive; once it is dropped, refreshes and cell events are no-ops.

mod factory;

pub use factory::{ChangeHook, FormCellFactory};

use crate::form::{ContentBuilder, Submission};
use crate::reactive::{SubscriptionBag, UiExecutor};
use crate::ui::collection::{CollectionView, FormPatch, FormSnapshot};
use crate::ui::diffable::DataSource;
use crate::ui::layout::FormLayout;
use crate::ui::theme::Theme;
use crate::ui::Frame;
use crossterm::event::{KeyCode, KeyEvent};
use log::*;
use ratatui::layout::Rect;
use std::sync::{Arc, Mutex, Weak};

/// Lifecycle of a screen.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenPhase {
    Created,
    Shown,
    TornDown,
}

pub type ScreenHandle<B> = Arc<Mutex<FormScreen<B>>>;

pub struct FormScreen<B: ContentBuilder> {
    this: Weak<Mutex<FormScreen<B>>>,
    builder: Weak<Mutex<B>>,
    executor: UiExecutor,
    collection: CollectionView<FormCellFactory<B>>,
    date_format: String,
    subscriptions: SubscriptionBag,
    submitted: Arc<Mutex<Vec<Submission>>>,
    animated: bool,
    phase: ScreenPhase,
}

impl<B: ContentBuilder> FormScreen<B> {
    /// Create a screen reading from `builder`. Nothing is shown until
    /// `initialize` runs.
    ///
    pub fn new(
        builder: &Arc<Mutex<B>>,
        layout: FormLayout,
        executor: UiExecutor,
        date_format: &str,
    ) -> ScreenHandle<B> {
        Arc::new_cyclic(|this| {
            Mutex::new(FormScreen {
                this: this.clone(),
                builder: Arc::downgrade(builder),
                executor,
                collection: CollectionView::new(layout),
                date_format: date_format.to_string(),
                subscriptions: SubscriptionBag::new(),
                submitted: Arc::new(Mutex::new(vec![])),
                animated: true,
                phase: ScreenPhase::Created,
            })
        })
    }

    /// Whether refreshes caused by cell events are animated. Takes effect at
    /// `initialize`.
    ///
    pub fn set_animated(&mut self, animated: bool) {
        self.animated = animated;
    }

    /// Set up the screen: observe submissions, attach the data source,
    /// install the collection view and schedule the first refresh. Runs
    /// once; later calls are ignored.
    ///
    pub fn initialize(&mut self) {
        if self.phase != ScreenPhase::Created {
            warn!("Screen already initialized ({:?}), ignoring", self.phase);
            return;
        }
        self.observe_submissions();
        let data_source = DataSource::new(self.make_cell_factory());
        self.collection.set_data_source(data_source);
        self.collection.install();
        self.phase = ScreenPhase::Shown;
        info!("Form screen shown");
        self.refresh(false);
    }

    fn observe_submissions(&mut self) {
        let Some(builder) = self.builder.upgrade() else {
            warn!("Content builder gone, submissions not observed");
            return;
        };
        let observable = match builder.lock() {
            Ok(builder) => builder.submissions(),
            Err(_) => {
                error!("Content builder lock poisoned, submissions not observed");
                return;
            }
        };
        let submitted = Arc::clone(&self.submitted);
        observable
            .subscribe(move |submission: &Submission| {
                match serde_json::to_string(submission) {
                    Ok(json) => info!("Form submitted: {}", json),
                    Err(e) => warn!("Form submitted but could not be serialized: {}", e),
                }
                if let Ok(mut submitted) = submitted.lock() {
                    submitted.push(submission.clone());
                }
            })
            .store(&mut self.subscriptions);
    }

    fn make_cell_factory(&self) -> FormCellFactory<B> {
        let this = self.this.clone();
        let executor = self.executor.clone();
        let animated = self.animated;
        let on_change: ChangeHook = Arc::new(move || schedule_refresh(&this, &executor, animated));
        FormCellFactory::new(self.builder.clone(), on_change, &self.date_format)
    }

    /// Schedule a rebuild of the displayed list from the builder's current
    /// content. The apply always happens later, on the UI executor.
    ///
    pub fn refresh(&self, animated: bool) {
        schedule_refresh(&self.this, &self.executor, animated);
    }

    /// Rebuild the snapshot from the builder and apply it to the view.
    /// Returns the applied patch, or `None` when nothing was applied.
    ///
    pub fn apply_current(&mut self, animated: bool) -> Option<FormPatch> {
        if self.phase != ScreenPhase::Shown {
            debug!("Skipping refresh while {:?}", self.phase);
            return None;
        }
        let Some(builder) = self.builder.upgrade() else {
            debug!("Content builder gone, skipping refresh");
            return None;
        };
        let sections = match builder.lock() {
            Ok(builder) => builder.current_content(),
            Err(_) => {
                error!("Content builder lock poisoned, skipping refresh");
                return None;
            }
        };
        let snapshot = match FormSnapshot::from_sections(sections) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                error!("Failed to build form snapshot: {}", e);
                return None;
            }
        };
        let patch = self.collection.apply(snapshot, animated)?;
        if !patch.is_empty() {
            debug!("Applied {} change(s) to the form", patch.len());
        }
        Some(patch)
    }

    /// Handle a key press. Focus keys are handled here; everything else is
    /// offered to the focused cell.
    ///
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.phase != ScreenPhase::Shown {
            return false;
        }
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.collection.focus_next();
                true
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.collection.focus_previous();
                true
            }
            _ => self.collection.handle_key(key),
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if self.phase == ScreenPhase::Shown {
            self.collection.render(frame, area, theme);
        }
    }

    /// Cancel every subscription and drop all cells. Pending refreshes
    /// become no-ops.
    ///
    pub fn teardown(&mut self) {
        if self.phase == ScreenPhase::TornDown {
            return;
        }
        self.subscriptions.cancel_all();
        self.collection.teardown();
        self.phase = ScreenPhase::TornDown;
        info!("Form screen torn down");
    }

    pub fn phase(&self) -> ScreenPhase {
        self.phase
    }

    pub fn collection(&self) -> &CollectionView<FormCellFactory<B>> {
        &self.collection
    }

    pub fn collection_mut(&mut self) -> &mut CollectionView<FormCellFactory<B>> {
        &mut self.collection
    }

    /// Submissions received so far, oldest first.
    ///
    pub fn submissions(&self) -> Vec<Submission> {
        self.submitted
            .lock()
            .map(|submitted| submitted.clone())
            .unwrap_or_default()
    }
}

fn schedule_refresh<B: ContentBuilder>(
    this: &Weak<Mutex<FormScreen<B>>>,
    executor: &UiExecutor,
    animated: bool,
) {
    let this = this.clone();
    executor.dispatch(move || {
        let Some(screen) = this.upgrade() else {
            debug!("Screen gone, dropping refresh");
            return;
        };
        match screen.lock() {
            Ok(mut screen) => {
                screen.apply_current(animated);
            }
            Err(_) => error!("Screen lock poisoned, dropping refresh"),
        };
    });
}
