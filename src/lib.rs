//! Terminal form screen driven by a reactive state pipeline and a diffable
//! list renderer.

pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod form;
pub mod logger;
pub mod reactive;
pub mod screen;
pub mod state;
pub mod ui;
