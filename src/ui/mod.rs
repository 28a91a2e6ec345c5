//! User interface module.
//!
//! This module handles all UI rendering using the `ratatui` library, including:
//! - The diffable list engine and the collection view built on it
//! - Cell renderers for each form item kind
//! - Form layout and theme management
//! - Screen chrome (banner, footer, log panel)

pub type Frame<'a> = ratatui::Frame<'a>;

pub mod cells;
pub mod collection;
pub mod diffable;
pub mod layout;
mod render;
pub mod theme;
pub mod widgets;

pub use render::render;
pub use theme::Theme;
