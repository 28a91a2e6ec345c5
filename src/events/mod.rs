//! Event handling module.
//!
//! Terminal events are polled on a separate thread and handled on the UI
//! thread: exit and log-panel keys are handled here, every other key goes to
//! the form screen.

pub mod terminal;
