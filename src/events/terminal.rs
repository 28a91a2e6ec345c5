use crate::state::State;
use anyhow::Result;
use crossterm::{
    event,
    event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
};
use log::*;
use std::{sync::mpsc, thread, time::Duration};

/// Specify terminal event poll rate in milliseconds.
///
const TICK_RATE_IN_MS: u64 = 60;

/// Specify different terminal event types.
///
#[derive(Debug)]
pub enum Event<I> {
    Input(I),
    Tick,
}

/// Specify struct for managing terminal events channel.
///
pub struct Handler {
    rx: mpsc::Receiver<Event<KeyEvent>>,
    _tx: mpsc::Sender<Event<KeyEvent>>,
}

impl Handler {
    /// Return new instance after spawning new input polling thread.
    ///
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let tx_clone = tx.clone();
        thread::spawn(move || {
            let tick_rate = Duration::from_millis(TICK_RATE_IN_MS);
            loop {
                match event::poll(tick_rate) {
                    Ok(true) => match event::read() {
                        Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                            if tx_clone.send(Event::Input(key)).is_err() {
                                break;
                            }
                        }
                        Ok(_) => {}
                        Err(e) => warn!("Failed to read terminal event: {}", e),
                    },
                    Ok(false) => {}
                    Err(e) => warn!("Failed to poll terminal events: {}", e),
                }
                if tx_clone.send(Event::Tick).is_err() {
                    break;
                }
            }
        });
        Handler { rx, _tx: tx }
    }

    /// Receive next terminal event and handle it accordingly. Returns result
    /// with value true if should continue or false if exit was requested.
    ///
    pub fn handle_next(&self, state: &mut State) -> Result<bool> {
        let event = self.rx.recv()?;
        handle_event(event, state)
    }
}

impl Default for Handler {
    fn default() -> Self {
        Handler::new()
    }
}

/// Handle a single terminal event.
///
pub fn handle_event(event: Event<KeyEvent>, state: &mut State) -> Result<bool> {
    match event {
        Event::Input(event) => match event {
            KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            }
            | KeyEvent {
                code: KeyCode::Esc, ..
            } => {
                debug!("Processing exit terminal event '{:?}'...", event);
                return Ok(false);
            }
            KeyEvent {
                code: KeyCode::F(2),
                ..
            } => {
                state.toggle_log();
            }
            _ => {
                let consumed = state.with_screen(|screen| screen.handle_key(event))?;
                if !consumed {
                    trace!("Skipping processing of terminal event '{:?}'...", event);
                }
            }
        },
        Event::Tick => {}
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{ContentBuilder, FieldValue, FormContentBuilder, FormDefinition};
    use crate::logger::LogBuffer;
    use crate::reactive::{UiExecutor, UiQueue};
    use crate::screen::FormScreen;
    use crate::ui::layout::FormLayout;
    use std::sync::{Arc, Mutex};

    fn state() -> (State, UiQueue) {
        let builder = Arc::new(Mutex::new(
            FormContentBuilder::new(&FormDefinition::signup()).unwrap(),
        ));
        let (executor, queue) = UiExecutor::channel();
        let screen = FormScreen::new(&builder, FormLayout::default(), executor, "%Y-%m-%d");
        screen.lock().unwrap().initialize();
        queue.drain();
        (State::new(builder, screen, Arc::new(LogBuffer::new(10))), queue)
    }

    fn input(code: KeyCode, modifiers: KeyModifiers) -> Event<KeyEvent> {
        Event::Input(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn ctrl_c_and_esc_exit() {
        let (mut state, _queue) = state();
        assert!(!handle_event(input(KeyCode::Char('c'), KeyModifiers::CONTROL), &mut state).unwrap());
        assert!(!handle_event(input(KeyCode::Esc, KeyModifiers::NONE), &mut state).unwrap());
    }

    #[test]
    fn f2_toggles_log_panel() {
        let (mut state, _queue) = state();
        assert!(handle_event(input(KeyCode::F(2), KeyModifiers::NONE), &mut state).unwrap());
        assert!(state.is_log_visible());
    }

    #[test]
    fn other_keys_reach_the_screen() {
        let (mut state, queue) = state();
        for c in ['c', 'A'] {
            let modifiers = if c.is_uppercase() {
                KeyModifiers::SHIFT
            } else {
                KeyModifiers::NONE
            };
            assert!(handle_event(input(KeyCode::Char(c), modifiers), &mut state).unwrap());
        }
        queue.drain();
        let value = state
            .with_builder(|builder| builder.current_content()[0].items[0].value())
            .unwrap();
        assert_eq!(value, Some(FieldValue::Text("cA".to_string())));
    }

    #[test]
    fn ticks_continue() {
        let (mut state, _queue) = state();
        assert!(handle_event(Event::Tick, &mut state).unwrap());
    }
}
