use crate::config::Config;
use crate::error::AppResult;
use crate::events::terminal::Handler as TerminalEventHandler;
use crate::form::{ContentBuilder, FormContentBuilder};
use crate::logger::{self, LogBuffer};
use crate::reactive::{UiExecutor, UiQueue};
use crate::screen::{FormScreen, ScreenHandle};
use crate::state::{BuilderHandle, State};
use crate::ui::{self, collection::FormSnapshot, layout::FormLayout};
use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::*;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io::stdout;
use std::sync::{Arc, Mutex};

/// Oversees event processing, state management, and terminal output.
///
pub struct App {
    state: State,
    queue: UiQueue,
    config: Config,
}

impl App {
    /// Start a new application according to the given configuration. Returns
    /// the result of the application execution.
    ///
    pub fn start(config: Config) -> Result<()> {
        let logs = Arc::new(LogBuffer::new(config.log_capacity));
        logger::init(Arc::clone(&logs), LevelFilter::Debug)?;

        info!("Starting application...");
        let (executor, queue) = UiExecutor::channel();
        let (builder, screen) = build_screen(&config, executor)?;
        let mut state = State::new(builder, screen, logs);
        if let Err(e) = state.set_theme(&config.theme_name) {
            warn!("{}, using the default theme", e);
        }
        state.with_screen(|screen| screen.initialize())?;

        let mut app = App {
            state,
            queue,
            config,
        };
        let result = app.start_ui();

        let submissions = app.state.with_screen(|screen| {
            screen.teardown();
            screen.submissions()
        })?;
        result?;

        if app.config.print_submissions {
            for submission in &submissions {
                println!("{}", serde_json::to_string(submission)?);
            }
        }

        info!("Exiting application...");
        Ok(())
    }

    /// Prepare the terminal, run the draw loop until exit is requested and
    /// restore the terminal.
    ///
    fn start_ui(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;
        terminal.hide_cursor()?;

        let handler = TerminalEventHandler::new();
        let result = self.run(&mut terminal, &handler);

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        result
    }

    /// Drain scheduled UI work, draw, then wait for the next event.
    ///
    fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>, handler: &TerminalEventHandler) -> Result<()> {
        loop {
            self.queue.drain();
            let state = &mut self.state;
            terminal.draw(|frame| ui::render(frame, state))?;
            if !handler.handle_next(&mut self.state)? {
                return Ok(());
            }
        }
    }
}

/// Build the content builder and the form screen described by the
/// configuration. The initial content is checked for identity collisions
/// before anything is shown. The caller owns the returned builder; the screen
/// only refers to it.
///
pub fn build_screen(
    config: &Config,
    executor: UiExecutor,
) -> AppResult<(BuilderHandle, ScreenHandle<FormContentBuilder>)> {
    let builder = FormContentBuilder::new(&config.form_definition())?;
    FormSnapshot::from_sections(builder.current_content())?;
    let builder = Arc::new(Mutex::new(builder));
    let screen = FormScreen::new(&builder, FormLayout::default(), executor, &config.date_format);
    if let Ok(mut screen) = screen.lock() {
        screen.set_animated(config.animate);
    }
    Ok((builder, screen))
}
