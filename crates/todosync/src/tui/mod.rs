use std::io::{self, Stdout};
use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event as CrosstermEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use todosync_app::{TaskService, UiConfig};
use todosync_store::KeyValueStore;
use tokio::runtime::Runtime;
use tracing::subscriber::NoSubscriber;

mod app;
pub mod constants;
mod handlers;
mod input;
mod view;
mod widgets;

use self::app::App;
use self::view::Ui;

/// Launch the interactive TUI.
pub fn run<K: KeyValueStore + 'static>(service: TaskService<K>, runtime: &Runtime, config: &UiConfig) -> Result<()> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    let app = App::new(service, runtime.handle().clone());
    let mut ui = Ui::new(app, config.active_list_limit);

    let result = tracing::subscriber::with_default(NoSubscriber::default(), || {
        run_event_loop(&mut terminal, &mut ui, config)
    });

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    // Operations already dispatched still run to completion.
    ui.settle();

    result
}

fn run_event_loop<K: KeyValueStore + 'static>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ui: &mut Ui<K>,
    config: &UiConfig,
) -> Result<()> {
    let mut last_tick = Instant::now();
    let tick_rate = config.tick_rate();

    loop {
        ui.refresh();
        terminal.draw(|f| ui.draw(f))?;
        if ui.should_quit {
            break;
        }

        let timeout = tick_rate.checked_sub(last_tick.elapsed()).unwrap_or_default();

        if event::poll(timeout)?
            && let CrosstermEvent::Key(key) = event::read()?
        {
            ui.handle_key(key);
        }

        if last_tick.elapsed() >= tick_rate {
            ui.tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}
