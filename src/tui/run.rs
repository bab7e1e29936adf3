//! TUI entry point and terminal setup.

use std::{io, path::Path};

use anyhow::Context;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::CrosstermBackend, Terminal};

use crate::tui::app::App;

/// Initialise and run the terminal user interface on the task list.
pub fn run_tui(db_path: &Path) -> anyhow::Result<()> {
    let app = App::new(db_path).context("failed to open task store")?;
    run_app(app)
}

/// Run the TUI with the edit dialog already open on `task_id`.
pub fn run_tui_with_edit(db_path: &Path, task_id: &str) -> anyhow::Result<()> {
    let mut app = App::new(db_path).context("failed to open task store")?;
    if !app.open_task_for_edit(task_id) {
        anyhow::bail!("task '{task_id}' not found");
    }
    run_app(app)
}

fn run_app(mut app: App) -> anyhow::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    tracing::info!("tui started");
    let result = app.run(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    tracing::info!("tui exited");

    result.context("terminal UI failed")
}
