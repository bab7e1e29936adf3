//! # td - Terminal Task Desk
//!
//! A file-backed task list with an interactive TUI and a scriptable CLI.
//! Each task carries a title, description, status, assignee and priority.
//!
//! ## Quick Start
//!
//! ```bash
//! # Add a task
//! td add "Fix bug" --desc "Null pointer in parser" --assignee alice --priority p1
//!
//! # Browse and edit in the TUI
//! td ui
//!
//! # Jump straight into the edit dialog
//! td ui --edit t1
//!
//! # Edit from the command line (same validation as the dialog)
//! td edit t1 --status in_progress
//! ```
//!
//! ## Edit rules
//!
//! Saving an edit checks, in order, and reports only the first failure:
//! title and description have at least 3 characters, and status, assignee and
//! priority are all set.
//!
//! Data is stored in `~/.taskdesk/tasks.json` unless `--db`, `TASKDESK_DB`
//! or the `[store] path` config key says otherwise. Logs go to a file so they
//! never draw over the TUI.

use std::path::Path;

use anyhow::Context;
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;

pub mod cli;
pub mod cmd;
pub mod config;
pub mod db;
pub mod fields;
pub mod router;
pub mod store;
pub mod task;
pub mod validation;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod edit_form;
    pub mod enums;
    pub mod input;
    pub mod run;
    pub mod utils;
}

use cli::Cli;
use cmd::*;
use config::Config;
use store::JsonStore;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    // Completions need neither config nor a store.
    if let Commands::Completions { shell } = cli.command {
        cmd_completions(shell);
        return Ok(());
    }

    let config = Config::load(&cli).context("failed to load configuration")?;
    let _log_guard = init_logging(&config.log_level, &config.log_file);
    tracing::debug!(db = %config.db_path.display(), "starting");

    let db_path = config.db_path.as_path();
    match cli.command {
        Commands::Ui { edit } => cmd_ui(db_path, edit),
        Commands::Add { title, desc, status, assignee, priority } => {
            let mut store = open_store(db_path)?;
            cmd_add(&mut store, title, desc, status, assignee, priority)
        }
        Commands::List { status, priority, assignee } => {
            let store = open_store(db_path)?;
            cmd_list(&store, status, priority, assignee);
            Ok(())
        }
        Commands::View { id } => cmd_view(&open_store(db_path)?, &id),
        Commands::Edit { id, title, desc, status, assignee, priority } => {
            let mut store = open_store(db_path)?;
            cmd_edit(&mut store, &id, EditArgs { title, desc, status, assignee, priority })
        }
        Commands::Delete { id } => cmd_delete(&mut open_store(db_path)?, &id),
        Commands::Completions { .. } => unreachable!("completions handled above"),
    }
}

fn open_store(path: &Path) -> anyhow::Result<JsonStore> {
    JsonStore::open(path).with_context(|| format!("failed to open task store {}", path.display()))
}

/// Initialise file-based logging.
///
/// `RUST_LOG` takes precedence over `level`. The returned guard must live
/// until exit so buffered lines are flushed.
fn init_logging(level: &str, log_path: &Path) -> Option<WorkerGuard> {
    let log_dir = log_path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    let file_name = log_path.file_name()?;
    std::fs::create_dir_all(log_dir).ok()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}
