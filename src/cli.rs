use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Task desk: a file-backed task list with a validated edit dialog.
/// Storage defaults to ~/.taskdesk/tasks.json or a path passed via --db.
#[derive(Parser, Debug)]
#[command(name = "td", version, about = "Terminal task desk")]
pub struct Cli {
    /// Path to the JSON database file.
    #[arg(long, global = true, env = "TASKDESK_DB")]
    pub db: Option<PathBuf>,

    /// Path to a TOML config file.
    #[arg(long, global = true, env = "TASKDESK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset (e.g. "info", "td=debug").
    #[arg(long, global = true, env = "TASKDESK_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// File that receives log output.
    #[arg(long, global = true, env = "TASKDESK_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}
