//! Database file handling and formatting helpers.
//!
//! This module provides the `Database` struct holding every task in memory,
//! loaded from and saved to a single pretty-printed JSON file.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::store::StoreError;
use crate::task::Task;

/// In-memory database for storing and managing tasks.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Database {
    pub tasks: Vec<Task>,
}

impl Database {
    /// Load database from JSON file. A missing file is an empty database.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no database file yet, starting empty");
            return Ok(Database::default());
        }
        let buf = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let db: Database = serde_json::from_str(&buf).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), tasks = db.tasks.len(), "loaded database");
        Ok(db)
    }

    /// Save database to JSON file using atomic write (temp file + rename).
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let io_err = |source: std::io::Error| StoreError::Io { path: path.to_path_buf(), source };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let data = serde_json::to_string_pretty(self).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let tmp = path.with_extension("json.tmp");
        let mut f = File::create(&tmp).map_err(io_err)?;
        f.write_all(data.as_bytes()).map_err(io_err)?;
        f.flush().map_err(io_err)?;
        fs::rename(&tmp, path).map_err(io_err)?;
        tracing::debug!(path = %path.display(), tasks = self.tasks.len(), "saved database");
        Ok(())
    }

    /// Generate the next available task id (`t1`, `t2`, ...).
    pub fn next_id(&self) -> String {
        let max = self
            .tasks
            .iter()
            .filter_map(|t| t.id.strip_prefix('t').and_then(|n| n.parse::<u64>().ok()))
            .max()
            .unwrap_or(0);
        format!("t{}", max + 1)
    }

    /// Get a task by id.
    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Get a mutable reference to a task by id.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Remove a task by id, returning it if it existed.
    pub fn remove(&mut self, id: &str) -> Option<Task> {
        let idx = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(idx))
    }
}

/// Render tasks as a fixed-width table, one line per task plus a header.
pub fn format_table(tasks: &[&Task]) -> String {
    let mut out = format!(
        "{:<6} {:<12} {:<4} {:<14} {}\n",
        "ID", "Status", "Pri", "Assignee", "Title"
    );
    for t in tasks {
        let assignee = if t.assignee.is_empty() { "-" } else { t.assignee.as_str() };
        out.push_str(&format!(
            "{:<6} {:<12} {:<4} {:<14} {}\n",
            t.id,
            t.status.label(),
            t.priority.label(),
            truncate(assignee, 14),
            t.title
        ));
    }
    out
}

/// Print tasks to stdout as a table.
pub fn print_table(tasks: &[&Task]) {
    print!("{}", format_table(tasks));
}

/// Truncate a string to `max` characters, appending an ellipsis when cut.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}
