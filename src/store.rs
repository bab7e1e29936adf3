//! Task store collaborator.
//!
//! The edit form only talks to a `TaskStore`; the JSON-file backed
//! `JsonStore` is the implementation used by the CLI and TUI.

use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::db::Database;
use crate::task::{Task, TaskUpdate};

/// Errors raised by a task store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("task '{0}' not found")]
    NotFound(String),

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Authoritative task list with a keyed edit operation.
pub trait TaskStore {
    /// All tasks in storage order.
    fn tasks(&self) -> &[Task];

    /// Look up one task.
    fn get(&self, id: &str) -> Option<&Task> {
        self.tasks().iter().find(|t| t.id == id)
    }

    /// Replace the editable fields of task `id`.
    fn edit_task(&mut self, id: &str, update: TaskUpdate) -> Result<(), StoreError>;
}

/// A `Database` bound to the file it persists to.
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    db: Database,
}

impl JsonStore {
    /// Open the store at `path`, reading whatever is already on disk.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let db = Database::load(path)?;
        Ok(Self { path: path.to_path_buf(), db })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-read the file, replacing the in-memory copy.
    pub fn reload(&mut self) -> Result<(), StoreError> {
        self.db = Database::load(&self.path)?;
        Ok(())
    }

    /// Re-read the file, apply `change` and persist the result. The
    /// in-memory copy is replaced only once the write has succeeded.
    fn write<T>(
        &mut self,
        change: impl FnOnce(&mut Database) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut db = Database::load(&self.path)?;
        let out = change(&mut db)?;
        db.save(&self.path)?;
        self.db = db;
        Ok(out)
    }

    /// Create a task from a validated payload and persist it. Returns the new id.
    pub fn add_task(&mut self, fields: TaskUpdate) -> Result<String, StoreError> {
        let now = Utc::now().timestamp();
        let id = self.write(|db| {
            let id = db.next_id();
            db.tasks.push(Task {
                id: id.clone(),
                title: fields.title,
                description: fields.description,
                status: fields.status,
                assignee: fields.assignee,
                priority: fields.priority,
                created_at_utc: now,
                updated_at_utc: now,
            });
            Ok(id)
        })?;
        tracing::info!(task = %id, "task created");
        Ok(id)
    }

    /// Delete a task and persist.
    pub fn delete_task(&mut self, id: &str) -> Result<Task, StoreError> {
        let removed = self.write(|db| db.remove(id).ok_or_else(|| StoreError::NotFound(id.to_string())))?;
        tracing::info!(task = %id, "task deleted");
        Ok(removed)
    }
}

impl TaskStore for JsonStore {
    fn tasks(&self) -> &[Task] {
        &self.db.tasks
    }

    fn edit_task(&mut self, id: &str, update: TaskUpdate) -> Result<(), StoreError> {
        let result = self.write(|db| {
            let task = db
                .get_mut(id)
                .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
            task.apply(update, Utc::now().timestamp());
            Ok(())
        });
        match &result {
            Ok(()) => tracing::info!(task = %id, "task edited"),
            Err(e) => tracing::warn!(task = %id, error = %e, "task edit not saved"),
        }
        result
    }
}
