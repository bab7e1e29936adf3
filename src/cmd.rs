//! Command implementations for the CLI interface.
//!
//! `edit` and `add` run the same ordered validation as the TUI dialog; `edit`
//! drives an `EditTaskForm` seeded from the stored task.

use std::path::Path;

use anyhow::{bail, Context};
use chrono::{TimeZone, Utc};
use clap::Subcommand;
use clap_complete::{generate, Shell};

use crate::db::print_table;
use crate::fields::{Priority, Status};
use crate::router::RefreshRequest;
use crate::store::{JsonStore, TaskStore};
use crate::task::Task;
use crate::tui::edit_form::{EditTaskForm, EditTaskProps};
use crate::tui::input::InputField;
use crate::tui::run::{run_tui, run_tui_with_edit};
use crate::validation::{validate, TaskDraft};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Launch the interactive UI.
    Ui {
        /// Open straight into the edit dialog for this task id.
        #[arg(long)]
        edit: Option<String>,
    },

    /// Add a new task.
    Add {
        /// Short title for the task (at least 3 characters).
        title: String,
        /// Description (at least 3 characters).
        #[arg(long)]
        desc: String,
        /// Status: pending | in_progress | completed | deployed.
        #[arg(long, value_enum, default_value_t = Status::Pending)]
        status: Status,
        /// Person responsible for the task.
        #[arg(long)]
        assignee: String,
        /// Priority: p0 | p1 | p2.
        #[arg(long, value_enum, default_value_t = Priority::P1)]
        priority: Priority,
    },

    /// List tasks with optional filters.
    List {
        #[arg(long, value_enum)]
        status: Option<Status>,
        #[arg(long, value_enum)]
        priority: Option<Priority>,
        #[arg(long)]
        assignee: Option<String>,
    },

    /// View a single task.
    View {
        id: String,
    },

    /// Edit fields on a task. Unspecified fields keep their current value.
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        desc: Option<String>,
        #[arg(long, value_enum)]
        status: Option<Status>,
        #[arg(long)]
        assignee: Option<String>,
        #[arg(long, value_enum)]
        priority: Option<Priority>,
    },

    /// Delete a task.
    Delete {
        id: String,
    },

    /// Generate shell completion scripts.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Launch the terminal user interface.
pub fn cmd_ui(db_path: &Path, edit: Option<String>) -> anyhow::Result<()> {
    match edit {
        Some(id) => run_tui_with_edit(db_path, &id),
        None => run_tui(db_path),
    }
}

/// Validate and add a new task.
pub fn cmd_add(
    store: &mut JsonStore,
    title: String,
    desc: String,
    status: Status,
    assignee: String,
    priority: Priority,
) -> anyhow::Result<()> {
    let fields = validate(&TaskDraft {
        title: &title,
        description: &desc,
        status: Some(status),
        assignee: &assignee,
        priority: Some(priority),
    })?;
    let id = store.add_task(fields).context("failed to save task")?;
    println!("Added task {id}");
    Ok(())
}

/// Print tasks matching the filters.
pub fn cmd_list(
    store: &JsonStore,
    status: Option<Status>,
    priority: Option<Priority>,
    assignee: Option<String>,
) {
    let filtered: Vec<&Task> = store
        .tasks()
        .iter()
        .filter(|t| status.map_or(true, |s| t.status == s))
        .filter(|t| priority.map_or(true, |p| t.priority == p))
        .filter(|t| assignee.as_deref().map_or(true, |a| t.assignee.eq_ignore_ascii_case(a)))
        .collect();
    print_table(&filtered);
}

/// Print every field of one task.
pub fn cmd_view(store: &JsonStore, id: &str) -> anyhow::Result<()> {
    let Some(task) = store.get(id) else {
        bail!("task '{id}' not found");
    };
    let stamp = |ts: i64| {
        Utc.timestamp_opt(ts, 0)
            .single()
            .map_or_else(|| "-".to_string(), |d| d.to_rfc3339())
    };
    println!("ID:           {}", task.id);
    println!("Title:        {}", task.title);
    println!("Status:       {}", task.status.label());
    println!("Assignee:     {}", if task.assignee.is_empty() { "-" } else { task.assignee.as_str() });
    println!("Priority:     {}", task.priority.label());
    println!("Created UTC:  {}", stamp(task.created_at_utc));
    println!("Updated UTC:  {}", stamp(task.updated_at_utc));
    println!("Description:\n{}", task.description);
    Ok(())
}

/// Overrides supplied on the `edit` command line.
#[derive(Debug, Default)]
pub struct EditArgs {
    pub title: Option<String>,
    pub desc: Option<String>,
    pub status: Option<Status>,
    pub assignee: Option<String>,
    pub priority: Option<Priority>,
}

/// Edit a task through the same form the dialog uses.
pub fn cmd_edit(store: &mut JsonStore, id: &str, args: EditArgs) -> anyhow::Result<()> {
    let Some(task) = store.get(id) else {
        bail!("task '{id}' not found");
    };
    let mut form = EditTaskForm::new(&EditTaskProps::from_task(task));
    if let Some(t) = args.title {
        form.title = InputField::with_value(&t);
    }
    if let Some(d) = args.desc {
        form.description = InputField::with_value(&d);
    }
    if let Some(a) = args.assignee {
        form.assignee = InputField::with_value(&a);
    }
    if args.status.is_some() {
        form.status = args.status;
    }
    if args.priority.is_some() {
        form.priority = args.priority;
    }

    let mut open = true;
    let mut refresh = RefreshRequest::new();
    form.submit(store, &mut open, &mut refresh)?;
    if refresh.take() {
        store.reload().context("failed to re-read task store")?;
    }
    println!("Updated task {id}");
    Ok(())
}

/// Delete a task.
pub fn cmd_delete(store: &mut JsonStore, id: &str) -> anyhow::Result<()> {
    let removed = store.delete_task(id)?;
    println!("Deleted task {} ({})", removed.id, removed.title);
    Ok(())
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use crate::cli::Cli;
    use clap::CommandFactory;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}
