//! Main application logic for the terminal user interface.
//!
//! This module contains the `App` struct which owns the task store, the task
//! list view, and the edit dialog. The dialog's visibility is the `edit_open`
//! flag owned here; the form toggles it through the `&mut bool` it is handed.

use std::io;
use std::path::Path;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};

use crate::{
    fields::{Priority, Status},
    router::RefreshRequest,
    store::{JsonStore, StoreError, TaskStore},
    task::Task,
    tui::{
        colors::{priority_color, status_color, DARK_GREEN, DARK_PURPLE, ERROR_BG, GOLD},
        edit_form::{
            EditTaskForm, EditTaskProps, ASSIGNEE_FIELD, DESCRIPTION_FIELD, PRIORITY_FIELD,
            SAVE_BUTTON, STATUS_FIELD, TITLE_FIELD,
        },
        enums::AppState,
        input::InputField,
        utils::centered_rect,
    },
};

/// Rows given to the description input, excluding borders.
const DESCRIPTION_ROWS: u16 = 5;

/// Main application state for the terminal user interface.
pub struct App {
    state: AppState,
    store: JsonStore,
    router: RefreshRequest,
    task_list_state: TableState,
    edit_form: Option<EditTaskForm>,
    edit_open: bool,
    status_message: String,
}

impl App {
    /// Create a new App instance, loading the store from the specified path.
    pub fn new(db_path: &Path) -> Result<Self, StoreError> {
        let store = JsonStore::open(db_path)?;
        let mut task_list_state = TableState::default();
        if !store.tasks().is_empty() {
            task_list_state.select(Some(0));
        }
        Ok(App {
            state: AppState::TaskList,
            store,
            router: RefreshRequest::new(),
            task_list_state,
            edit_form: None,
            edit_open: false,
            status_message: String::new(),
        })
    }

    /// Open the edit dialog for a specific task.
    pub fn open_task_for_edit(&mut self, task_id: &str) -> bool {
        let Some(idx) = self.store.tasks().iter().position(|t| t.id == task_id) else {
            self.set_status_message(format!("Task {task_id} not found"));
            return false;
        };
        self.task_list_state.select(Some(idx));
        let props = EditTaskProps::from_task(&self.store.tasks()[idx]);
        self.edit_form = Some(EditTaskForm::new(&props));
        self.edit_open = true;
        self.status_message.clear();
        true
    }

    /// Whether the edit dialog is showing.
    pub fn is_editing(&self) -> bool {
        self.edit_open
    }

    pub fn edit_form(&self) -> Option<&EditTaskForm> {
        self.edit_form.as_ref()
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Reload the store from disk and keep the selection in range.
    fn refresh_tasks(&mut self) {
        let selected_id = self.get_selected_task().map(|t| t.id.clone());
        if let Err(e) = self.store.reload() {
            tracing::warn!(error = %e, "refresh failed");
            self.set_status_message(format!("Error: {e}"));
            return;
        }
        tracing::debug!(tasks = self.store.tasks().len(), "refreshed task list");
        let tasks = self.store.tasks();
        let idx = selected_id
            .and_then(|id| tasks.iter().position(|t| t.id == id))
            .or(if tasks.is_empty() { None } else { Some(0) });
        self.task_list_state.select(idx);
    }

    /// Apply the consequences of the last handled input: drop a closed
    /// dialog's draft and service any refresh the form requested.
    fn sync_after_input(&mut self) {
        if !self.edit_open && self.edit_form.take().is_some() {
            tracing::debug!("edit dialog closed");
        }
        if self.router.take() {
            self.refresh_tasks();
        }
    }

    /// Get a reference to the currently selected task.
    fn get_selected_task(&self) -> Option<&Task> {
        self.task_list_state
            .selected()
            .and_then(|i| self.store.tasks().get(i))
    }

    fn set_status_message(&mut self, msg: String) {
        self.status_message = msg;
    }

    fn move_selection(&mut self, down: bool) {
        let len = self.store.tasks().len();
        if len == 0 {
            self.task_list_state.select(None);
            return;
        }
        let next = match self.task_list_state.selected() {
            None => 0,
            Some(i) if down => (i + 1).min(len - 1),
            Some(i) => i.saturating_sub(1),
        };
        self.task_list_state.select(Some(next));
    }

    fn open_selected_for_edit(&mut self) {
        match self.get_selected_task().map(|t| t.id.clone()) {
            Some(id) => {
                self.open_task_for_edit(&id);
            }
            None => self.set_status_message("No task selected".to_string()),
        }
    }

    /// Handle keyboard input on the task list.
    ///
    /// Returns true if the application should quit.
    fn handle_task_list_input(&mut self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(true),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(false),
            KeyCode::Char('e') => self.open_selected_for_edit(),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if self.get_selected_task().is_some() {
                    self.state = AppState::TaskDetail;
                }
            }
            KeyCode::Char('r') => {
                self.refresh_tasks();
                self.set_status_message("Refreshed".to_string());
            }
            KeyCode::Char('h') | KeyCode::F(1) => self.state = AppState::Help,
            _ => {}
        }
        false
    }

    fn handle_detail_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('e') => self.open_selected_for_edit(),
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Backspace => self.state = AppState::TaskList,
            _ => {}
        }
    }

    /// Handle keyboard input while the edit dialog is open.
    fn handle_form_input(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        let Some(form) = self.edit_form.as_mut() else {
            self.edit_open = false;
            return;
        };
        match key {
            KeyCode::Esc => self.edit_open = false,
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.prev_field(),
            KeyCode::Left => form.handle_left_right(false),
            KeyCode::Right => form.handle_left_right(true),
            KeyCode::Backspace => form.handle_backspace(),
            KeyCode::Delete => form.handle_delete(),
            KeyCode::Enter
                if form.current_field == DESCRIPTION_FIELD
                    && modifiers.intersects(KeyModifiers::ALT | KeyModifiers::SHIFT) =>
            {
                form.insert_newline()
            }
            KeyCode::Char('j') if modifiers.contains(KeyModifiers::CONTROL) => form.insert_newline(),
            KeyCode::Enter => self.submit_edit(),
            KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => form.handle_char(c),
            _ => {}
        }
    }

    fn submit_edit(&mut self) {
        let Some(form) = self.edit_form.as_mut() else {
            return;
        };
        let task_id = form.task_id().to_string();
        if form
            .submit(&mut self.store, &mut self.edit_open, &mut self.router)
            .is_ok()
        {
            self.set_status_message(format!("Task {task_id} updated"));
        }
    }

    fn handle_help_input(&mut self) {
        self.state = AppState::TaskList;
    }

    /// Dispatch one key press. Returns true if the application should quit.
    ///
    /// A status message lasts until the next key press.
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        self.status_message.clear();
        let quit = if self.edit_open {
            self.handle_form_input(key, modifiers);
            false
        } else {
            match self.state {
                AppState::TaskList => self.handle_task_list_input(key, modifiers),
                AppState::TaskDetail => {
                    self.handle_detail_input(key);
                    false
                }
                AppState::Help => {
                    self.handle_help_input();
                    false
                }
            }
        };
        self.sync_after_input();
        quit
    }

    /// Poll for and handle a single terminal event.
    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(self.handle_key(key.code, key.modifiers));
                }
            }
        }
        Ok(false)
    }

    /// Render the task table.
    fn render_task_list(&mut self, f: &mut Frame, area: Rect) {
        let header = Row::new(vec!["ID", "Title", "Status", "Assignee", "Priority"])
            .style(Style::default().add_modifier(Modifier::BOLD));

        let rows: Vec<Row> = self
            .store
            .tasks()
            .iter()
            .map(|t| {
                Row::new(vec![
                    Span::raw(t.id.clone()),
                    Span::raw(t.title.clone()),
                    Span::styled(t.status.label(), Style::default().fg(status_color(t.status))),
                    Span::raw(if t.assignee.is_empty() { "-".to_string() } else { t.assignee.clone() }),
                    Span::styled(t.priority.label(), Style::default().fg(priority_color(t.priority))),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(6),
                Constraint::Min(20),
                Constraint::Length(12),
                Constraint::Length(16),
                Constraint::Length(8),
            ],
        )
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("Tasks"))
        .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

        f.render_stateful_widget(table, area, &mut self.task_list_state);
    }

    /// Render every field of the selected task.
    fn render_task_detail(&mut self, f: &mut Frame, area: Rect) {
        let Some(task) = self.get_selected_task() else {
            return;
        };
        let stamp = |ts: i64| {
            Utc.timestamp_opt(ts, 0)
                .single()
                .map_or_else(|| "-".to_string(), |d| d.to_rfc3339())
        };
        let label = |s: &'static str| Span::styled(s, Style::default().add_modifier(Modifier::BOLD));
        let mut lines = vec![
            Line::from(vec![label("ID:          "), Span::raw(task.id.clone())]),
            Line::from(vec![label("Title:       "), Span::raw(task.title.clone())]),
            Line::from(vec![
                label("Status:      "),
                Span::styled(task.status.label(), Style::default().fg(status_color(task.status))),
            ]),
            Line::from(vec![label("Assignee:    "), Span::raw(task.assignee.clone())]),
            Line::from(vec![
                label("Priority:    "),
                Span::styled(task.priority.label(), Style::default().fg(priority_color(task.priority))),
            ]),
            Line::from(vec![label("Created UTC: "), Span::raw(stamp(task.created_at_utc))]),
            Line::from(vec![label("Updated UTC: "), Span::raw(stamp(task.updated_at_utc))]),
            Line::from(""),
            Line::from(label("Description:")),
        ];
        lines.extend(task.description.lines().map(|l| Line::from(l.to_string())));

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Task Details - e: edit, Esc: back")
                    .border_style(Style::default().fg(DARK_GREEN)),
            )
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }

    /// Render the edit dialog on top of whatever is underneath.
    fn render_edit_dialog(&mut self, f: &mut Frame, area: Rect) {
        let Some(form) = self.edit_form.as_ref() else {
            return;
        };

        let dialog = centered_rect(70, 90, area);
        f.render_widget(Clear, dialog);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(Span::styled("Edit Task", Style::default().add_modifier(Modifier::BOLD)));
        let inner = block.inner(dialog);
        f.render_widget(block, dialog);

        let error_height = if form.error().is_some() { 3 } else { 0 };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),                    // Sub-heading
                Constraint::Length(3),                    // Title
                Constraint::Length(DESCRIPTION_ROWS + 2), // Description
                Constraint::Length(3),                    // Status
                Constraint::Length(3),                    // Assignee
                Constraint::Length(3),                    // Priority
                Constraint::Length(error_height),         // Error
                Constraint::Length(3),                    // Save
                Constraint::Min(0),
            ])
            .split(inner);

        let heading = Paragraph::new("Edit or Update Your Task here. Click save when you are done.")
            .style(Style::default().fg(Color::Gray));
        f.render_widget(heading, chunks[0]);

        let focus = |field: usize| {
            if form.current_field == field {
                Style::default().fg(GOLD)
            } else {
                Style::default()
            }
        };

        f.render_widget(text_input(&form.title, "Title", "Title", focus(TITLE_FIELD), chunks[1]), chunks[1]);
        f.render_widget(
            text_input(&form.description, "Description", "Description", focus(DESCRIPTION_FIELD), chunks[2]),
            chunks[2],
        );
        f.render_widget(
            selector(form.status.map(Status::label), "Status", "Task Status", focus(STATUS_FIELD)),
            chunks[3],
        );
        f.render_widget(
            text_input(&form.assignee, "Assignee", "Assignee", focus(ASSIGNEE_FIELD), chunks[4]),
            chunks[4],
        );
        f.render_widget(
            selector(form.priority.map(Priority::label), "Priority", "Task Priority", focus(PRIORITY_FIELD)),
            chunks[5],
        );

        if let Some(err) = form.error() {
            let error = Paragraph::new(err.to_string())
                .alignment(Alignment::Center)
                .style(Style::default().bg(ERROR_BG).fg(Color::White))
                .block(Block::default().borders(Borders::ALL));
            f.render_widget(error, chunks[6]);
        }

        let save_style = if form.current_field == SAVE_BUTTON {
            Style::default().fg(Color::Black).bg(GOLD).add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        let save = Paragraph::new("Save Changes")
            .alignment(Alignment::Center)
            .style(save_style)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(save, chunks[7]);

        let cursor_chunk = match form.current_field {
            TITLE_FIELD => Some(chunks[1]),
            DESCRIPTION_FIELD => Some(chunks[2]),
            ASSIGNEE_FIELD => Some(chunks[4]),
            _ => None,
        };
        if let (Some(chunk), Some(field)) = (cursor_chunk, form.text_field()) {
            let (col, row) = field.cursor_line_col();
            let (scroll_y, scroll_x) = input_scroll(field, chunk);
            f.set_cursor_position((
                chunk.x + 1 + (col as u16).saturating_sub(scroll_x),
                chunk.y + 1 + (row as u16).saturating_sub(scroll_y),
            ));
        }
    }

    /// Render the help screen with keyboard shortcuts.
    fn render_help(&mut self, f: &mut Frame, area: Rect) {
        let bold = |s: &'static str| Line::from(Span::styled(s, Style::default().add_modifier(Modifier::BOLD)));
        let help_text = vec![
            bold("Task List:"),
            Line::from("  ↑/k, ↓/j     Move selection"),
            Line::from("  Enter/Space  View task details"),
            Line::from("  e            Edit selected task"),
            Line::from("  r            Refresh from disk"),
            Line::from("  h/F1         Show this help"),
            Line::from("  q/Esc        Quit"),
            Line::from(""),
            bold("Edit Dialog:"),
            Line::from("  Tab/↓, Shift+Tab/↑  Move between fields"),
            Line::from("  ←/→          Move cursor, or change status/priority"),
            Line::from("  Alt+Enter    New line in description (also Ctrl+J)"),
            Line::from("  Enter        Save changes"),
            Line::from("  Esc          Close without saving"),
        ];

        let paragraph = Paragraph::new(help_text)
            .block(Block::default().borders(Borders::ALL).title("Help - Press any key to return"))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    /// Render the status bar at the bottom of the screen.
    fn render_status_bar(&mut self, f: &mut Frame, area: Rect) {
        let text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else if self.edit_open {
            "Edit Task | Enter: save  Esc: cancel".to_string()
        } else {
            match self.state {
                AppState::TaskList => format!("Tasks: {} | Press 'h' for help", self.store.tasks().len()),
                AppState::TaskDetail => "Task Details".to_string(),
                AppState::Help => "Help".to_string(),
            }
        };
        let status = Paragraph::new(text)
            .style(Style::default().bg(DARK_PURPLE).fg(Color::White))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    /// Main render function that dispatches to the appropriate view.
    pub fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(f.area());

        match self.state {
            AppState::TaskList => self.render_task_list(f, chunks[0]),
            AppState::TaskDetail => self.render_task_detail(f, chunks[0]),
            AppState::Help => self.render_help(f, chunks[0]),
        }
        if self.edit_open {
            self.render_edit_dialog(f, chunks[0]);
        }

        self.render_status_bar(f, chunks[1]);
    }

    /// Main event loop for the TUI application.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}

/// First visible offset along one axis so that `cursor` stays inside `visible` cells.
fn scroll_for(cursor: usize, visible: u16) -> u16 {
    let visible = usize::from(visible.max(1));
    u16::try_from((cursor + 1).saturating_sub(visible)).unwrap_or(u16::MAX)
}

/// `(vertical, horizontal)` scroll that keeps the cursor of `field` inside the
/// bordered `area`.
fn input_scroll(field: &InputField, area: Rect) -> (u16, u16) {
    let (col, row) = field.cursor_line_col();
    (
        scroll_for(row, area.height.saturating_sub(2)),
        scroll_for(col, area.width.saturating_sub(2)),
    )
}

/// Bordered text input, showing `placeholder` when empty. Long text is not
/// wrapped; it scrolls to follow the cursor.
fn text_input<'a>(
    field: &'a InputField,
    title: &'a str,
    placeholder: &'a str,
    border: Style,
    area: Rect,
) -> Paragraph<'a> {
    let body = if field.value.is_empty() {
        Paragraph::new(Span::styled(placeholder, Style::default().fg(Color::DarkGray)))
    } else {
        Paragraph::new(field.value.as_str()).scroll(input_scroll(field, area))
    };
    body.block(Block::default().borders(Borders::ALL).title(title).border_style(border))
}

/// Bordered `< value >` selector, showing `placeholder` when nothing is chosen.
fn selector<'a>(value: Option<&'a str>, title: &'a str, placeholder: &'a str, border: Style) -> Paragraph<'a> {
    let body = match value {
        Some(v) => Line::from(format!("< {v} >")),
        None => Line::from(Span::styled(format!("< {placeholder} >"), Style::default().fg(Color::DarkGray))),
    };
    Paragraph::new(body).block(Block::default().borders(Borders::ALL).title(title).border_style(border))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskUpdate;
    use ratatui::backend::TestBackend;

    fn seeded_app() -> (tempfile::TempDir, App) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        let mut store = JsonStore::open(&path).unwrap();
        store
            .add_task(TaskUpdate {
                title: "Fix bug".into(),
                description: "Null pointer".into(),
                status: Status::Pending,
                assignee: "alice".into(),
                priority: Priority::P1,
            })
            .unwrap();
        let app = App::new(&path).unwrap();
        (dir, app)
    }

    fn press(app: &mut App, key: KeyCode) -> bool {
        app.handle_key(key, KeyModifiers::NONE)
    }

    fn render_to_string(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 48)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        let buf = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_edit_status_through_dialog_saves_and_closes() {
        let (_dir, mut app) = seeded_app();
        press(&mut app, KeyCode::Char('e'));
        assert!(app.is_editing());

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);

        assert!(!app.is_editing());
        assert!(app.edit_form().is_none());
        assert_eq!(app.status_message(), "Task t1 updated");

        let on_disk = JsonStore::open(app.store.path()).unwrap();
        assert_eq!(on_disk.get("t1").unwrap().status, Status::InProgress);
        assert_eq!(app.store.get("t1").unwrap().status, Status::InProgress);
    }

    #[test]
    fn test_invalid_edit_shows_error_in_dialog() {
        let (_dir, mut app) = seeded_app();
        press(&mut app, KeyCode::Char('e'));
        for _ in 0..3 {
            press(&mut app, KeyCode::Tab);
        }
        for _ in 0.."alice".len() {
            press(&mut app, KeyCode::Backspace);
        }
        press(&mut app, KeyCode::Enter);

        assert!(app.is_editing());
        let screen = render_to_string(&mut app);
        assert!(screen.contains("Edit Task"));
        assert!(screen.contains("Please select an assignee for the task"));
        assert!(screen.contains("Save Changes"));

        let on_disk = JsonStore::open(app.store.path()).unwrap();
        assert_eq!(on_disk.get("t1").unwrap().assignee, "alice");
    }

    #[test]
    fn test_escape_discards_draft() {
        let (_dir, mut app) = seeded_app();
        press(&mut app, KeyCode::Char('e'));
        press(&mut app, KeyCode::Char('!'));
        assert!(!press(&mut app, KeyCode::Esc));
        assert!(!app.is_editing());
        assert!(app.edit_form().is_none());
        assert_eq!(app.store.get("t1").unwrap().title, "Fix bug");

        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.edit_form().unwrap().title.value, "Fix bug");
    }

    #[test]
    fn test_dialog_renders_fields_and_options() {
        let (_dir, mut app) = seeded_app();
        assert!(app.open_task_for_edit("t1"));
        let screen = render_to_string(&mut app);
        assert!(screen.contains("Edit or Update Your Task here. Click save when you are done."));
        assert!(screen.contains("< Pending >"));
        assert!(screen.contains("< P1 >"));
        assert!(screen.contains("Null pointer"));
        assert!(!screen.contains("Please"));
    }

    #[test]
    fn test_open_unknown_task_reports() {
        let (_dir, mut app) = seeded_app();
        assert!(!app.open_task_for_edit("t99"));
        assert!(!app.is_editing());
        assert_eq!(app.status_message(), "Task t99 not found");
    }

    #[test]
    fn test_saving_keeps_tasks_written_elsewhere() {
        let (_dir, mut app) = seeded_app();
        let mut other = JsonStore::open(app.store.path()).unwrap();
        other
            .add_task(TaskUpdate {
                title: "Ship release".into(),
                description: "Tag and publish".into(),
                status: Status::Completed,
                assignee: "bob".into(),
                priority: Priority::P0,
            })
            .unwrap();
        assert_eq!(app.store.tasks().len(), 1);

        press(&mut app, KeyCode::Char('e'));
        press(&mut app, KeyCode::Enter);

        assert!(!app.is_editing());
        let ids: Vec<&str> = app.store.tasks().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["t1", "t2"]);
    }

    #[test]
    fn test_submit_refresh_reloads_store_from_disk() {
        let (_dir, mut app) = seeded_app();
        press(&mut app, KeyCode::Char('e'));
        let form = app.edit_form.as_mut().unwrap();
        form.submit(&mut app.store, &mut app.edit_open, &mut app.router).unwrap();
        assert_eq!(app.router.pending(), 1);

        let mut other = JsonStore::open(app.store.path()).unwrap();
        other
            .add_task(TaskUpdate {
                title: "Late arrival".into(),
                description: "Written after save".into(),
                status: Status::Pending,
                assignee: "carol".into(),
                priority: Priority::P2,
            })
            .unwrap();
        assert_eq!(app.store.tasks().len(), 1);

        app.sync_after_input();
        assert!(app.edit_form().is_none());
        assert_eq!(app.router.pending(), 0);
        assert_eq!(app.store.get("t2").unwrap().title, "Late arrival");
    }

    #[test]
    fn test_long_description_scrolls_to_cursor() {
        let (_dir, mut app) = seeded_app();
        assert!(app.open_task_for_edit("t1"));
        let form = app.edit_form.as_mut().unwrap();
        form.description = InputField::with_value("one\ntwo\nthree\nfour\nfive\nsix\nLASTLINE");
        form.next_field();

        let screen = render_to_string(&mut app);
        assert!(screen.contains("LASTLINE"));
        assert!(screen.contains("three"));
        assert!(!screen.contains("two"));
    }

    #[test]
    fn test_long_title_scrolls_horizontally() {
        let (_dir, mut app) = seeded_app();
        assert!(app.open_task_for_edit("t1"));
        let long = format!("{}TAILEND", "x".repeat(150));
        app.edit_form.as_mut().unwrap().title = InputField::with_value(&long);

        let screen = render_to_string(&mut app);
        assert!(screen.contains("TAILEND"));
    }

    #[test]
    fn test_scroll_keeps_cursor_visible() {
        let area = Rect::new(0, 0, 12, 4);
        let mut field = InputField::with_value("a\nb\nc\nd");
        assert_eq!(input_scroll(&field, area), (2, 0));
        field.cursor = 0;
        assert_eq!(input_scroll(&field, area), (0, 0));
        let wide = InputField::with_value("abcdefghijklmn");
        assert_eq!(input_scroll(&wide, area), (0, 5));
    }

    #[test]
    fn test_control_chords_do_not_type() {
        let (_dir, mut app) = seeded_app();
        press(&mut app, KeyCode::Char('e'));
        app.handle_key(KeyCode::Char('s'), KeyModifiers::CONTROL);
        app.handle_key(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.edit_form().unwrap().title.value, "Fix bug");
        app.handle_key(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert_eq!(app.edit_form().unwrap().title.value, "Fix bugA");
    }

    #[test]
    fn test_status_message_clears_on_next_key() {
        let (_dir, mut app) = seeded_app();
        press(&mut app, KeyCode::Char('e'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.status_message(), "Task t1 updated");

        press(&mut app, KeyCode::Down);
        assert_eq!(app.status_message(), "");
        assert!(render_to_string(&mut app).contains("Tasks: 1 | Press 'h' for help"));
    }

    #[test]
    fn test_quit_from_task_list() {
        let (_dir, mut app) = seeded_app();
        assert!(press(&mut app, KeyCode::Char('q')));
    }
}
