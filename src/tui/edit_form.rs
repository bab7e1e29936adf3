//! Edit dialog form for an existing task.
//!
//! The form copies the task's editable fields once, at construction, into a
//! local draft. Later changes to the task are not mirrored into an open form.
//! On a successful submit the draft is handed to the store, wiped, the host's
//! open flag is toggled and a refresh is requested.

use crate::{
    fields::{cycle, Priority, Status},
    router::Navigator,
    store::TaskStore,
    task::Task,
    tui::input::InputField,
    validation::{validate, TaskDraft, ValidationError},
};

/// Focus order for the edit dialog.
pub const TITLE_FIELD: usize = 0;
pub const DESCRIPTION_FIELD: usize = 1;
pub const STATUS_FIELD: usize = 2;
pub const ASSIGNEE_FIELD: usize = 3;
pub const PRIORITY_FIELD: usize = 4;
pub const SAVE_BUTTON: usize = 5;

const FIELD_COUNT: usize = 6;

/// Values the host hands the form when opening it.
///
/// Status and priority arrive as their wire strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTaskProps {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: String,
    pub assignee: String,
    pub priority: String,
}

impl EditTaskProps {
    /// Snapshot the editable fields of a stored task.
    pub fn from_task(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status.as_str().to_string(),
            assignee: task.assignee.clone(),
            priority: task.priority.as_str().to_string(),
        }
    }
}

/// The one message shown in the dialog's error region.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("Could not save task: {0}")]
    Store(String),
}

/// Local, uncommitted copy of a task's editable fields.
#[derive(Debug, Clone)]
pub struct EditTaskForm {
    task_id: String,
    pub title: InputField,
    pub description: InputField,
    pub status: Option<Status>,
    pub assignee: InputField,
    pub priority: Option<Priority>,
    pub current_field: usize,
    error: Option<FormError>,
}

impl EditTaskForm {
    /// Build the draft from the host's props.
    ///
    /// A status or priority string naming no known value becomes an empty
    /// selection, which submit then rejects.
    pub fn new(props: &EditTaskProps) -> Self {
        let mut form = Self {
            task_id: props.id.clone(),
            title: InputField::with_value(&props.title),
            description: InputField::with_value(&props.description),
            status: props.status.parse().ok(),
            assignee: InputField::with_value(&props.assignee),
            priority: props.priority.parse().ok(),
            current_field: TITLE_FIELD,
            error: None,
        };
        form.update_active_field();
        form
    }

    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    /// The error currently displayed, if any.
    pub fn error(&self) -> Option<&FormError> {
        self.error.as_ref()
    }

    /// Borrow the draft values for validation.
    pub fn draft(&self) -> TaskDraft<'_> {
        TaskDraft {
            title: &self.title.value,
            description: &self.description.value,
            status: self.status,
            assignee: &self.assignee.value,
            priority: self.priority,
        }
    }

    /// Validate and, if valid, save through `store`.
    ///
    /// On success the draft is emptied, the error cleared, `open` toggled and
    /// exactly one refresh requested. On failure the error is recorded and
    /// nothing else changes.
    pub fn submit<S, N>(&mut self, store: &mut S, open: &mut bool, navigator: &mut N) -> Result<(), FormError>
    where
        S: TaskStore + ?Sized,
        N: Navigator + ?Sized,
    {
        let update = match validate(&self.draft()) {
            Ok(update) => update,
            Err(rule) => {
                tracing::debug!(task = %self.task_id, %rule, "edit rejected");
                return Err(self.fail(rule.into()));
            }
        };

        if let Err(e) = store.edit_task(&self.task_id, update) {
            tracing::warn!(task = %self.task_id, error = %e, "store rejected edit");
            return Err(self.fail(FormError::Store(e.to_string())));
        }

        self.reset();
        *open = !*open;
        navigator.refresh();
        Ok(())
    }

    fn fail(&mut self, err: FormError) -> FormError {
        self.error = Some(err.clone());
        err
    }

    /// Empty every draft field and clear the error.
    pub fn reset(&mut self) {
        self.title.clear();
        self.description.clear();
        self.status = None;
        self.assignee.clear();
        self.priority = None;
        self.error = None;
    }

    fn text_field_mut(&mut self) -> Option<&mut InputField> {
        match self.current_field {
            TITLE_FIELD => Some(&mut self.title),
            DESCRIPTION_FIELD => Some(&mut self.description),
            ASSIGNEE_FIELD => Some(&mut self.assignee),
            _ => None,
        }
    }

    /// The focused text input, if focus is on one.
    pub fn text_field(&self) -> Option<&InputField> {
        match self.current_field {
            TITLE_FIELD => Some(&self.title),
            DESCRIPTION_FIELD => Some(&self.description),
            ASSIGNEE_FIELD => Some(&self.assignee),
            _ => None,
        }
    }

    /// Move to the next field in the form.
    pub fn next_field(&mut self) {
        self.current_field = (self.current_field + 1) % FIELD_COUNT;
        self.update_active_field();
    }

    /// Move to the previous field in the form.
    pub fn prev_field(&mut self) {
        self.current_field = if self.current_field == 0 {
            FIELD_COUNT - 1
        } else {
            self.current_field - 1
        };
        self.update_active_field();
    }

    /// Update which field is currently active for editing.
    pub fn update_active_field(&mut self) {
        self.title.active = self.current_field == TITLE_FIELD;
        self.description.active = self.current_field == DESCRIPTION_FIELD;
        self.assignee.active = self.current_field == ASSIGNEE_FIELD;
    }

    /// Handle character input for the currently active field.
    pub fn handle_char(&mut self, c: char) {
        if let Some(field) = self.text_field_mut() {
            field.handle_char(c);
        }
    }

    /// Handle backspace input for the currently active field.
    pub fn handle_backspace(&mut self) {
        match self.current_field {
            STATUS_FIELD => self.status = None,
            PRIORITY_FIELD => self.priority = None,
            _ => {
                if let Some(field) = self.text_field_mut() {
                    field.handle_backspace();
                }
            }
        }
    }

    /// Handle delete input for the currently active field.
    pub fn handle_delete(&mut self) {
        if let Some(field) = self.text_field_mut() {
            field.handle_delete();
        }
    }

    /// Insert a line break; only the description is multi-line.
    pub fn insert_newline(&mut self) {
        if self.current_field == DESCRIPTION_FIELD {
            self.description.handle_char('\n');
        }
    }

    /// Handle left/right arrow keys for cursor movement or selector changes.
    pub fn handle_left_right(&mut self, right: bool) {
        match self.current_field {
            STATUS_FIELD => self.status = cycle(&Status::ALL, self.status, right),
            PRIORITY_FIELD => self.priority = cycle(&Priority::ALL, self.priority, right),
            _ => {
                if let Some(field) = self.text_field_mut() {
                    if right {
                        field.move_cursor_right();
                    } else {
                        field.move_cursor_left();
                    }
                }
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::store::StoreError;
    use crate::task::TaskUpdate;

    /// Store double that records every edit it is asked to make.
    #[derive(Default)]
    pub(crate) struct RecordingStore {
        pub tasks: Vec<Task>,
        pub edits: Vec<(String, TaskUpdate)>,
        pub fail: bool,
    }

    impl TaskStore for RecordingStore {
        fn tasks(&self) -> &[Task] {
            &self.tasks
        }

        fn edit_task(&mut self, id: &str, update: TaskUpdate) -> Result<(), StoreError> {
            if self.fail {
                return Err(StoreError::NotFound(id.to_string()));
            }
            self.edits.push((id.to_string(), update));
            Ok(())
        }
    }

    #[derive(Default)]
    pub(crate) struct RecordingNavigator {
        pub refreshes: usize,
    }

    impl Navigator for RecordingNavigator {
        fn refresh(&mut self) {
            self.refreshes += 1;
        }
    }

    fn props() -> EditTaskProps {
        EditTaskProps {
            id: "t1".into(),
            title: "Fix bug".into(),
            description: "Null pointer".into(),
            status: "pending".into(),
            assignee: "alice".into(),
            priority: "p1".into(),
        }
    }

    fn focus(form: &mut EditTaskForm, field: usize) {
        while form.current_field != field {
            form.next_field();
        }
    }

    fn assert_draft_empty(form: &EditTaskForm) {
        assert_eq!(form.title.value, "");
        assert_eq!(form.description.value, "");
        assert_eq!(form.status, None);
        assert_eq!(form.assignee.value, "");
        assert_eq!(form.priority, None);
    }

    #[test]
    fn test_mount_copies_props_verbatim() {
        let a = EditTaskForm::new(&props());
        let b = EditTaskForm::new(&props());
        for form in [&a, &b] {
            assert_eq!(form.task_id(), "t1");
            assert_eq!(form.title.value, "Fix bug");
            assert_eq!(form.description.value, "Null pointer");
            assert_eq!(form.status, Some(Status::Pending));
            assert_eq!(form.assignee.value, "alice");
            assert_eq!(form.priority, Some(Priority::P1));
            assert!(form.error().is_none());
        }
    }

    #[test]
    fn test_change_status_and_submit_saves_once() {
        let mut form = EditTaskForm::new(&props());
        let mut store = RecordingStore::default();
        let mut nav = RecordingNavigator::default();
        let mut open = true;

        focus(&mut form, STATUS_FIELD);
        form.handle_left_right(true);
        assert_eq!(form.status, Some(Status::InProgress));

        form.submit(&mut store, &mut open, &mut nav).unwrap();

        assert_eq!(
            store.edits,
            vec![(
                "t1".to_string(),
                TaskUpdate {
                    title: "Fix bug".into(),
                    description: "Null pointer".into(),
                    status: Status::InProgress,
                    assignee: "alice".into(),
                    priority: Priority::P1,
                }
            )]
        );
        assert!(!open);
        assert_eq!(nav.refreshes, 1);
        assert!(form.error().is_none());
        assert_draft_empty(&form);
    }

    #[test]
    fn test_cleared_assignee_keeps_dialog_open() {
        let mut form = EditTaskForm::new(&props());
        let mut store = RecordingStore::default();
        let mut nav = RecordingNavigator::default();
        let mut open = true;

        focus(&mut form, ASSIGNEE_FIELD);
        for _ in 0.."alice".len() {
            form.handle_backspace();
        }

        let err = form.submit(&mut store, &mut open, &mut nav).unwrap_err();
        assert_eq!(err.to_string(), "Please select an assignee for the task");
        assert_eq!(form.error(), Some(&FormError::Invalid(ValidationError::MissingAssignee)));
        assert!(store.edits.is_empty());
        assert!(open);
        assert_eq!(nav.refreshes, 0);
        assert_eq!(form.title.value, "Fix bug");
    }

    #[test]
    fn test_short_title_wins_over_other_failures() {
        let mut form = EditTaskForm::new(&EditTaskProps {
            id: "t2".into(),
            title: "ab".into(),
            description: "".into(),
            status: "".into(),
            assignee: "".into(),
            priority: "".into(),
        });
        let mut store = RecordingStore::default();
        let mut nav = RecordingNavigator::default();
        let mut open = true;

        let err = form.submit(&mut store, &mut open, &mut nav).unwrap_err();
        assert_eq!(err, FormError::Invalid(ValidationError::TitleTooShort));
        assert!(open);
    }

    #[test]
    fn test_unknown_status_prop_is_rejected_on_submit() {
        let mut p = props();
        p.status = "done".into();
        let mut form = EditTaskForm::new(&p);
        assert_eq!(form.status, None);

        let mut open = true;
        let err = form
            .submit(&mut RecordingStore::default(), &mut open, &mut RecordingNavigator::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "Please select a status for the task");
    }

    #[test]
    fn test_fixing_the_draft_clears_previous_error() {
        let mut form = EditTaskForm::new(&props());
        let mut store = RecordingStore::default();
        let mut nav = RecordingNavigator::default();
        let mut open = true;

        focus(&mut form, PRIORITY_FIELD);
        form.handle_backspace();
        assert!(form.submit(&mut store, &mut open, &mut nav).is_err());
        assert!(form.error().is_some());

        form.handle_left_right(false);
        assert_eq!(form.priority, Some(Priority::P2));
        form.submit(&mut store, &mut open, &mut nav).unwrap();
        assert!(form.error().is_none());
        assert_eq!(store.edits.len(), 1);
    }

    #[test]
    fn test_store_failure_keeps_draft_and_dialog() {
        let mut form = EditTaskForm::new(&props());
        let mut store = RecordingStore { fail: true, ..Default::default() };
        let mut nav = RecordingNavigator::default();
        let mut open = true;

        let err = form.submit(&mut store, &mut open, &mut nav).unwrap_err();
        assert_eq!(err.to_string(), "Could not save task: task 't1' not found");
        assert!(open);
        assert_eq!(nav.refreshes, 0);
        assert_eq!(form.title.value, "Fix bug");
        assert_eq!(form.priority, Some(Priority::P1));
    }

    #[test]
    fn test_draft_does_not_follow_later_task_changes() {
        let mut task = Task {
            id: "t1".into(),
            title: "Fix bug".into(),
            description: "Null pointer".into(),
            status: Status::Pending,
            assignee: "alice".into(),
            priority: Priority::P1,
            created_at_utc: 0,
            updated_at_utc: 0,
        };
        let form = EditTaskForm::new(&EditTaskProps::from_task(&task));
        task.title = "Renamed elsewhere".into();
        assert_eq!(form.title.value, "Fix bug");
    }

    #[test]
    fn test_focus_cycles_through_save_button() {
        let mut form = EditTaskForm::new(&props());
        assert!(form.title.active);
        form.prev_field();
        assert_eq!(form.current_field, SAVE_BUTTON);
        assert!(form.text_field().is_none());
        form.next_field();
        form.next_field();
        assert_eq!(form.current_field, DESCRIPTION_FIELD);
        assert!(form.description.active && !form.title.active);
    }

    #[test]
    fn test_newline_only_in_description() {
        let mut form = EditTaskForm::new(&props());
        form.insert_newline();
        assert_eq!(form.title.value, "Fix bug");
        form.next_field();
        form.insert_newline();
        form.handle_char('x');
        assert_eq!(form.description.value, "Null pointer\nx");
    }

    #[test]
    fn test_typing_on_selector_is_ignored() {
        let mut form = EditTaskForm::new(&props());
        focus(&mut form, STATUS_FIELD);
        form.handle_char('z');
        form.handle_delete();
        assert_eq!(form.status, Some(Status::Pending));
        assert_eq!(form.title.value, "Fix bug");
    }
}
