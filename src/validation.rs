//! Ordered validation rules for a task draft.
//!
//! Rules run in a fixed order and the first failing rule wins; only that one
//! message is ever reported.

use crate::fields::{Priority, Status};
use crate::task::TaskUpdate;

/// Minimum length of title and description, in UTF-16 code units.
pub const MIN_TEXT_LEN: usize = 3;

/// Borrowed view of the draft values being validated.
#[derive(Debug, Clone, Copy)]
pub struct TaskDraft<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub status: Option<Status>,
    pub assignee: &'a str,
    pub priority: Option<Priority>,
}

/// The single rule a draft failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter a title with at least 3 characters")]
    TitleTooShort,
    #[error("Please enter a description with at least 3 characters")]
    DescriptionTooShort,
    #[error("Please select a status for the task")]
    MissingStatus,
    #[error("Please select an assignee for the task")]
    MissingAssignee,
    #[error("Please select a priority for the task")]
    MissingPriority,
}

type Rule = (fn(&TaskDraft<'_>) -> bool, ValidationError);

fn title_long_enough(d: &TaskDraft<'_>) -> bool {
    d.title.encode_utf16().count() >= MIN_TEXT_LEN
}

fn description_long_enough(d: &TaskDraft<'_>) -> bool {
    d.description.encode_utf16().count() >= MIN_TEXT_LEN
}

fn has_status(d: &TaskDraft<'_>) -> bool {
    d.status.is_some()
}

fn has_assignee(d: &TaskDraft<'_>) -> bool {
    !d.assignee.is_empty()
}

fn has_priority(d: &TaskDraft<'_>) -> bool {
    d.priority.is_some()
}

/// Predicates that must hold, in evaluation order.
pub const RULES: [Rule; 5] = [
    (title_long_enough, ValidationError::TitleTooShort),
    (description_long_enough, ValidationError::DescriptionTooShort),
    (has_status, ValidationError::MissingStatus),
    (has_assignee, ValidationError::MissingAssignee),
    (has_priority, ValidationError::MissingPriority),
];

/// Check a draft and build the update payload if every rule passes.
pub fn validate(draft: &TaskDraft<'_>) -> Result<TaskUpdate, ValidationError> {
    if let Some((_, err)) = RULES.iter().find(|(holds, _)| !holds(draft)) {
        return Err(*err);
    }
    match (draft.status, draft.priority) {
        (Some(status), Some(priority)) => Ok(TaskUpdate {
            title: draft.title.to_string(),
            description: draft.description.to_string(),
            status,
            assignee: draft.assignee.to_string(),
            priority,
        }),
        (None, _) => Err(ValidationError::MissingStatus),
        (_, None) => Err(ValidationError::MissingPriority),
    }
}
