//! Task data structure and the update payload applied by the edit form.

use serde::{Deserialize, Serialize};

use crate::fields::{Priority, Status};

/// A tracked work item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: Status,
    #[serde(default)]
    pub assignee: String,
    pub priority: Priority,
    pub created_at_utc: i64,
    pub updated_at_utc: i64,
}

/// Full set of editable values proposed for an existing task.
///
/// Only produced once validation has passed, so every field is concrete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskUpdate {
    pub title: String,
    pub description: String,
    pub status: Status,
    pub assignee: String,
    pub priority: Priority,
}

impl Task {
    /// Overwrite the editable fields and stamp the update time.
    pub fn apply(&mut self, update: TaskUpdate, now_utc: i64) {
        self.title = update.title;
        self.description = update.description;
        self.status = update.status;
        self.assignee = update.assignee;
        self.priority = update.priority;
        self.updated_at_utc = now_utc;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_overwrites_all_editable_fields() {
        let mut task = Task {
            id: "t1".into(),
            title: "Fix bug".into(),
            description: "Null pointer".into(),
            status: Status::Pending,
            assignee: "alice".into(),
            priority: Priority::P1,
            created_at_utc: 10,
            updated_at_utc: 10,
        };
        task.apply(
            TaskUpdate {
                title: "Fix crash".into(),
                description: "Null deref in parser".into(),
                status: Status::Completed,
                assignee: "bob".into(),
                priority: Priority::P0,
            },
            42,
        );
        assert_eq!(task.id, "t1");
        assert_eq!(task.title, "Fix crash");
        assert_eq!(task.status, Status::Completed);
        assert_eq!(task.assignee, "bob");
        assert_eq!(task.priority, Priority::P0);
        assert_eq!(task.created_at_utc, 10);
        assert_eq!(task.updated_at_utc, 42);
    }

    #[test]
    fn test_missing_optional_text_defaults_to_empty() {
        let json = r#"{"id":"t9","title":"Ship it","status":"deployed","priority":"p2",
                       "created_at_utc":1,"updated_at_utc":2}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.description, "");
        assert_eq!(task.assignee, "");
        assert_eq!(task.status, Status::Deployed);
    }
}
