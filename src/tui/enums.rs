//! Enumerations for TUI state management.

/// Screen currently shown underneath any open dialog.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AppState {
    TaskList,
    TaskDetail,
    Help,
}
