//! Color constants for the terminal user interface.

use ratatui::style::Color;

use crate::fields::{Priority, Status};

/// Focus highlight for the active form field.
pub const GOLD: Color = Color::Rgb(255, 215, 0);
/// Background of the inline error region.
pub const ERROR_BG: Color = Color::Rgb(114, 0, 0);
pub const DARK_GREEN: Color = Color::Rgb(0, 80, 0);
pub const DARK_PURPLE: Color = Color::Rgb(86, 60, 92);

/// Foreground used for a status in the task list.
pub fn status_color(s: Status) -> Color {
    match s {
        Status::Pending => Color::Gray,
        Status::InProgress => GOLD,
        Status::Completed => Color::Green,
        Status::Deployed => Color::Cyan,
    }
}

pub fn priority_color(p: Priority) -> Color {
    match p {
        Priority::P0 => Color::Red,
        Priority::P1 => Color::Yellow,
        Priority::P2 => Color::Gray,
    }
}
