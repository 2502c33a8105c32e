//! Shared constants for the TUI to keep layout and labels in sync.

/// Application name shown in the header.
pub const APP_TITLE: &str = "TodoSync";
/// Height of the header with the counts card.
pub const HEADER_HEIGHT: u16 = 3;
/// Height of the search and create input row.
pub const INPUT_ROW_HEIGHT: u16 = 3;
/// Minimum height of the task lists.
pub const MAIN_MIN_HEIGHT: u16 = 5;
/// Height of the status line.
pub const STATUS_HEIGHT: u16 = 3;
/// Width percentage of the active list; the history pane takes the rest.
pub const ACTIVE_LIST_PERCENT: u16 = 60;
/// Highlight symbol shown beside selected list entries.
pub const TASK_LIST_HIGHLIGHT_SYMBOL: &str = "▶ ";
/// Placeholder shown when no tasks exist at all.
pub const EMPTY_LIST_MESSAGE: &str = "Create a task!";
/// Placeholder shown when the search hides every active task.
pub const NO_MATCH_MESSAGE: &str = "No tasks match the search";
/// Client-side message for an empty create submission.
pub const EMPTY_TITLE_MESSAGE: &str = "Enter a title for the task";
