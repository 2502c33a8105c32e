use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
};
use todosync_app::{Dispatched, Notice, NoticeLevel, Operation, OperationOutcome};
use todosync_core::{Task, TaskId, TaskViews};
use todosync_store::KeyValueStore;

use super::app::App;
use super::constants::{ACTIVE_LIST_PERCENT, HEADER_HEIGHT, INPUT_ROW_HEIGHT, MAIN_MIN_HEIGHT, STATUS_HEIGHT};
use super::input::TextInput;

/// Which widget receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Focus {
    /// Browsing the active list.
    List,
    /// Editing the search field.
    Search,
    /// Editing the create field.
    Create,
}

impl Focus {
    pub(super) const fn next(self) -> Self {
        match self {
            Self::List => Self::Search,
            Self::Search => Self::Create,
            Self::Create => Self::List,
        }
    }

    pub(super) const fn prev(self) -> Self {
        match self {
            Self::List => Self::Create,
            Self::Search => Self::List,
            Self::Create => Self::Search,
        }
    }
}

/// History list shown next to the active tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum HistoryTab {
    Completed,
    Deleted,
}

impl HistoryTab {
    pub(super) const fn toggle(self) -> Self {
        match self {
            Self::Completed => Self::Deleted,
            Self::Deleted => Self::Completed,
        }
    }

    pub(super) const fn label(self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::Deleted => "Deleted",
        }
    }
}

pub(super) struct Ui<K> {
    pub(super) app: App<K>,
    pub(super) focus: Focus,
    pub(super) history: HistoryTab,
    pub(super) search: TextInput,
    pub(super) create: TextInput,
    /// Index into the visible active list.
    pub(super) selected: usize,
    /// A create was submitted and has not reported back.
    pub(super) creating: bool,
    pub(super) notice: Option<Notice>,
    /// Cap on rendered active tasks.
    pub(super) active_list_limit: Option<usize>,
    pub(super) should_quit: bool,
}

impl<K: KeyValueStore + 'static> Ui<K> {
    pub(super) fn new(app: App<K>, active_list_limit: Option<usize>) -> Self {
        Self {
            app,
            focus: Focus::List,
            history: HistoryTab::Completed,
            search: TextInput::default(),
            create: TextInput::default(),
            selected: 0,
            creating: false,
            notice: None,
            active_list_limit,
            should_quit: false,
        }
    }

    pub(super) fn views(&self) -> TaskViews<'_> {
        TaskViews::derive(&self.app.tasks, self.search.as_str())
    }

    /// Active tasks as rendered, after the display cap.
    pub(super) fn visible_active(&self) -> Vec<&Task> {
        let mut active = self.views().active;
        if let Some(limit) = self.active_list_limit {
            active.truncate(limit);
        }
        active
    }

    pub(super) fn selected_task_id(&self) -> Option<TaskId> {
        self.visible_active().get(self.selected).map(|task| task.id)
    }

    pub(super) fn select_next(&mut self) {
        let len = self.visible_active().len();
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub(super) const fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub(super) fn clamp_selection(&mut self) {
        let len = self.visible_active().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    pub(super) fn draw(&self, f: &mut Frame<'_>) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Length(INPUT_ROW_HEIGHT),
                Constraint::Min(MAIN_MIN_HEIGHT),
                Constraint::Length(STATUS_HEIGHT),
            ])
            .split(f.area());

        let views = self.views();
        self.draw_header(f, rows[0], views.counts);
        self.draw_inputs(f, rows[1]);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(ACTIVE_LIST_PERCENT),
                Constraint::Percentage(100 - ACTIVE_LIST_PERCENT),
            ])
            .split(rows[2]);
        self.draw_task_list(f, columns[0]);
        self.draw_history(f, columns[1], &views);

        self.draw_status(f, rows[3]);
    }

    /// Apply finished operations and refresh the task snapshot.
    pub(super) fn refresh(&mut self) {
        let finished = self.app.poll();
        self.apply_results(finished);
    }

    pub(super) fn apply_results(&mut self, finished: Vec<Dispatched>) {
        for dispatched in finished {
            if dispatched.operation == Operation::Create {
                self.creating = false;
                if matches!(dispatched.result, Ok(OperationOutcome::Created(_))) {
                    self.create.clear();
                }
            }
            if let Some(notice) = dispatched.notice {
                self.notice = Some(notice);
            }
        }
        self.clamp_selection();
    }

    pub(super) fn error(&mut self, text: impl Into<String>) {
        let duration = self.app.service().options().notice_duration;
        self.notice = Some(Notice::error(text, duration));
    }

    pub(super) fn tick(&mut self) {
        if self.notice.as_ref().is_some_and(Notice::is_expired) {
            self.notice = None;
        }
    }

    /// Wait for every dispatched operation and apply its result.
    pub(super) fn settle(&mut self) {
        let finished = self.app.wait_for_pending();
        self.apply_results(finished);
    }
}

pub(super) fn notice_style(notice: &Notice) -> Style {
    match notice.level {
        NoticeLevel::Success => Style::default().fg(Color::Green),
        NoticeLevel::Error => Style::default().fg(Color::Red),
    }
}
