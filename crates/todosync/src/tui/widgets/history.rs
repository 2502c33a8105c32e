use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};
use time::OffsetDateTime;
use todosync_core::{Task, TaskViews};
use todosync_store::KeyValueStore;

use crate::format::format_date;

use super::super::view::{HistoryTab, Ui};
use super::util::{inner_width, truncate_with_ellipsis};

const DATE_COLUMN_WIDTH: usize = 13;

impl<K: KeyValueStore + 'static> Ui<K> {
    pub(in crate::tui) fn draw_history(&self, f: &mut Frame<'_>, area: Rect, views: &TaskViews<'_>) {
        let tasks = match self.history {
            HistoryTab::Completed => views.completed.as_slice(),
            HistoryTab::Deleted => views.deleted.as_slice(),
        };
        let width = inner_width(area, DATE_COLUMN_WIDTH);

        let items: Vec<ListItem<'_>> = if tasks.is_empty() {
            vec![ListItem::new(Line::from(Span::styled(
                format!("No {} tasks", self.history.label().to_lowercase()),
                Style::default().fg(Color::DarkGray),
            )))]
        } else {
            tasks
                .iter()
                .map(|task| {
                    let date = history_stamp(self.history, task).map(format_date).unwrap_or_default();
                    ListItem::new(Line::from(vec![
                        Span::raw(truncate_with_ellipsis(&task.title, width).into_owned()),
                        Span::styled(format!("  {date}"), Style::default().fg(Color::DarkGray)),
                    ]))
                })
                .collect()
        };

        let title = format!("{} ({}) [h]", self.history.label(), tasks.len());
        let list = List::new(items).block(Block::default().title(title).borders(Borders::ALL));
        f.render_widget(list, area);
    }
}

const fn history_stamp(tab: HistoryTab, task: &Task) -> Option<OffsetDateTime> {
    match tab {
        HistoryTab::Completed => task.completed_at,
        HistoryTab::Deleted => task.deleted_at,
    }
}
