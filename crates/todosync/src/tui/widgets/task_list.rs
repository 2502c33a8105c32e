use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};
use todosync_store::KeyValueStore;

use crate::format::format_date;

use super::super::constants::{EMPTY_LIST_MESSAGE, NO_MATCH_MESSAGE, TASK_LIST_HIGHLIGHT_SYMBOL};
use super::super::view::{Focus, Ui};
use super::util::{inner_width, truncate_with_ellipsis};

impl<K: KeyValueStore + 'static> Ui<K> {
    pub(in crate::tui) fn draw_task_list(&self, f: &mut Frame<'_>, area: Rect) {
        let views = self.views();
        let total = views.active.len();
        let visible = self.visible_active();
        let width = inner_width(area, TASK_LIST_HIGHLIGHT_SYMBOL.chars().count());

        let items: Vec<ListItem<'_>> = if visible.is_empty() {
            let message = if views.counts.active > 0 {
                NO_MATCH_MESSAGE
            } else {
                EMPTY_LIST_MESSAGE
            };
            vec![ListItem::new(Line::from(message))]
        } else {
            visible
                .iter()
                .map(|task| {
                    let title = Span::styled(
                        truncate_with_ellipsis(&task.title, width).into_owned(),
                        Style::default().add_modifier(Modifier::BOLD),
                    );
                    let meta = Span::styled(
                        format!("created {}", format_date(task.created_at)),
                        Style::default().fg(Color::DarkGray),
                    );
                    ListItem::new(vec![Line::from(title), Line::from(meta)])
                })
                .collect()
        };

        let title = if visible.len() < total {
            format!("Tasks ({} of {total})", visible.len())
        } else {
            format!("Tasks ({total})")
        };
        let list = List::new(items)
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(self.border_style(Focus::List)),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol(TASK_LIST_HIGHLIGHT_SYMBOL);
        let mut state = ListState::default();
        if !visible.is_empty() {
            state.select(Some(self.selected));
        }
        f.render_stateful_widget(list, area, &mut state);
    }
}
