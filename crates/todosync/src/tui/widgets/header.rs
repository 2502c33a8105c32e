use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use todosync_core::TaskCounts;
use todosync_store::KeyValueStore;

use crate::format::created_label;

use super::super::constants::APP_TITLE;
use super::super::view::Ui;

impl<K: KeyValueStore + 'static> Ui<K> {
    pub(in crate::tui) fn draw_header(&self, f: &mut Frame<'_>, area: Rect, counts: TaskCounts) {
        let separator = Span::styled(" | ", Style::default().fg(Color::DarkGray));
        let line = Line::from(vec![
            Span::styled(created_label(counts.created), Style::default().add_modifier(Modifier::BOLD)),
            separator.clone(),
            Span::styled(format!("{} completed", counts.completed), Style::default().fg(Color::Green)),
            separator,
            Span::styled(format!("{} deleted", counts.deleted), Style::default().fg(Color::Red)),
        ]);

        let title = Span::styled(APP_TITLE, Style::default().add_modifier(Modifier::BOLD).fg(Color::Cyan));
        let card = Paragraph::new(line).block(Block::default().title(title).borders(Borders::ALL));
        f.render_widget(card, area);
    }
}
