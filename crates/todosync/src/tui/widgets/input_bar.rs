use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};
use todosync_store::KeyValueStore;

use super::super::view::{Focus, Ui};

impl<K: KeyValueStore + 'static> Ui<K> {
    pub(in crate::tui) fn draw_inputs(&self, f: &mut Frame<'_>, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let search = Paragraph::new(self.search.as_str()).block(
            Block::default()
                .title("Search")
                .borders(Borders::ALL)
                .border_style(self.border_style(Focus::Search)),
        );
        f.render_widget(search, columns[0]);

        let (title, text_style) = if self.creating {
            ("Creating…", Style::default().fg(Color::DarkGray))
        } else {
            ("New task", Style::default())
        };
        let create = Paragraph::new(self.create.as_str()).style(text_style).block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(self.border_style(Focus::Create)),
        );
        f.render_widget(create, columns[1]);
    }

    pub(in crate::tui) fn border_style(&self, target: Focus) -> Style {
        if self.focus == target {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        }
    }
}
