use std::borrow::Cow;

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
};
use todosync_store::KeyValueStore;

use super::super::view::{Focus, Ui, notice_style};

impl<K: KeyValueStore + 'static> Ui<K> {
    pub(in crate::tui) fn draw_status(&self, f: &mut Frame<'_>, area: Rect) {
        let style = self.notice.as_ref().map_or_else(Style::default, notice_style);
        let status = Paragraph::new(self.status_text())
            .style(style)
            .block(Block::default().title("Status").borders(Borders::ALL));
        f.render_widget(status, area);
    }

    pub(in crate::tui) fn status_text(&self) -> Cow<'_, str> {
        if let Some(notice) = &self.notice {
            return Cow::Borrowed(notice.text.as_str());
        }
        let hints = match self.focus {
            Focus::List => {
                "j/k: move  space: complete  d: delete  h: history  /: search  n: new  Tab: focus  q: quit"
            }
            Focus::Search => "type to filter  Enter/Esc: back to list  Ctrl+U: clear",
            Focus::Create => "Enter: create  Esc: back to list  Ctrl+U: clear",
        };
        if self.app.pending() > 0 {
            Cow::Owned(format!("Working… {hints}"))
        } else {
            Cow::Borrowed(hints)
        }
    }
}
