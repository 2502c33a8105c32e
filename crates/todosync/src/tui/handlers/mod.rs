use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use todosync_store::KeyValueStore;

use super::view::{Focus, Ui};

mod editing;
mod navigation;

impl<K: KeyValueStore + 'static> Ui<K> {
    pub(in crate::tui) fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.prev(),
            _ => self.handle_focused_key(key),
        }
    }

    fn handle_focused_key(&mut self, key: KeyEvent) {
        match self.focus {
            Focus::List => self.handle_list_key(key),
            Focus::Search => self.handle_search_key(key),
            Focus::Create => self.handle_create_key(key),
        }
    }
}
