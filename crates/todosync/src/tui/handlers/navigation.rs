use crossterm::event::{KeyCode, KeyEvent};
use todosync_app::TaskCommand;
use todosync_store::KeyValueStore;

use super::super::view::{Focus, Ui};

impl<K: KeyValueStore + 'static> Ui<K> {
    pub(in crate::tui) fn handle_list_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.select_prev(),
            KeyCode::Char(' ' | 'c') | KeyCode::Enter => self.complete_selected(),
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),
            KeyCode::Char('h') => self.history = self.history.toggle(),
            KeyCode::Char('/') => self.focus = Focus::Search,
            KeyCode::Char('n' | 'a') => self.focus = Focus::Create,
            _ => {}
        }
    }

    fn complete_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.app.dispatch(TaskCommand::Complete(id));
        }
    }

    fn delete_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.app.dispatch(TaskCommand::Delete(id));
        }
    }
}
