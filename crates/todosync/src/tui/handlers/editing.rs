use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use todosync_app::TaskCommand;
use todosync_store::KeyValueStore;

use super::super::constants::EMPTY_TITLE_MESSAGE;
use super::super::input::TextInput;
use super::super::view::{Focus, Ui};

/// Outcome of feeding a key to a text field.
enum FieldKey {
    Edited,
    Submit,
    Leave,
    Ignored,
}

fn edit_field(field: &mut TextInput, key: KeyEvent) -> FieldKey {
    match key.code {
        KeyCode::Enter => FieldKey::Submit,
        KeyCode::Esc => FieldKey::Leave,
        KeyCode::Backspace => {
            field.backspace();
            FieldKey::Edited
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            field.clear();
            FieldKey::Edited
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            field.push(ch);
            FieldKey::Edited
        }
        _ => FieldKey::Ignored,
    }
}

impl<K: KeyValueStore + 'static> Ui<K> {
    pub(in crate::tui) fn handle_search_key(&mut self, key: KeyEvent) {
        match edit_field(&mut self.search, key) {
            FieldKey::Edited => self.selected = 0,
            FieldKey::Submit | FieldKey::Leave => self.focus = Focus::List,
            FieldKey::Ignored => {}
        }
    }

    pub(in crate::tui) fn handle_create_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            self.focus = Focus::List;
            return;
        }
        // The field is read-only until the pending create reports back.
        if self.creating {
            return;
        }
        if matches!(edit_field(&mut self.create, key), FieldKey::Submit) {
            self.submit_create();
        }
    }

    fn submit_create(&mut self) {
        if self.create.is_blank() {
            self.error(EMPTY_TITLE_MESSAGE);
            return;
        }
        self.creating = true;
        self.app
            .dispatch(TaskCommand::Create(self.create.as_str().to_owned()));
    }
}
