use unicode_segmentation::UnicodeSegmentation;

/// Single-line text field edited at its end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(super) struct TextInput {
    value: String,
}

impl TextInput {
    pub(super) fn as_str(&self) -> &str {
        &self.value
    }

    pub(super) fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    pub(super) fn push(&mut self, ch: char) {
        self.value.push(ch);
    }

    /// Remove the last grapheme cluster.
    pub(super) fn backspace(&mut self) {
        if let Some((idx, _)) = self.value.grapheme_indices(true).next_back() {
            self.value.truncate(idx);
        }
    }

    pub(super) fn clear(&mut self) {
        self.value.clear();
    }
}
