/// Caret-only editing state for the field value. Operates on char indices;
/// byte positions are derived at the edit site.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EditorState {
    pub value: String,
    pub caret: usize,
}

impl EditorState {
    pub fn new(value: impl Into<String>, caret: usize) -> Self {
        let value = value.into();
        let caret = caret.min(value.chars().count());
        Self { value, caret }
    }

    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn move_left(&mut self) {
        self.caret = self.caret.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.caret = (self.caret + 1).min(self.len());
    }

    pub fn move_to(&mut self, caret: usize) {
        self.caret = caret.min(self.len());
    }

    pub fn delete_backward(&mut self) -> bool {
        if self.caret == 0 {
            return false;
        }
        let start = self.caret - 1;
        self.replace_char_range(start, self.caret, "");
        true
    }

    pub fn delete_forward(&mut self) -> bool {
        if self.caret >= self.len() {
            return false;
        }
        let end = (self.caret + 1).min(self.len());
        self.replace_char_range(self.caret, end, "");
        true
    }

    pub fn insert_text(&mut self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        self.replace_char_range(self.caret, self.caret, text);
        true
    }

    pub fn replace_char_range(&mut self, start: usize, end: usize, insert: &str) {
        let len = self.len();
        let start = start.min(len);
        let end = end.min(len).max(start);
        let byte_start = Self::byte_index_at_char(&self.value, start);
        let byte_end = Self::byte_index_at_char(&self.value, end);
        self.value.replace_range(byte_start..byte_end, insert);
        self.caret = (start + insert.chars().count()).min(self.len());
    }

    pub fn clamp_to_max_length(&mut self, max_length: Option<usize>) -> bool {
        let Some(limit) = max_length else {
            return false;
        };
        if self.len() <= limit {
            return false;
        }
        self.value = self.value.chars().take(limit).collect::<String>();
        self.caret = self.caret.min(self.len());
        true
    }

    pub fn byte_index_at_char(value: &str, char_index: usize) -> usize {
        value
            .char_indices()
            .nth(char_index)
            .map(|(index, _)| index)
            .unwrap_or(value.len())
    }

    pub fn char_index_at_byte(value: &str, byte_index: usize) -> usize {
        let mut byte_index = byte_index.min(value.len());
        while byte_index > 0 && !value.is_char_boundary(byte_index) {
            byte_index -= 1;
        }
        value[..byte_index].chars().count()
    }
}
