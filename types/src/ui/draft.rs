//! Single-line text fields (name, commitment).

use unicode_segmentation::UnicodeSegmentation;

/// Editable text with a cursor that only ever rests between grapheme
/// clusters, so one Backspace removes one visible character even for
/// Hangul syllables or emoji sequences.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftInput {
    text: String,
    /// Byte offset into `text`, always on a grapheme boundary.
    cursor: usize,
}

impl DraftInput {
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text left of the cursor.
    #[must_use]
    pub fn before_cursor(&self) -> &str {
        &self.text[..self.cursor]
    }

    /// Text right of the cursor.
    #[must_use]
    pub fn after_cursor(&self) -> &str {
        &self.text[self.cursor..]
    }

    fn previous_boundary(&self) -> Option<usize> {
        self.before_cursor()
            .grapheme_indices(true)
            .next_back()
            .map(|(offset, _)| offset)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.after_cursor()
            .graphemes(true)
            .next()
            .map(|grapheme| self.cursor + grapheme.len())
    }

    pub fn move_cursor_left(&mut self) {
        if let Some(offset) = self.previous_boundary() {
            self.cursor = offset;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if let Some(offset) = self.next_boundary() {
            self.cursor = offset;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor = self.text.len();
    }

    pub fn enter_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn enter_text(&mut self, text: &str) {
        self.text.insert_str(self.cursor, text);
        self.cursor += text.len();
    }

    /// Backspace.
    pub fn delete_char(&mut self) {
        if let Some(offset) = self.previous_boundary() {
            self.text.replace_range(offset..self.cursor, "");
            self.cursor = offset;
        }
    }

    /// Delete.
    pub fn delete_char_forward(&mut self) {
        if let Some(end) = self.next_boundary() {
            self.text.replace_range(self.cursor..end, "");
        }
    }

    /// Ctrl+W: trailing whitespace, then the word before it.
    pub fn delete_word_backwards(&mut self) {
        let before = self.before_cursor();
        let trimmed = before.trim_end();
        let word_start = trimmed
            .split_word_bound_indices()
            .rev()
            .find(|(_, piece)| !piece.trim().is_empty())
            .map_or(0, |(offset, _)| offset);
        self.text.replace_range(word_start..self.cursor, "");
        self.cursor = word_start;
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    #[must_use]
    pub fn grapheme_count(&self) -> usize {
        self.text.graphemes(true).count()
    }
}
