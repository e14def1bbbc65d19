//! Minimal single-line text field for form editing.
//!
//! Supports the subset of editing operations the auth forms need: insert,
//! backspace/delete, cursor movement, and a masked rendering mode for
//! passwords. The cursor is tracked in char units.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use unicode_width::UnicodeWidthStr;

/// Single-line editable text field.
#[derive(Debug, Clone, Default)]
pub struct Field {
    value: String,
    cursor: usize,
    masked: bool,
}

impl Field {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn masked() -> Self {
        Self {
            masked: true,
            ..Self::default()
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn is_masked(&self) -> bool {
        self.masked
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Returns the text to draw: the raw value, or one bullet per char when masked.
    pub fn display_value(&self) -> String {
        if self.masked {
            "\u{2022}".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }

    /// Returns the display-cell offset of the caret within `display_value()`.
    pub fn caret_offset(&self) -> u16 {
        let shown = self.display_value();
        let byte_idx = char_to_byte_index(&shown, self.cursor);
        u16::try_from(shown[..byte_idx].width()).unwrap_or(u16::MAX)
    }

    pub fn insert_char(&mut self, ch: char) {
        if ch.is_control() {
            return;
        }
        let byte_idx = char_to_byte_index(&self.value, self.cursor);
        self.value.insert(byte_idx, ch);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let byte_idx = char_to_byte_index(&self.value, self.cursor);
        self.value.remove(byte_idx);
    }

    pub fn delete(&mut self) {
        if self.cursor >= self.value.chars().count() {
            return;
        }
        let byte_idx = char_to_byte_index(&self.value, self.cursor);
        self.value.remove(byte_idx);
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.value.chars().count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    /// Kills from the cursor back to the start of the line (Ctrl+U).
    pub fn kill_to_start(&mut self) {
        let byte_idx = char_to_byte_index(&self.value, self.cursor);
        self.value.replace_range(..byte_idx, "");
        self.cursor = 0;
    }

    /// Applies an editing key to this field. Returns `true` when the key was
    /// consumed, so callers can fall through to form-level bindings otherwise.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            return false;
        }
        match key.code {
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.kill_to_start();
            }
            KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.move_home();
            }
            KeyCode::Char('e') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.move_end();
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.insert_char(ch);
            }
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.move_home(),
            KeyCode::End => self.move_end(),
            _ => return false,
        }
        true
    }
}

fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map_or(s.len(), |(idx, _)| idx)
}
