use crate::util::unicode;

use super::keys::{Key, KeyPress};

/// Single-line query buffer with a caret and an optional selection anchor.
///
/// Offsets are byte offsets into the buffer and always sit on grapheme
/// boundaries. The selection spans from `anchor` to `caret` in either order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    buffer: String,
    caret: usize,
    anchor: Option<usize>,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Selected byte range, normalized so start <= end. None when nothing
    /// is selected (or the anchor collapsed onto the caret).
    pub fn selection_range(&self) -> Option<(usize, usize)> {
        let anchor = self.anchor?;
        if anchor == self.caret {
            return None;
        }
        Some((anchor.min(self.caret), anchor.max(self.caret)))
    }

    pub fn selected_text(&self) -> &str {
        match self.selection_range() {
            Some((start, end)) => &self.buffer[start..end],
            None => "",
        }
    }

    /// Start of the selection, or the caret when nothing is selected.
    pub fn selection_start(&self) -> usize {
        self.selection_range().map_or(self.caret, |(start, _)| start)
    }

    pub fn caret_at_start(&self) -> bool {
        self.selection_start() == 0
    }

    /// True when the selected text is the whole buffer. An empty buffer with
    /// no selection counts: there is nothing left unselected.
    pub fn covers_all(&self) -> bool {
        self.selected_text() == self.buffer
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.caret = 0;
        self.anchor = None;
    }

    /// Replace the whole buffer, caret at the end.
    pub fn set(&mut self, text: &str) {
        self.buffer = text.replace(['\n', '\r'], " ");
        self.caret = self.buffer.len();
        self.anchor = None;
    }

    pub fn select_all(&mut self) {
        self.anchor = Some(0);
        self.caret = self.buffer.len();
    }

    /// Delete the selected text. Returns false if nothing was selected.
    pub fn delete_selection(&mut self) -> bool {
        let Some((start, end)) = self.selection_range() else {
            self.anchor = None;
            return false;
        };
        self.buffer.drain(start..end);
        self.caret = start;
        self.anchor = None;
        true
    }

    pub fn insert_str(&mut self, text: &str) {
        self.delete_selection();
        let clean = text.replace(['\n', '\r'], " ");
        self.buffer.insert_str(self.caret, &clean);
        self.caret += clean.len();
    }

    fn move_to(&mut self, pos: usize, extend: bool) {
        if extend {
            if self.anchor.is_none() {
                self.anchor = Some(self.caret);
            }
        } else {
            self.anchor = None;
        }
        self.caret = pos;
    }

    /// Apply an editing key. Returns true when the buffer text changed.
    pub fn apply(&mut self, press: KeyPress) -> bool {
        match press.key {
            Key::Char('a') if press.ctrl => {
                self.select_all();
                false
            }
            // Ctrl+W: delete the word left of the caret
            Key::Char('w') if press.ctrl => {
                if self.delete_selection() {
                    return true;
                }
                let start = unicode::word_boundary_left(&self.buffer, self.caret);
                if start == self.caret {
                    return false;
                }
                self.buffer.drain(start..self.caret);
                self.caret = start;
                true
            }
            // Ctrl+U: kill to start of line
            Key::Char('u') if press.ctrl => {
                if self.delete_selection() {
                    return true;
                }
                if self.caret == 0 {
                    return false;
                }
                self.buffer.drain(..self.caret);
                self.caret = 0;
                true
            }
            Key::Char(_) if press.ctrl => false,
            Key::Char(c) => {
                let mut tmp = [0u8; 4];
                self.insert_str(c.encode_utf8(&mut tmp));
                true
            }
            Key::Backspace => {
                if self.delete_selection() {
                    return true;
                }
                match unicode::prev_grapheme_boundary(&self.buffer, self.caret) {
                    Some(prev) => {
                        self.buffer.drain(prev..self.caret);
                        self.caret = prev;
                        true
                    }
                    None => false,
                }
            }
            Key::Delete => {
                if self.delete_selection() {
                    return true;
                }
                match unicode::next_grapheme_boundary(&self.buffer, self.caret) {
                    Some(next) => {
                        self.buffer.drain(self.caret..next);
                        true
                    }
                    None => false,
                }
            }
            Key::Left => {
                let target = match (press.shift, self.selection_range()) {
                    // Collapse a selection onto its left edge
                    (false, Some((start, _))) => start,
                    _ => unicode::prev_grapheme_boundary(&self.buffer, self.caret)
                        .unwrap_or(0),
                };
                self.move_to(target, press.shift);
                false
            }
            Key::Right => {
                let target = match (press.shift, self.selection_range()) {
                    (false, Some((_, end))) => end,
                    _ => unicode::next_grapheme_boundary(&self.buffer, self.caret)
                        .unwrap_or(self.buffer.len()),
                };
                self.move_to(target, press.shift);
                false
            }
            Key::Home => {
                self.move_to(0, press.shift);
                false
            }
            Key::End => {
                let end = self.buffer.len();
                self.move_to(end, press.shift);
                false
            }
            Key::Up | Key::Down | Key::Enter | Key::Escape | Key::Tab => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> TextInput {
        let mut input = TextInput::new();
        input.set(text);
        input
    }

    #[test]
    fn typing_inserts_at_caret() {
        let mut input = TextInput::new();
        for c in "vue".chars() {
            assert!(input.apply(KeyPress::plain(Key::Char(c))));
        }
        input.apply(KeyPress::plain(Key::Home));
        input.apply(KeyPress::plain(Key::Char('>')));
        assert_eq!(input.as_str(), ">vue");
        assert_eq!(input.caret(), 1);
    }

    #[test]
    fn backspace_is_grapheme_aware() {
        let mut input = typed("ae\u{0301}");
        assert!(input.apply(KeyPress::plain(Key::Backspace)));
        assert_eq!(input.as_str(), "a");
        assert!(input.apply(KeyPress::plain(Key::Backspace)));
        assert!(!input.apply(KeyPress::plain(Key::Backspace)));
        assert!(input.is_empty());
    }

    #[test]
    fn delete_forward() {
        let mut input = typed("ng");
        input.apply(KeyPress::plain(Key::Home));
        assert!(input.apply(KeyPress::plain(Key::Delete)));
        assert_eq!(input.as_str(), "g");
        assert_eq!(input.caret(), 0);
    }

    #[test]
    fn caret_at_start_tracks_selection_start() {
        let mut input = typed("react");
        assert!(!input.caret_at_start());
        input.apply(KeyPress::shift(Key::Home));
        assert_eq!(input.caret(), 0);
        assert_eq!(input.selected_text(), "react");
        assert!(input.caret_at_start());
        assert!(input.covers_all());
    }

    #[test]
    fn empty_buffer_counts_as_fully_covered() {
        let input = TextInput::new();
        assert!(input.caret_at_start());
        assert!(input.covers_all());
    }

    #[test]
    fn partial_selection_does_not_cover() {
        let mut input = typed("react");
        input.apply(KeyPress::plain(Key::Home));
        input.apply(KeyPress::shift(Key::Right));
        input.apply(KeyPress::shift(Key::Right));
        assert_eq!(input.selected_text(), "re");
        assert!(input.caret_at_start());
        assert!(!input.covers_all());
    }

    #[test]
    fn typing_replaces_selection() {
        let mut input = typed("angular");
        input.apply(KeyPress::ctrl(Key::Char('a')));
        input.apply(KeyPress::plain(Key::Char('v')));
        assert_eq!(input.as_str(), "v");
        assert!(input.selection_range().is_none());
    }

    #[test]
    fn arrows_collapse_selection() {
        let mut input = typed("svelte");
        input.select_all();
        input.apply(KeyPress::plain(Key::Left));
        assert_eq!(input.caret(), 0);
        assert!(input.selection_range().is_none());
        input.select_all();
        input.apply(KeyPress::plain(Key::Right));
        assert_eq!(input.caret(), 6);
    }

    #[test]
    fn ctrl_w_and_ctrl_u() {
        let mut input = typed("solid start");
        assert!(input.apply(KeyPress::ctrl(Key::Char('w'))));
        assert_eq!(input.as_str(), "solid ");
        assert!(input.apply(KeyPress::ctrl(Key::Char('u'))));
        assert!(input.is_empty());
        assert!(!input.apply(KeyPress::ctrl(Key::Char('u'))));
    }

    #[test]
    fn other_ctrl_chars_are_ignored() {
        let mut input = typed("x");
        assert!(!input.apply(KeyPress::ctrl(Key::Char('k'))));
        assert_eq!(input.as_str(), "x");
    }

    #[test]
    fn set_strips_newlines() {
        let input = typed("a\nb");
        assert_eq!(input.as_str(), "a b");
        assert_eq!(input.caret(), 3);
    }
}
