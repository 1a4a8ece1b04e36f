//! Quick-punctuation cycling.
//!
//! A punctuation mark is always inserted as a two-unit pair, the mark
//! followed by a space. Editing a previous choice replaces that pair, so the
//! cycler only ever needs the two graphemes before the cursor.

use tracing::debug;
use unicode_segmentation::UnicodeSegmentation;

use crate::buffer::{TextBuffer, TextDocumentProxy};
use crate::error::EditError;

pub struct PunctuationCycler {
    options: Vec<String>,
    previewed: usize,
    last_committed: usize,
    can_edit_previous: bool,
}

impl PunctuationCycler {
    /// `options` must be non-empty; settings validation guarantees it.
    pub fn new(options: Vec<String>) -> Self {
        Self {
            options,
            previewed: 0,
            last_committed: 0,
            can_edit_previous: false,
        }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn previewed_index(&self) -> usize {
        self.previewed
    }

    pub fn can_edit_previous(&self) -> bool {
        self.can_edit_previous
    }

    /// Any non-punctuation edit closes the window for editing the last pair.
    pub fn clear_edit(&mut self) {
        self.can_edit_previous = false;
    }

    fn option_index(&self, grapheme: &str) -> Option<usize> {
        self.options.iter().position(|o| o == grapheme)
    }

    /// `grapheme` is one of the quick-punctuation options (the plain space
    /// included).
    pub fn is_option(&self, grapheme: &str) -> bool {
        self.option_index(grapheme).is_some()
    }

    /// Highlight `index` without touching the buffer.
    pub fn preview_at(&mut self, index: usize) -> Result<(), EditError> {
        if index >= self.options.len() {
            return Err(EditError::AtBoundary);
        }
        self.previewed = index;
        Ok(())
    }

    /// True right after a punctuation commit, or when the two graphemes before
    /// the cursor are both quick-punctuation options (e.g. `". "`).
    pub fn is_editable(&self, context: &str) -> bool {
        if self.can_edit_previous {
            return true;
        }
        let mut tail = context.graphemes(true).rev();
        match (tail.next(), tail.next()) {
            (Some(last), Some(prev)) => {
                self.option_index(last).is_some() && self.option_index(prev).is_some()
            }
            _ => false,
        }
    }

    /// Replace the pending pair before the cursor with `options[index] + " "`.
    pub fn commit<D: TextDocumentProxy>(
        &mut self,
        index: usize,
        buffer: &mut TextBuffer<D>,
    ) -> Result<(), EditError> {
        self.preview_at(index)?;
        buffer.delete_graphemes(2);
        buffer.insert(&self.pair(index));
        self.last_committed = index;
        self.can_edit_previous = true;
        Ok(())
    }

    /// Insert a new pair after a completed word (or at the start of the
    /// document). A single trailing space is absorbed into the pair.
    pub fn insert_fresh<D: TextDocumentProxy>(
        &mut self,
        buffer: &mut TextBuffer<D>,
        context: &str,
    ) -> usize {
        let index = if context.is_empty() {
            0
        } else {
            self.last_committed
        };
        if context.ends_with(' ') {
            buffer.delete_backward();
        }
        buffer.insert(&self.pair(index));
        self.previewed = index;
        self.last_committed = index;
        self.can_edit_previous = true;
        debug!(index, "punctuation inserted");
        index
    }

    /// Move the previewed option by `delta` and rewrite the pair in place.
    /// Never wraps: stepping past either end is `AtBoundary`.
    pub fn cycle<D: TextDocumentProxy>(
        &mut self,
        delta: i32,
        buffer: &mut TextBuffer<D>,
        context: &str,
    ) -> Result<usize, EditError> {
        if !self.is_editable(context) {
            return Err(EditError::NotEditable);
        }
        let current = if self.can_edit_previous {
            self.previewed
        } else {
            // Cursor came back to an old pair: recover its index from the buffer.
            let prev = context.graphemes(true).rev().nth(1).unwrap_or_default();
            self.option_index(prev).ok_or(EditError::NotEditable)?
        };
        let target = current as i64 + delta as i64;
        if target < 0 || target >= self.options.len() as i64 {
            return Err(EditError::AtBoundary);
        }
        let target = target as usize;
        self.commit(target, buffer)?;
        debug!(from = current, to = target, "punctuation cycled");
        Ok(target)
    }

    pub fn cycle_up<D: TextDocumentProxy>(
        &mut self,
        buffer: &mut TextBuffer<D>,
        context: &str,
    ) -> Result<usize, EditError> {
        self.cycle(-1, buffer, context)
    }

    pub fn cycle_down<D: TextDocumentProxy>(
        &mut self,
        buffer: &mut TextBuffer<D>,
        context: &str,
    ) -> Result<usize, EditError> {
        self.cycle(1, buffer, context)
    }

    fn pair(&self, index: usize) -> String {
        format!("{} ", self.options[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::MemoryDocument;

    fn options() -> Vec<String> {
        [" ", ".", ",", "?", "!", ":", ";"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn buffer(text: &str) -> TextBuffer<MemoryDocument> {
        TextBuffer::new(MemoryDocument::with_text(text), 32)
    }

    #[test]
    fn test_fresh_insert_absorbs_space() {
        let mut cycler = PunctuationCycler::new(options());
        let mut buf = buffer("hello ");
        cycler.commit(1, &mut buffer("x. ")).unwrap();
        let ctx = buf.context().unwrap();
        let index = cycler.insert_fresh(&mut buf, &ctx);
        assert_eq!(index, 1);
        assert_eq!(buf.document().text(), "hello. ");
        assert!(cycler.can_edit_previous());
    }

    #[test]
    fn test_empty_document_previews_first_option() {
        let mut cycler = PunctuationCycler::new(options());
        cycler.commit(3, &mut buffer("x? ")).unwrap();
        let mut buf = buffer("");
        let index = cycler.insert_fresh(&mut buf, "");
        assert_eq!(index, 0);
        assert_eq!(cycler.previewed_index(), 0);
        assert_eq!(buf.document().text(), "  ");
    }

    #[test]
    fn test_cycle_down_to_boundary_never_wraps() {
        let mut cycler = PunctuationCycler::new(options());
        let mut buf = buffer("hi ");
        let ctx = buf.context().unwrap();
        assert_eq!(cycler.insert_fresh(&mut buf, &ctx), 0);
        assert_eq!(buf.document().text(), "hi  ");

        for expected in 1..7 {
            let ctx = buf.context().unwrap();
            assert_eq!(cycler.cycle_down(&mut buf, &ctx), Ok(expected));
            assert_eq!(cycler.previewed_index(), expected);
        }
        assert_eq!(buf.document().text(), "hi; ");

        let ctx = buf.context().unwrap();
        assert_eq!(
            cycler.cycle_down(&mut buf, &ctx),
            Err(EditError::AtBoundary)
        );
        assert_eq!(cycler.previewed_index(), 6);
        assert_eq!(buf.document().text(), "hi; ");
    }

    #[test]
    fn test_cycle_up_stops_at_first_option() {
        let mut cycler = PunctuationCycler::new(options());
        let mut buf = buffer("hi ");
        let ctx = buf.context().unwrap();
        cycler.insert_fresh(&mut buf, &ctx);
        let ctx = buf.context().unwrap();
        assert_eq!(cycler.cycle_up(&mut buf, &ctx), Err(EditError::AtBoundary));
        assert_eq!(buf.document().text(), "hi  ");
    }

    #[test]
    fn test_not_editable_after_word() {
        let mut cycler = PunctuationCycler::new(options());
        let mut buf = buffer("hello ");
        let ctx = buf.context().unwrap();
        assert!(!cycler.is_editable(&ctx));
        assert_eq!(
            cycler.cycle_down(&mut buf, &ctx),
            Err(EditError::NotEditable)
        );
        assert_eq!(buf.document().text(), "hello ");
    }

    #[test]
    fn test_double_punctuation_context_is_editable() {
        let mut cycler = PunctuationCycler::new(options());
        let mut buf = buffer("wait, ");
        let ctx = buf.context().unwrap();
        assert!(cycler.is_editable(&ctx));
        assert_eq!(cycler.cycle_down(&mut buf, &ctx), Ok(3));
        assert_eq!(buf.document().text(), "wait? ");
    }

    #[test]
    fn test_clear_edit() {
        let mut cycler = PunctuationCycler::new(options());
        let mut buf = buffer("ok ");
        let ctx = buf.context().unwrap();
        cycler.insert_fresh(&mut buf, &ctx);
        assert!(cycler.can_edit_previous());
        cycler.clear_edit();
        assert!(!cycler.can_edit_previous());
    }

    #[test]
    fn test_preview_out_of_range() {
        let mut cycler = PunctuationCycler::new(options());
        assert_eq!(cycler.preview_at(7), Err(EditError::AtBoundary));
        assert_eq!(cycler.preview_at(4), Ok(()));
        assert_eq!(cycler.previewed_index(), 4);
    }
}
