//! Adapter over the host's text-editing surface.
//!
//! The host only lets us read a bounded window of text before the cursor,
//! insert at the cursor, delete one grapheme backward and nudge the cursor by a
//! relative offset. Everything the engine knows about the document is derived
//! from that trailing window, including the identity of "where we are"
//! ([`BufferPosition`]).

use tracing::trace;
use unicode_segmentation::UnicodeSegmentation;

use crate::error::EditError;

/// The host's editing surface, as narrow as the platform gives it to us.
pub trait TextDocumentProxy {
    /// Up to `max_chars` characters immediately before the cursor, or `None`
    /// when no document has focus.
    fn text_before_cursor(&self, max_chars: usize) -> Option<String>;
    fn insert_text(&mut self, text: &str);
    /// Remove one grapheme before the cursor. No-op at the start of the document.
    fn delete_backward(&mut self);
    /// Move the cursor by `offset` graphemes, clamped to the document bounds.
    fn adjust_cursor(&mut self, offset: i64);
    fn has_text(&self) -> bool;
}

/// Opaque marker for "the cursor was here, with this trailing context".
///
/// Positions only support equality. Two positions are equal when they were
/// captured in the same document epoch over an identical trailing window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferPosition {
    epoch: u64,
    context_hash: u32,
    context_len: usize,
}

impl BufferPosition {
    pub fn capture(epoch: u64, window: &str) -> Self {
        Self {
            epoch,
            context_hash: crc32fast::hash(window.as_bytes()),
            context_len: window.chars().count(),
        }
    }
}

/// Wraps a [`TextDocumentProxy`] and issues [`BufferPosition`]s.
pub struct TextBuffer<D> {
    doc: D,
    epoch: u64,
    window: usize,
}

impl<D: TextDocumentProxy> TextBuffer<D> {
    pub fn new(doc: D, window: usize) -> Self {
        Self {
            doc,
            epoch: 0,
            window: window.max(1),
        }
    }

    pub fn document(&self) -> &D {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.doc
    }

    pub fn into_document(self) -> D {
        self.doc
    }

    /// Number of characters read for context and position identity.
    pub fn window(&self) -> usize {
        self.window
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// The host focused a different document (or reloaded this one).
    /// Positions captured before this call never compare equal to later ones.
    pub fn begin_document(&mut self) {
        self.epoch += 1;
        trace!(epoch = self.epoch, "document epoch advanced");
    }

    pub fn text_before_cursor(&self, max_chars: usize) -> Result<String, EditError> {
        self.doc
            .text_before_cursor(max_chars)
            .ok_or(EditError::NoActiveDocument)
    }

    /// The full trailing window.
    pub fn context(&self) -> Result<String, EditError> {
        self.text_before_cursor(self.window)
    }

    pub fn position(&self) -> Result<BufferPosition, EditError> {
        let context = self.context()?;
        Ok(self.position_of(&context))
    }

    /// Position for a window that was already read with [`Self::context`].
    pub fn position_of(&self, context: &str) -> BufferPosition {
        BufferPosition::capture(self.epoch, context)
    }

    pub fn insert(&mut self, text: &str) {
        trace!(text, "insert");
        self.doc.insert_text(text);
    }

    pub fn delete_backward(&mut self) {
        trace!("delete_backward");
        self.doc.delete_backward();
    }

    pub fn delete_graphemes(&mut self, count: usize) {
        trace!(count, "delete_graphemes");
        for _ in 0..count {
            self.doc.delete_backward();
        }
    }

    pub fn move_cursor(&mut self, offset: i64) {
        trace!(offset, "move_cursor");
        self.doc.adjust_cursor(offset);
    }

    pub fn has_text(&self) -> bool {
        self.doc.has_text()
    }
}

/// In-memory document used by the CLI, the simulator and tests.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    text: String,
    /// Byte offset of the cursor, always on a grapheme boundary.
    cursor: usize,
    focused: bool,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            cursor: 0,
            focused: true,
        }
    }

    /// A document holding `text` with the cursor at its end.
    pub fn with_text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            cursor: text.len(),
            focused: true,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Simulate the host losing (or regaining) document focus.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl TextDocumentProxy for MemoryDocument {
    fn text_before_cursor(&self, max_chars: usize) -> Option<String> {
        if !self.focused {
            return None;
        }
        let before = &self.text[..self.cursor];
        let skip = before.chars().count().saturating_sub(max_chars);
        Some(before.chars().skip(skip).collect())
    }

    fn insert_text(&mut self, text: &str) {
        if !self.focused {
            return;
        }
        self.text.insert_str(self.cursor, text);
        self.cursor += text.len();
    }

    fn delete_backward(&mut self) {
        if !self.focused {
            return;
        }
        if let Some((start, _)) = self.text[..self.cursor].grapheme_indices(true).next_back() {
            self.text.replace_range(start..self.cursor, "");
            self.cursor = start;
        }
    }

    fn adjust_cursor(&mut self, offset: i64) {
        if !self.focused {
            return;
        }
        if offset < 0 {
            for _ in 0..offset.unsigned_abs() {
                match self.text[..self.cursor].grapheme_indices(true).next_back() {
                    Some((start, _)) => self.cursor = start,
                    None => break,
                }
            }
        } else {
            for _ in 0..offset {
                match self.text[self.cursor..].graphemes(true).next() {
                    Some(g) => self.cursor += g.len(),
                    None => break,
                }
            }
        }
    }

    fn has_text(&self) -> bool {
        self.focused && !self.text.is_empty()
    }
}
