use tracing::debug;
use unicode_segmentation::UnicodeSegmentation;

use flick_core::buffer::TextDocumentProxy;
use flick_core::error::EditError;
use flick_core::text::{grapheme_count, is_punctuation, trailing_word};

use super::types::Effect;
use super::KeyboardSession;

impl<D: TextDocumentProxy> KeyboardSession<D> {
    /// Swipe-left: delete one word.
    ///
    /// A trailing punctuation pair (`". "`, or the `"  "` of the blank
    /// option) collapses back to the space it replaced, and a lone trailing
    /// mark is deleted on its own; neither cascades into the word before it.
    pub(crate) fn delete_word(&mut self) -> Result<Effect, EditError> {
        let context = self.buffer.context()?;
        if context.is_empty() {
            return Ok(Effect::none());
        }
        let anchor = self.buffer.position_of(&context);

        let mut tail = context.graphemes(true).rev();
        let last = tail.next();
        let prev = tail.next();
        match (prev, last) {
            (Some(mark), Some(" "))
                if is_punctuation(mark) || self.punctuation.is_option(mark) =>
            {
                self.buffer.delete_graphemes(2);
                self.buffer.insert(" ");
            }
            (_, Some(mark)) if is_punctuation(mark) => {
                self.buffer.delete_backward();
            }
            _ => {
                let body = context.trim_end_matches(char::is_whitespace);
                let spaces = grapheme_count(&context[body.len()..]);
                let word = grapheme_count(trailing_word(body));
                debug!(spaces, word, "delete word");
                self.buffer.delete_graphemes(spaces + word);
            }
        }
        self.history.invalidate_newest_matching(&anchor);
        self.punctuation.clear_edit();
        Ok(Effect::gesture())
    }

    /// Backspace key: delete one grapheme.
    pub(crate) fn backspace(&mut self) -> Result<Effect, EditError> {
        let context = self.buffer.context()?;
        if context.is_empty() {
            return Ok(Effect::none());
        }
        let anchor = self.buffer.position_of(&context);
        self.buffer.delete_backward();
        self.history.invalidate_newest_matching(&anchor);
        self.punctuation.clear_edit();
        Ok(Effect::typed())
    }
}
