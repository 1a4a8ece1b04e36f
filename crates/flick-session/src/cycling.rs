use tracing::debug;

use flick_core::buffer::TextDocumentProxy;
use flick_core::error::EditError;
use flick_core::history::SlotRef;
use flick_core::text::{completed_word, grapheme_count};

use super::types::{Effect, HapticEvent, Notification};
use super::KeyboardSession;

impl<D: TextDocumentProxy> KeyboardSession<D> {
    /// Vertical swipe: rewrite the pending punctuation pair if there is one,
    /// otherwise browse the alternates of the word just before the cursor.
    ///
    /// `delta` is +1 for down (next) and -1 for up (toward the typed word).
    /// Held repeats never trigger the learn/forget toggle at the first
    /// candidate.
    pub(crate) fn cycle(&mut self, delta: i32, repeat: bool) -> Result<Effect, EditError> {
        let context = self.buffer.context()?;
        if self.punctuation.is_editable(&context) {
            self.punctuation.cycle(delta, &mut self.buffer, &context)?;
            return Ok(Effect::gesture());
        }

        let word = completed_word(&context).ok_or(EditError::NotEditable)?;
        let anchor = self.buffer.position_of(&context);
        let slot = self
            .history
            .find_active_slot(&anchor, word)
            .ok_or(EditError::NotEditable)?;
        // The visible word may differ from the recorded selection if the slot
        // was reached again by moving the cursor.
        self.history.select_word(slot, word);

        let replaced_len = grapheme_count(word) + 1;
        match self.history.cycle(slot, delta) {
            Ok(next) => {
                let next = next.to_string();
                self.buffer.delete_graphemes(replaced_len);
                self.buffer.insert(&next);
                self.buffer.insert(" ");
                let anchor = self.buffer.position()?;
                self.history.reanchor(slot, anchor);
                debug!(%next, "suggestion replaced");
                Ok(self.after_suggestion_cycle(slot))
            }
            Err(EditError::AtBoundary) if delta < 0 && !repeat => Ok(self.toggle_learned(slot)),
            Err(e) => Err(e),
        }
    }

    fn after_suggestion_cycle(&self, slot: SlotRef) -> Effect {
        let effect = Effect::gesture();
        let Some(s) = self.history.slot(slot) else {
            return effect;
        };
        if s.selected_index() != Some(0) {
            return effect;
        }
        let Some(original) = s.original() else {
            return effect;
        };
        if self.lexicon.is_known(original, self.locale()) {
            return effect;
        }
        match self.count_verbatim_use(original) {
            Some(n) => effect.notify(n),
            None => effect,
        }
    }

    /// Swiping up past the typed word teaches it, or forgets it if it was
    /// already taught.
    fn toggle_learned(&mut self, slot: SlotRef) -> Effect {
        let Some(word) = self
            .history
            .slot(slot)
            .and_then(|s| s.original())
            .map(str::to_string)
        else {
            return Effect::none();
        };
        let notification = if self.lexicon.is_user_taught(&word) {
            self.lexicon.forget(&word);
            Notification::Forgotten(word)
        } else {
            self.lexicon.learn(&word);
            Notification::Learned(word)
        };
        debug!(?notification, "user dictionary toggled");
        Effect {
            mutated: false,
            haptic: Some(HapticEvent::GestureImpact),
            notification: Some(notification),
        }
    }
}
