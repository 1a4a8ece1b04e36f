use std::time::Duration;

use tracing::debug_span;

use flick_core::buffer::TextDocumentProxy;
use flick_core::error::EditError;
use flick_core::gesture::{Direction, Gesture};
use flick_core::text::alternate_case;

use super::types::{Effect, EditResponse, HapticEvent, KeyTarget, ViewType};
use super::KeyboardSession;

impl<D: TextDocumentProxy> KeyboardSession<D> {
    /// Apply one classified gesture. `now` is the sequencer clock, used for
    /// shift double-tap detection.
    pub fn handle_gesture(
        &mut self,
        target: &KeyTarget,
        gesture: Gesture,
        now: Duration,
    ) -> EditResponse {
        let _span = debug_span!("handle_gesture", ?target, ?gesture).entered();
        let result = if self.view == ViewType::SearchEmoji {
            self.dispatch_search(target, gesture, now)
        } else {
            self.dispatch(target, gesture, now)
        };
        self.respond(result)
    }

    fn dispatch(
        &mut self,
        target: &KeyTarget,
        gesture: Gesture,
        now: Duration,
    ) -> Result<Effect, EditError> {
        use Direction::*;
        use Gesture::*;

        match (target, gesture) {
            (KeyTarget::Shift, Tap) => {
                self.caps.tap_shift(now);
                Ok(Effect::feedback(HapticEvent::TypingImpact))
            }
            (KeyTarget::Shift, Swipe(Right)) => Ok(self.cycle_symbol_views()),
            (KeyTarget::Backspace, Swipe(Left)) => Ok(self.toggle_emoji_view()),
            (KeyTarget::Backspace, Tap | LongPressBegin | LongPressRepeat) => self.backspace(),
            (KeyTarget::Shift | KeyTarget::Backspace, Swipe(Left | Right))
            | (KeyTarget::Shift | KeyTarget::Backspace, SwipeHoldRepeat(Left | Right)) => {
                Ok(Effect::none())
            }

            (KeyTarget::Char(c), Tap) => self.type_char(*c),
            (KeyTarget::Char(c), LongPressBegin) => self.type_text(&alternate_case(*c)),
            (KeyTarget::Emoji(emoji), Tap) => self.type_text(emoji),
            (KeyTarget::Return, Tap) => self.type_text("\n"),
            (KeyTarget::Return, LongPressBegin) => Ok(self.toggle_autocorrect()),
            (KeyTarget::Globe, Tap) => Ok(self.next_locale()),
            (KeyTarget::EmojiSearch, Tap) => Ok(self.toggle_emoji_search()),

            (_, Swipe(Right)) => self.commit_word(),
            (_, Swipe(Left) | SwipeHoldRepeat(Left)) => self.delete_word(),
            (_, Swipe(Up)) => self.cycle(-1, false),
            (_, Swipe(Down)) => self.cycle(1, false),
            (_, SwipeHoldRepeat(Up)) => self.cycle(-1, true),
            (_, SwipeHoldRepeat(Down)) => self.cycle(1, true),

            _ => Ok(Effect::none()),
        }
    }

    /// While the emoji search field is up, letters go to the query instead of
    /// the document.
    fn dispatch_search(
        &mut self,
        target: &KeyTarget,
        gesture: Gesture,
        now: Duration,
    ) -> Result<Effect, EditError> {
        match (target, gesture) {
            (KeyTarget::Char(c), Gesture::Tap) => {
                self.emoji_query.push(*c);
                Ok(Effect::feedback(HapticEvent::TypingImpact))
            }
            (KeyTarget::Char(c), Gesture::LongPressBegin) => {
                self.emoji_query.push_str(&alternate_case(*c));
                Ok(Effect::feedback(HapticEvent::TypingImpact))
            }
            (
                KeyTarget::Backspace,
                Gesture::Tap | Gesture::LongPressBegin | Gesture::LongPressRepeat,
            ) => {
                self.emoji_query.pop();
                Ok(Effect::feedback(HapticEvent::TypingImpact))
            }
            (KeyTarget::Emoji(emoji), Gesture::Tap) => {
                let effect = self.type_text(emoji)?;
                self.emoji_query.clear();
                self.view = ViewType::Emoji;
                Ok(effect)
            }
            _ => self.dispatch(target, gesture, now),
        }
    }

    /// Insert a character from the keyboard, upper-cased while shifted.
    fn type_char(&mut self, c: char) -> Result<Effect, EditError> {
        let text: String = if self.caps.state().is_upper() {
            c.to_uppercase().collect()
        } else {
            c.to_string()
        };
        self.type_text(&text)
    }

    fn type_text(&mut self, text: &str) -> Result<Effect, EditError> {
        // Probe first so a missing document leaves everything untouched.
        self.buffer.text_before_cursor(1)?;
        self.buffer.insert(text);
        self.caps.consume();
        self.punctuation.clear_edit();
        Ok(Effect::typed())
    }
}
