use tracing::{debug, trace};

use flick_core::buffer::TextDocumentProxy;
use flick_core::error::EditError;
use flick_core::history::order_candidates;
use flick_core::text::{grapheme_count, trailing_word};

use super::types::{Effect, Notification};
use super::KeyboardSession;

/// Candidate list for one committed word, with the default selection.
pub(crate) struct Suggestions {
    pub(crate) candidates: Vec<String>,
    pub(crate) selected: usize,
    /// The speller (or the user dictionary) knows the typed word.
    pub(crate) known: bool,
}

impl<D: TextDocumentProxy> KeyboardSession<D> {
    /// Word-ending swipe: autocorrect the word in progress and add a space.
    /// With no word in progress this inserts quick punctuation instead.
    pub(crate) fn commit_word(&mut self) -> Result<Effect, EditError> {
        let context = self.buffer.context()?;
        let word = trailing_word(&context);
        if word.is_empty() {
            self.punctuation.insert_fresh(&mut self.buffer, &context);
            return Ok(Effect::gesture());
        }
        let word = word.to_string();

        // Words ending in punctuation were finished by hand.
        let correctable = word.chars().last().is_some_and(char::is_alphanumeric);
        if !self.settings.typing.autocorrect || !correctable {
            self.buffer.insert(" ");
            self.punctuation.clear_edit();
            return Ok(Effect::gesture());
        }

        let suggestions = self.suggest(&word);
        let chosen = suggestions.candidates[suggestions.selected].clone();
        if chosen != word {
            self.buffer.delete_graphemes(grapheme_count(&word));
            self.buffer.insert(&chosen);
        }
        self.buffer.insert(" ");
        self.punctuation.clear_edit();

        let anchor = self.buffer.position()?;
        debug!(%word, %chosen, "word committed");
        self.history
            .record(suggestions.candidates, suggestions.selected, anchor);

        let mut effect = Effect::gesture();
        if suggestions.selected == 0 && !suggestions.known {
            if let Some(n) = self.count_verbatim_use(&word) {
                effect = effect.notify(n);
            }
        }
        Ok(effect)
    }

    /// Build the candidate list for `word` and pick the default.
    ///
    /// The typed word stays selected when the user has taught it (or taught
    /// the top correction's lowercase form). Otherwise a grammar completion
    /// wins, then the first spelling guess for an unknown word.
    pub(crate) fn suggest(&self, word: &str) -> Suggestions {
        let locale = self.locale();
        let max = self.history.max_suggestions();

        let completions = if self.settings.typing.grammar_autocorrect {
            self.lexicon.completions(word, locale)
        } else {
            Vec::new()
        };
        let known = self.lexicon.is_known(word, locale);
        let mut alternates = completions.clone();
        if !known {
            alternates.extend(self.lexicon.guesses(word, locale, max));
        }
        let candidates = order_candidates(word, &alternates, max);

        let user_taught = self.lexicon.is_user_taught(word)
            || candidates
                .get(1)
                .is_some_and(|top| self.lexicon.is_user_taught(&top.to_lowercase()));
        let selected = if user_taught {
            0
        } else if !completions.is_empty() || (!known && candidates.len() >= 2) {
            1
        } else {
            0
        };
        let selected = selected.min(candidates.len() - 1);
        trace!(?candidates, selected, known, user_taught, "suggestions");
        Suggestions {
            candidates,
            selected,
            known,
        }
    }

    /// The user kept an unknown word as typed. Returns a notification if that
    /// promoted it into the user dictionary.
    pub(crate) fn count_verbatim_use(&self, word: &str) -> Option<Notification> {
        if !self.lexicon.has_locale(self.locale()) || self.lexicon.is_user_taught(word) {
            return None;
        }
        self.lexicon
            .record_use(word)
            .then(|| Notification::Learned(word.to_string()))
    }
}
