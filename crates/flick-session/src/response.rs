use tracing::{debug, warn};

use flick_core::buffer::TextDocumentProxy;
use flick_core::error::EditError;
use flick_core::text::completed_word;

use super::types::{CandidateBar, Effect, EditResponse, ViewType};
use super::KeyboardSession;

impl<D: TextDocumentProxy> KeyboardSession<D> {
    /// Turn a handler's outcome into a response. Every error is recovered
    /// here: a missing document aborts the gesture, anything else is a no-op.
    pub(super) fn respond(&mut self, result: Result<Effect, EditError>) -> EditResponse {
        match result {
            Ok(effect) => {
                if effect.mutated {
                    self.refresh_capitalization();
                }
                let mut resp = self.snapshot(true);
                resp.candidates = self.candidate_bar();
                resp.haptic = effect.haptic;
                resp.notification = effect.notification;
                resp
            }
            Err(EditError::NoActiveDocument) => {
                warn!("no active document, gesture dropped");
                self.snapshot(false)
            }
            Err(e) => {
                debug!(error = %e, "gesture had no effect");
                self.snapshot(true)
            }
        }
    }

    pub(super) fn snapshot(&self, consumed: bool) -> EditResponse {
        EditResponse {
            consumed,
            candidates: CandidateBar::Keep,
            capitalization: self.caps.state(),
            view: self.view,
            locale: self.locale().to_string(),
            notification: None,
            haptic: None,
            emoji_query: (self.view == ViewType::SearchEmoji)
                .then(|| self.emoji_query.clone()),
        }
    }

    /// Alternates for the word before the cursor, or the punctuation options
    /// while a pair is being edited.
    pub(super) fn candidate_bar(&self) -> CandidateBar {
        if self.view.is_emoji() {
            return CandidateBar::Hide;
        }
        let Ok(context) = self.buffer.context() else {
            return CandidateBar::Hide;
        };
        if self.punctuation.can_edit_previous() {
            return CandidateBar::Show {
                candidates: self.punctuation.options().to_vec(),
                highlighted: self.punctuation.previewed_index(),
            };
        }
        let Some(word) = completed_word(&context) else {
            return CandidateBar::Hide;
        };
        let anchor = self.buffer.position_of(&context);
        self.history
            .find_active_slot(&anchor, word)
            .and_then(|slot| self.history.slot(slot))
            .filter(|s| !s.is_empty())
            .map(|s| CandidateBar::Show {
                candidates: s.candidates().to_vec(),
                highlighted: s
                    .candidates()
                    .iter()
                    .position(|c| c == word)
                    .or(s.selected_index())
                    .unwrap_or(0),
            })
            .unwrap_or(CandidateBar::Hide)
    }

    pub(super) fn refresh_capitalization(&mut self) {
        let context = self.buffer.context().ok();
        self.caps.recompute(context.as_deref());
    }
}
