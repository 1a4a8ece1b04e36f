//! Stateful keyboard session turning classified gestures into document edits.
//!
//! `KeyboardSession` owns the suggestion history, the punctuation cycler and
//! the capitalization state, and is the only component that mutates the host
//! document. Each call returns an [`EditResponse`] that the host translates
//! into redraws and haptics.

pub(crate) mod types;

mod commit;
mod cycling;
mod deletion;
mod dispatch;
mod response;
mod views;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use flick_core::buffer::{TextBuffer, TextDocumentProxy};
use flick_core::capitalization::{CapitalizationMachine, CapitalizationState};
use flick_core::dict::Lexicon;
use flick_core::history::SuggestionHistory;
use flick_core::punctuation::PunctuationCycler;
use flick_core::settings::Settings;
use flick_core::user_dict::UserDictionary;

pub use types::{CandidateBar, EditResponse, HapticEvent, KeyTarget, Notification, ViewType};

pub struct KeyboardSession<D> {
    buffer: TextBuffer<D>,
    lexicon: Lexicon,
    settings: Settings,

    history: SuggestionHistory,
    punctuation: PunctuationCycler,
    caps: CapitalizationMachine,

    view: ViewType,
    emoji_query: String,
    /// Index into `settings.locale.enabled`.
    locale_index: usize,
}

impl<D: TextDocumentProxy> KeyboardSession<D> {
    /// `settings` are assumed validated (see `flick_core::settings::validate`).
    pub fn new(doc: D, lexicon: Lexicon, settings: Settings) -> Self {
        lexicon
            .user()
            .set_threshold(settings.suggestions.learn_threshold);
        let buffer = TextBuffer::new(doc, settings.suggestions.context_window);
        let history = SuggestionHistory::new(
            settings.suggestions.history_depth,
            settings.suggestions.max_suggestions,
        );
        let punctuation = PunctuationCycler::new(settings.typing.punctuation.clone());
        let caps = CapitalizationMachine::new(
            settings.typing.autocapitalize,
            settings.sentence_end_ignore(),
            settings.gesture.double_tap(),
        );
        let locale_index = settings
            .locale
            .enabled
            .iter()
            .position(|l| *l == settings.locale.current)
            .unwrap_or(0);
        let mut session = Self {
            buffer,
            lexicon,
            settings,
            history,
            punctuation,
            caps,
            view: ViewType::Characters,
            emoji_query: String::new(),
            locale_index,
        };
        session.refresh_capitalization();
        session
    }

    /// Default settings and the bundled en_US lexicon.
    pub fn with_defaults(doc: D) -> Self {
        Self::new(doc, Lexicon::with_defaults(), Settings::default())
    }

    pub fn document(&self) -> &D {
        self.buffer.document()
    }

    /// Direct access for host-driven changes (cursor moves, external edits).
    /// Call [`Self::sync`] afterwards.
    pub fn document_mut(&mut self) -> &mut D {
        self.buffer.document_mut()
    }

    pub fn buffer(&self) -> &TextBuffer<D> {
        &self.buffer
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn lexicon_mut(&mut self) -> &mut Lexicon {
        &mut self.lexicon
    }

    /// Swap in a user dictionary (e.g. one loaded in the background), applying
    /// this session's learn threshold to it.
    pub fn set_user_dictionary(&mut self, user: Arc<UserDictionary>) {
        user.set_threshold(self.settings.suggestions.learn_threshold);
        self.lexicon.set_user(user);
    }

    pub fn history(&self) -> &SuggestionHistory {
        &self.history
    }

    pub fn capitalization(&self) -> CapitalizationState {
        self.caps.state()
    }

    pub fn view(&self) -> ViewType {
        self.view
    }

    pub fn locale(&self) -> &str {
        self.settings
            .locale
            .enabled
            .get(self.locale_index)
            .map(String::as_str)
            .unwrap_or(self.settings.locale.current.as_str())
    }

    pub fn autocorrect(&self) -> bool {
        self.settings.typing.autocorrect
    }

    pub fn punctuation_editable(&self) -> bool {
        self.buffer
            .context()
            .is_ok_and(|ctx| self.punctuation.is_editable(&ctx))
    }

    /// The host switched to another document (or reloaded this one).
    /// Suggestions recorded before never match again.
    pub fn begin_document(&mut self) -> EditResponse {
        self.buffer.begin_document();
        self.view = ViewType::Characters;
        self.emoji_query.clear();
        self.sync()
    }

    /// Re-derive state after the cursor moved or the text changed behind our
    /// back. A suggestion slot whose anchor and word match the new position
    /// becomes active again. Not consumed when no document is readable.
    pub fn sync(&mut self) -> EditResponse {
        self.punctuation.clear_edit();
        self.refresh_capitalization();
        let readable = self.buffer.context().is_ok();
        let mut resp = self.snapshot(readable);
        resp.candidates = self.candidate_bar();
        resp
    }
}
