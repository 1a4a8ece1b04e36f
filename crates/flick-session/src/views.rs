use tracing::debug;

use flick_core::buffer::TextDocumentProxy;

use super::types::{Effect, HapticEvent, Notification, ViewType};
use super::KeyboardSession;

impl<D: TextDocumentProxy> KeyboardSession<D> {
    fn set_view(&mut self, view: ViewType) {
        if view != ViewType::SearchEmoji {
            self.emoji_query.clear();
        }
        debug!(from = ?self.view, to = ?view, "view changed");
        self.view = view;
    }

    /// Shift swipe-right: Characters, Symbols, ExtraSymbols, round again.
    pub(crate) fn cycle_symbol_views(&mut self) -> Effect {
        let next = match self.view {
            ViewType::Characters => ViewType::Symbols,
            ViewType::Symbols => ViewType::ExtraSymbols,
            ViewType::ExtraSymbols | ViewType::Emoji | ViewType::SearchEmoji => {
                ViewType::Characters
            }
        };
        self.set_view(next);
        Effect::feedback(HapticEvent::GestureImpact)
    }

    /// Backspace swipe-left: in and out of the emoji picker.
    pub(crate) fn toggle_emoji_view(&mut self) -> Effect {
        let next = if self.view.is_emoji() {
            ViewType::Characters
        } else {
            ViewType::Emoji
        };
        self.set_view(next);
        Effect::feedback(HapticEvent::GestureImpact)
    }

    pub(crate) fn toggle_emoji_search(&mut self) -> Effect {
        let next = match self.view {
            ViewType::SearchEmoji => ViewType::Emoji,
            _ => ViewType::SearchEmoji,
        };
        self.set_view(next);
        Effect::feedback(HapticEvent::TypingImpact)
    }

    pub(crate) fn toggle_autocorrect(&mut self) -> Effect {
        let enabled = !self.settings.typing.autocorrect;
        self.set_autocorrect(enabled);
        Effect::feedback(HapticEvent::GestureImpact).notify(Notification::Autocorrect(enabled))
    }

    /// Advance to the next enabled locale. With a single locale this only
    /// repeats its name.
    pub(crate) fn next_locale(&mut self) -> Effect {
        let count = self.settings.locale.enabled.len().max(1);
        self.locale_index = (self.locale_index + 1) % count;
        let locale = self.locale().to_string();
        self.settings.locale.current = locale.clone();
        debug!(%locale, "locale switched");
        Effect::feedback(HapticEvent::TypingImpact).notify(Notification::Locale(locale))
    }

    pub fn set_autocorrect(&mut self, enabled: bool) {
        debug!(enabled, "autocorrect");
        self.settings.typing.autocorrect = enabled;
    }

    pub fn set_autocapitalize(&mut self, enabled: bool) {
        self.settings.typing.autocapitalize = enabled;
        self.caps.set_autocapitalize(enabled);
        self.refresh_capitalization();
    }

    pub fn emoji_query(&self) -> &str {
        &self.emoji_query
    }
}
