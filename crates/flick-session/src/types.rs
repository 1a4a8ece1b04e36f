use std::fmt;

use flick_core::capitalization::CapitalizationState;

/// What a touch sequence started on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyTarget {
    Char(char),
    Shift,
    Backspace,
    Return,
    Globe,
    Emoji(String),
    EmojiSearch,
    /// The free swipe area outside any key.
    Surface,
}

/// Which keyboard plane is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewType {
    #[default]
    Characters,
    Symbols,
    ExtraSymbols,
    Emoji,
    SearchEmoji,
}

impl ViewType {
    pub fn is_emoji(self) -> bool {
        matches!(self, Self::Emoji | Self::SearchEmoji)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateBar {
    /// No change since the previous response.
    Keep,
    Show {
        candidates: Vec<String>,
        highlighted: usize,
    },
    Hide,
}

/// Tags a haptics collaborator may turn into physical feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HapticEvent {
    TypingImpact,
    GestureImpact,
}

/// Transient on-screen message after an explicit toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Autocorrect(bool),
    Learned(String),
    Forgotten(String),
    Locale(String),
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Autocorrect(true) => f.write_str("Autocorrection on"),
            Self::Autocorrect(false) => f.write_str("Autocorrection off"),
            Self::Learned(word) => write!(f, "Learned \"{word}\""),
            Self::Forgotten(word) => write!(f, "Forgot \"{word}\""),
            Self::Locale(locale) => write!(f, "Keyboard: {locale}"),
        }
    }
}

/// Everything the host needs to redraw after one gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct EditResponse {
    /// False when the gesture was aborted (no focused document).
    pub consumed: bool,
    pub candidates: CandidateBar,
    pub capitalization: CapitalizationState,
    pub view: ViewType,
    pub locale: String,
    pub notification: Option<Notification>,
    pub haptic: Option<HapticEvent>,
    /// Current emoji search text while the search field is showing.
    pub emoji_query: Option<String>,
}

/// What a handler did, before it is turned into an [`EditResponse`].
#[derive(Debug, Default)]
pub(crate) struct Effect {
    /// The document changed; capitalization must be re-derived.
    pub(crate) mutated: bool,
    pub(crate) haptic: Option<HapticEvent>,
    pub(crate) notification: Option<Notification>,
}

impl Effect {
    pub(crate) fn none() -> Self {
        Self::default()
    }

    pub(crate) fn typed() -> Self {
        Self {
            mutated: true,
            haptic: Some(HapticEvent::TypingImpact),
            notification: None,
        }
    }

    pub(crate) fn gesture() -> Self {
        Self {
            mutated: true,
            haptic: Some(HapticEvent::GestureImpact),
            notification: None,
        }
    }

    /// Feedback without touching the document.
    pub(crate) fn feedback(haptic: HapticEvent) -> Self {
        Self {
            mutated: false,
            haptic: Some(haptic),
            notification: None,
        }
    }

    pub(crate) fn notify(mut self, notification: Notification) -> Self {
        self.notification = Some(notification);
        self
    }
}
