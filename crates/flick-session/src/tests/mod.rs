mod commit;
mod learning;
mod simulator;

use std::time::Duration;

use flick_core::buffer::MemoryDocument;
use flick_core::gesture::{Direction, Gesture};

use super::{EditResponse, KeyTarget, KeyboardSession};

pub(super) type TestSession = KeyboardSession<MemoryDocument>;

/// Default settings and lexicon over a document holding `text`.
pub(super) fn session(text: &str) -> TestSession {
    KeyboardSession::with_defaults(MemoryDocument::with_text(text))
}

pub(super) fn text(session: &TestSession) -> &str {
    session.document().text()
}

pub(super) fn gesture(session: &mut TestSession, target: KeyTarget, g: Gesture) -> EditResponse {
    session.handle_gesture(&target, g, Duration::ZERO)
}

pub(super) fn tap(session: &mut TestSession, c: char) -> EditResponse {
    gesture(session, KeyTarget::Char(c), Gesture::Tap)
}

/// Tap each character of `s` in turn.
pub(super) fn type_string(session: &mut TestSession, s: &str) -> Vec<EditResponse> {
    s.chars().map(|c| tap(session, c)).collect()
}

pub(super) fn swipe(session: &mut TestSession, direction: Direction) -> EditResponse {
    gesture(session, KeyTarget::Surface, Gesture::Swipe(direction))
}

/// Type `word` and commit it with a swipe right.
pub(super) fn type_word(session: &mut TestSession, word: &str) -> EditResponse {
    type_string(session, word);
    swipe(session, Direction::Right)
}
