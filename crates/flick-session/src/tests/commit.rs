use flick_core::buffer::TextDocumentProxy;

use super::*;
use crate::types::{CandidateBar, HapticEvent, Notification};

fn shown(candidates: &[&str], highlighted: usize) -> CandidateBar {
    CandidateBar::Show {
        candidates: candidates.iter().map(|s| s.to_string()).collect(),
        highlighted,
    }
}

// --- Autocorrect on commit ---

#[test]
fn test_commit_corrects_typo() {
    let mut s = session("see ");
    let resp = type_word(&mut s, "teh");
    assert_eq!(text(&s), "see the ");
    assert_eq!(resp.candidates, shown(&["teh", "the", "tea", "ten", "tee"], 1));
    assert_eq!(resp.haptic, Some(HapticEvent::GestureImpact));
    assert_eq!(s.history().len(), 1);
}

#[test]
fn test_commit_matches_typed_case() {
    // Start of document: the shift makes this "Teh".
    let mut s = session("");
    type_word(&mut s, "teh");
    assert_eq!(text(&s), "The ");
}

#[test]
fn test_commit_contraction() {
    let mut s = session("see ");
    type_word(&mut s, "im");
    assert_eq!(text(&s), "see I'm ");
}

#[test]
fn test_known_word_is_kept() {
    let mut s = session("see ");
    let resp = type_word(&mut s, "cat");
    assert_eq!(text(&s), "see cat ");
    assert_eq!(resp.candidates, shown(&["cat"], 0));
}

#[test]
fn test_word_ending_in_punctuation_is_not_corrected() {
    let mut s = session("see ");
    let resp = type_word(&mut s, "teh?");
    assert_eq!(text(&s), "see teh? ");
    assert!(s.history().is_empty());
    assert_eq!(resp.candidates, CandidateBar::Hide);
}

#[test]
fn test_autocorrect_off_only_adds_space() {
    let mut s = session("see ");
    let resp = gesture(&mut s, KeyTarget::Return, Gesture::LongPressBegin);
    assert_eq!(resp.notification, Some(Notification::Autocorrect(false)));
    assert!(!s.autocorrect());

    type_word(&mut s, "teh");
    assert_eq!(text(&s), "see teh ");
    assert!(s.history().is_empty());
}

#[test]
fn test_user_taught_word_wins_over_correction() {
    let mut s = session("see ");
    s.lexicon().learn("definately");
    let resp = type_word(&mut s, "definately");
    assert_eq!(text(&s), "see definately ");
    assert_eq!(resp.candidates, shown(&["definately", "definitely"], 0));
}

// --- Cycling committed words ---

#[test]
fn test_cycle_through_alternates() {
    let mut s = session("see ");
    type_word(&mut s, "teh");

    let resp = swipe(&mut s, Direction::Down);
    assert_eq!(text(&s), "see tea ");
    assert_eq!(resp.candidates, shown(&["teh", "the", "tea", "ten", "tee"], 2));

    swipe(&mut s, Direction::Up);
    swipe(&mut s, Direction::Up);
    assert_eq!(text(&s), "see teh ");

    swipe(&mut s, Direction::Down);
    assert_eq!(text(&s), "see the ");
}

#[test]
fn test_cycle_stops_at_last_candidate() {
    let mut s = session("see ");
    type_word(&mut s, "teh");
    for _ in 0..3 {
        swipe(&mut s, Direction::Down);
    }
    assert_eq!(text(&s), "see tee ");
    let resp = swipe(&mut s, Direction::Down);
    assert!(resp.consumed);
    assert_eq!(resp.haptic, None);
    assert_eq!(text(&s), "see tee ");
}

#[test]
fn test_hold_repeat_cycles() {
    let mut s = session("see ");
    type_word(&mut s, "teh");
    gesture(
        &mut s,
        KeyTarget::Surface,
        Gesture::SwipeHoldRepeat(Direction::Down),
    );
    gesture(
        &mut s,
        KeyTarget::Surface,
        Gesture::SwipeHoldRepeat(Direction::Down),
    );
    assert_eq!(text(&s), "see ten ");
}

#[test]
fn test_typing_past_word_ends_cycling() {
    let mut s = session("see ");
    type_word(&mut s, "teh");
    tap(&mut s, 'x');
    let resp = swipe(&mut s, Direction::Up);
    assert_eq!(text(&s), "see the x");
    assert_eq!(resp.haptic, None);
}

#[test]
fn test_older_word_revived_by_cursor() {
    let mut s = session("see ");
    type_word(&mut s, "teh");
    type_word(&mut s, "cat");
    assert_eq!(text(&s), "see the cat ");

    s.document_mut().adjust_cursor(-4);
    let resp = s.sync();
    assert_eq!(resp.candidates, shown(&["teh", "the", "tea", "ten", "tee"], 1));

    swipe(&mut s, Direction::Up);
    assert_eq!(text(&s), "see teh cat ");
}

#[test]
fn test_history_depth_forgets_oldest() {
    let mut s = session("see ");
    type_word(&mut s, "teh");
    for _ in 0..s.history().depth() {
        type_word(&mut s, "cat");
    }
    // Back to just after "the ".
    let tail = " cat".repeat(s.history().depth()).len() as i64;
    s.document_mut().adjust_cursor(-tail);
    assert_eq!(s.sync().candidates, CandidateBar::Hide);
}
