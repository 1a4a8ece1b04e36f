use std::sync::Arc;

use flick_core::dict::Lexicon;
use flick_core::settings::Settings;
use flick_core::user_dict::UserDictionary;

use super::*;
use crate::types::{HapticEvent, Notification};

fn session_with_threshold(text: &str, threshold: u32) -> TestSession {
    let mut settings = Settings::default();
    settings.suggestions.learn_threshold = threshold;
    KeyboardSession::new(
        MemoryDocument::with_text(text),
        Lexicon::with_defaults(),
        settings,
    )
}

#[test]
fn test_repeated_verbatim_use_promotes() {
    let mut s = session("see ");
    let first = type_word(&mut s, "zorblax");
    let second = type_word(&mut s, "zorblax");
    assert_eq!(first.notification, None);
    assert_eq!(second.notification, None);
    assert_eq!(s.lexicon().user().use_count("zorblax"), 2);

    let third = type_word(&mut s, "zorblax");
    assert_eq!(
        third.notification,
        Some(Notification::Learned("zorblax".into()))
    );
    assert!(s.lexicon().is_user_taught("zorblax"));

    let fourth = type_word(&mut s, "zorblax");
    assert_eq!(fourth.notification, None);
    assert_eq!(text(&s), "see zorblax zorblax zorblax zorblax ");
}

#[test]
fn test_learn_threshold_comes_from_settings() {
    let mut s = session_with_threshold("see ", 5);
    assert_eq!(s.lexicon().user().threshold(), 5);
    for _ in 0..4 {
        assert_eq!(type_word(&mut s, "zorblax").notification, None);
    }
    assert!(!s.lexicon().is_user_taught("zorblax"));
    assert_eq!(
        type_word(&mut s, "zorblax").notification,
        Some(Notification::Learned("zorblax".into()))
    );
}

#[test]
fn test_swapped_user_dictionary_takes_session_threshold() {
    let mut s = session_with_threshold("see ", 2);
    s.set_user_dictionary(Arc::new(UserDictionary::with_threshold(9)));
    assert_eq!(s.lexicon().user().threshold(), 2);
    type_word(&mut s, "zorblax");
    type_word(&mut s, "zorblax");
    assert!(s.lexicon().is_user_taught("zorblax"));
}

#[test]
fn test_known_words_are_not_counted() {
    let mut s = session("see ");
    type_word(&mut s, "cat");
    type_word(&mut s, "teh");
    assert_eq!(s.lexicon().user().use_count("cat"), 0);
    assert_eq!(s.lexicon().user().use_count("teh"), 0);
}

#[test]
fn test_swiping_back_to_typed_word_counts_a_use() {
    let mut s = session("see ");
    type_word(&mut s, "teh");
    swipe(&mut s, Direction::Up);
    assert_eq!(text(&s), "see teh ");
    assert_eq!(s.lexicon().user().use_count("teh"), 1);
}

#[test]
fn test_swipe_up_past_typed_word_toggles_learning() {
    let mut s = session("see ");
    type_word(&mut s, "teh");
    swipe(&mut s, Direction::Up);

    let resp = swipe(&mut s, Direction::Up);
    assert_eq!(resp.notification, Some(Notification::Learned("teh".into())));
    assert_eq!(resp.haptic, Some(HapticEvent::GestureImpact));
    assert!(s.lexicon().is_user_taught("teh"));
    assert_eq!(text(&s), "see teh ");

    let resp = swipe(&mut s, Direction::Up);
    assert_eq!(resp.notification, Some(Notification::Forgotten("teh".into())));
    assert!(!s.lexicon().is_user_taught("teh"));
}

#[test]
fn test_hold_repeat_never_toggles() {
    let mut s = session("see ");
    type_word(&mut s, "teh");
    swipe(&mut s, Direction::Up);
    let resp = gesture(
        &mut s,
        KeyTarget::Surface,
        Gesture::SwipeHoldRepeat(Direction::Up),
    );
    assert_eq!(resp.notification, None);
    assert!(!s.lexicon().is_user_taught("teh"));
}

#[test]
fn test_learned_word_is_no_longer_corrected() {
    let mut s = session("see ");
    type_word(&mut s, "teh");
    swipe(&mut s, Direction::Up);
    swipe(&mut s, Direction::Up);

    type_word(&mut s, "teh");
    assert_eq!(text(&s), "see teh teh ");
}

#[test]
fn test_learned_top_correction_keeps_typed_word() {
    // The user taught the correction's lowercase form: the typed word is
    // trusted as deliberate.
    let mut s = session("see ");
    s.lexicon().learn("the");
    type_word(&mut s, "teh");
    assert_eq!(text(&s), "see teh ");
}
