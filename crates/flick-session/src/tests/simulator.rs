//! Headless keyboard: raw touches go through the gesture classifier and the
//! resulting gestures drive a session, the way a host would wire them.

use std::time::Duration;

use flick_core::gesture::{GestureClassifier, GestureConfig, GestureEvent, Point, Size};

use super::*;

const KEY: Size = Size {
    width: 40.0,
    height: 60.0,
};

struct Keyboard {
    classifier: GestureClassifier<KeyTarget>,
    session: TestSession,
    clock: Duration,
}

impl Keyboard {
    fn new(text: &str) -> Self {
        Self {
            classifier: GestureClassifier::new(GestureConfig::default()),
            session: session(text),
            clock: Duration::ZERO,
        }
    }

    fn apply(&mut self, events: Vec<GestureEvent<KeyTarget>>) -> Vec<EditResponse> {
        events
            .into_iter()
            .map(|e| self.session.handle_gesture(&e.target, e.gesture, self.clock))
            .collect()
    }

    fn advance(&mut self, ms: u64) -> Vec<EditResponse> {
        self.clock += Duration::from_millis(ms);
        let events = self.classifier.poll(self.clock);
        self.apply(events)
    }

    fn down(&mut self, target: KeyTarget) {
        self.classifier
            .touch_down(Point::new(20.0, 30.0), KEY, target, self.clock);
    }

    fn up(&mut self) -> Vec<EditResponse> {
        let events = self.classifier.touch_up(self.clock);
        self.apply(events)
    }

    fn move_to(&mut self, x: f64, y: f64) -> Vec<EditResponse> {
        let events = self.classifier.touch_moved(Point::new(x, y), self.clock);
        self.apply(events)
    }

    fn tap(&mut self, c: char) {
        self.down(KeyTarget::Char(c));
        self.advance(40);
        self.up();
        self.advance(60);
    }

    fn type_str(&mut self, s: &str) {
        for c in s.chars() {
            self.tap(c);
        }
    }

    fn flick(&mut self, dx: f64, dy: f64) -> Vec<EditResponse> {
        self.down(KeyTarget::Surface);
        self.advance(30);
        let responses = self.move_to(20.0 + dx, 30.0 + dy);
        self.advance(30);
        self.up();
        responses
    }

    fn text(&self) -> &str {
        self.session.document().text()
    }
}

#[test]
fn test_type_and_flick_right() {
    let mut kb = Keyboard::new("see ");
    kb.type_str("teh");
    assert_eq!(kb.text(), "see teh");
    let responses = kb.flick(30.0, 0.0);
    assert_eq!(responses.len(), 1);
    assert_eq!(kb.text(), "see the ");
}

#[test]
fn test_flick_down_cycles() {
    let mut kb = Keyboard::new("see ");
    kb.type_str("teh");
    kb.flick(30.0, 0.0);
    // Positive y is down.
    kb.flick(0.0, 40.0);
    assert_eq!(kb.text(), "see tea ");
    kb.flick(0.0, -40.0);
    assert_eq!(kb.text(), "see the ");
}

#[test]
fn test_short_move_is_still_a_tap() {
    let mut kb = Keyboard::new("see ");
    kb.down(KeyTarget::Char('a'));
    kb.advance(20);
    assert!(kb.move_to(25.0, 35.0).is_empty());
    kb.up();
    assert_eq!(kb.text(), "see a");
}

#[test]
fn test_held_backspace_repeats() {
    let mut kb = Keyboard::new("abcdef");
    kb.down(KeyTarget::Backspace);
    assert!(kb.advance(299).is_empty());
    assert_eq!(kb.advance(1).len(), 1);
    assert_eq!(kb.text(), "abcde");
    assert_eq!(kb.advance(220).len(), 2);
    assert_eq!(kb.text(), "abc");
    kb.up();
    kb.advance(500);
    assert_eq!(kb.text(), "abc");
}

#[test]
fn test_swipe_hold_deletes_words() {
    let mut kb = Keyboard::new("one two three four");
    kb.down(KeyTarget::Surface);
    kb.advance(30);
    kb.move_to(-10.0, 30.0);
    assert_eq!(kb.text(), "one two three ");
    // Hold starts repeating one long-press interval after the swipe.
    kb.advance(300);
    assert_eq!(kb.text(), "one two ");
    kb.advance(100);
    assert_eq!(kb.text(), "one ");
    kb.up();
    kb.advance(1000);
    assert_eq!(kb.text(), "one ");
}

#[test]
fn test_long_press_letter_then_release() {
    let mut kb = Keyboard::new("see ");
    kb.down(KeyTarget::Char('q'));
    kb.advance(350);
    let responses = kb.up();
    assert!(responses.is_empty());
    assert_eq!(kb.text(), "see Q");
}

#[test]
fn test_shift_double_tap_through_classifier() {
    let mut kb = Keyboard::new("see ");
    for _ in 0..2 {
        kb.down(KeyTarget::Shift);
        kb.advance(30);
        kb.up();
        kb.advance(50);
    }
    kb.type_str("ab");
    assert_eq!(kb.text(), "see AB");
}
