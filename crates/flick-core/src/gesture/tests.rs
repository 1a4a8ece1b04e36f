use proptest::prelude::*;

use super::*;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn key() -> Size {
    Size::new(40.0, 60.0)
}

fn classifier() -> GestureClassifier<&'static str> {
    GestureClassifier::new(GestureConfig::default())
}

fn gestures(events: Vec<GestureEvent<&'static str>>) -> Vec<Gesture> {
    events.into_iter().map(|e| e.gesture).collect()
}

#[test]
fn test_tap() {
    let mut c = classifier();
    c.touch_down(Point::new(10.0, 10.0), key(), "a", ms(0));
    assert!(c.is_active());
    assert!(c.touch_moved(Point::new(12.0, 11.0), ms(50)).is_empty());
    let events = c.touch_up(ms(120));
    assert_eq!(
        events,
        vec![GestureEvent {
            target: "a",
            gesture: Gesture::Tap
        }]
    );
    assert!(!c.is_active());
    assert_eq!(c.next_deadline(), None);
}

#[test]
fn test_long_press_and_repeat() {
    let mut c = classifier();
    c.touch_down(Point::default(), key(), "del", ms(0));
    assert_eq!(c.next_deadline(), Some(ms(300)));
    assert!(c.poll(ms(299)).is_empty());
    assert_eq!(gestures(c.poll(ms(300))), vec![Gesture::LongPressBegin]);
    assert_eq!(
        gestures(c.poll(ms(520))),
        vec![Gesture::LongPressRepeat, Gesture::LongPressRepeat]
    );
    // Release after a long press is not a tap.
    assert!(c.touch_up(ms(530)).is_empty());
    assert!(c.poll(ms(2000)).is_empty());
}

#[test]
fn test_late_release_fires_long_press_not_tap() {
    let mut c = classifier();
    c.touch_down(Point::default(), key(), "a", ms(0));
    assert_eq!(gestures(c.touch_up(ms(350))), vec![Gesture::LongPressBegin]);
}

#[test]
fn test_swipe_directions() {
    let cases = [
        (Point::new(25.0, 0.0), Direction::Right),
        (Point::new(-25.0, 5.0), Direction::Left),
        (Point::new(3.0, 40.0), Direction::Down),
        (Point::new(0.0, -31.0), Direction::Up),
    ];
    for (to, expected) in cases {
        let mut c = classifier();
        c.touch_down(Point::default(), key(), "k", ms(0));
        assert_eq!(
            gestures(c.touch_moved(to, ms(40))),
            vec![Gesture::Swipe(expected)]
        );
    }
}

#[test]
fn test_threshold_scales_with_element() {
    let mut c = classifier();
    // 25pt is past half of 40 wide but short of half of 60 tall.
    c.touch_down(Point::default(), key(), "k", ms(0));
    assert!(c.touch_moved(Point::new(0.0, 25.0), ms(10)).is_empty());
    assert_eq!(
        gestures(c.touch_moved(Point::new(0.0, 30.0), ms(20))),
        vec![Gesture::Swipe(Direction::Down)]
    );
}

#[test]
fn test_swipe_cancels_long_press() {
    let mut c = classifier();
    c.touch_down(Point::default(), key(), "k", ms(0));
    c.touch_moved(Point::new(30.0, 0.0), ms(100));
    // Held past the long-press delay measured from the swipe.
    assert!(c.poll(ms(399)).is_empty());
    assert_eq!(
        gestures(c.poll(ms(400))),
        vec![Gesture::SwipeHoldRepeat(Direction::Right)]
    );
    assert_eq!(
        gestures(c.poll(ms(500))),
        vec![Gesture::SwipeHoldRepeat(Direction::Right)]
    );
    assert!(c.touch_up(ms(550)).is_empty());
    assert!(c.poll(ms(5000)).is_empty());
}

#[test]
fn test_no_swipe_after_long_press() {
    let mut c = classifier();
    c.touch_down(Point::default(), key(), "k", ms(0));
    c.poll(ms(300));
    let events = gestures(c.touch_moved(Point::new(100.0, 0.0), ms(310)));
    assert!(events.iter().all(|g| !matches!(g, Gesture::Swipe(_))));
}

#[test]
fn test_touch_down_supersedes_sequence() {
    let mut c = classifier();
    c.touch_down(Point::default(), key(), "a", ms(0));
    c.touch_down(Point::default(), key(), "b", ms(100));
    assert!(c.poll(ms(350)).is_empty());
    let events = c.poll(ms(400));
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].target, "b");
}

#[test]
fn test_cancel_stops_repeats() {
    let mut c = classifier();
    c.touch_down(Point::default(), key(), "k", ms(0));
    c.poll(ms(300));
    c.cancel();
    assert!(!c.is_active());
    assert!(c.poll(ms(1000)).is_empty());
    assert!(c.touch_up(ms(1000)).is_empty());
}

fn direction_strategy() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
    ]
}

proptest! {
    #[test]
    fn swipe_fires_exactly_once(
        direction in direction_strategy(),
        steps in proptest::collection::vec(1.0f64..15.0, 1..40),
        wobble in -5.0f64..5.0,
    ) {
        let size = key();
        let mut c = classifier();
        c.touch_down(Point::default(), size, "k", ms(0));
        let mut events = Vec::new();
        let mut travelled = 0.0f64;
        for (i, step) in steps.iter().enumerate() {
            travelled += *step;
            let at = match direction {
                Direction::Right => Point::new(travelled, wobble),
                Direction::Left => Point::new(-travelled, wobble),
                Direction::Down => Point::new(wobble, travelled),
                Direction::Up => Point::new(wobble, -travelled),
            };
            events.extend(gestures(c.touch_moved(at, ms(i as u64))));
        }
        // Make sure the deadzone was left, within the long-press window.
        let far = 100.0;
        let at = match direction {
            Direction::Right => Point::new(far, wobble),
            Direction::Left => Point::new(-far, wobble),
            Direction::Down => Point::new(wobble, far),
            Direction::Up => Point::new(wobble, -far),
        };
        events.extend(gestures(c.touch_moved(at, ms(45))));
        events.extend(gestures(c.touch_up(ms(60))));

        let swipes: Vec<Gesture> = events
            .iter()
            .copied()
            .filter(|g| matches!(g, Gesture::Swipe(_)))
            .collect();
        prop_assert_eq!(swipes, vec![Gesture::Swipe(direction)]);
        prop_assert!(!events.contains(&Gesture::Tap));
        prop_assert!(!events.contains(&Gesture::LongPressBegin));
    }
}
