//! Touch-sequence classification.
//!
//! One touch sequence (down, moves, up) produces at most one discrete gesture
//! (tap, long press or swipe) plus any number of repeats while the finger is
//! held. Timers live in a [`Scheduler`] owned by the classifier and are all
//! cancelled whenever a sequence ends or is superseded.

#[cfg(test)]
mod tests;

use std::time::Duration;

use tracing::debug;

use crate::schedule::Scheduler;
use crate::settings::GestureSettings;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Size of the element the touch started on; swipe thresholds scale with it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Tap,
    LongPressBegin,
    LongPressRepeat,
    Swipe(Direction),
    SwipeHoldRepeat(Direction),
}

impl Gesture {
    pub fn is_repeat(self) -> bool {
        matches!(self, Self::LongPressRepeat | Self::SwipeHoldRepeat(_))
    }
}

/// A classified gesture together with what it was performed on.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureEvent<K> {
    pub target: K,
    pub gesture: Gesture,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    pub long_press: Duration,
    pub repeat: Duration,
    /// Fraction of the element's width/height a touch must travel to swipe.
    pub swipe_fraction: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            long_press: Duration::from_millis(300),
            repeat: Duration::from_millis(100),
            swipe_fraction: 0.5,
        }
    }
}

impl From<&GestureSettings> for GestureConfig {
    fn from(s: &GestureSettings) -> Self {
        Self {
            long_press: s.long_press(),
            repeat: s.repeat(),
            swipe_fraction: s.swipe_fraction,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Timer {
    LongPress,
    LongPressRepeat,
    SwipeHold(Direction),
}

#[derive(Debug, Clone)]
enum Phase<K> {
    Idle,
    Down {
        target: K,
        origin: Point,
        size: Size,
        started: Duration,
    },
    LongPress {
        target: K,
    },
    Swiped {
        target: K,
    },
}

pub struct GestureClassifier<K> {
    config: GestureConfig,
    phase: Phase<K>,
    timers: Scheduler<Timer>,
}

impl<K: Clone> GestureClassifier<K> {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            phase: Phase::Idle,
            timers: Scheduler::new(),
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.phase, Phase::Idle)
    }

    /// When the next timer-driven gesture is due, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_due()
    }

    fn target(&self) -> Option<&K> {
        match &self.phase {
            Phase::Idle => None,
            Phase::Down { target, .. }
            | Phase::LongPress { target }
            | Phase::Swiped { target } => Some(target),
        }
    }

    /// Begin a new sequence. An unfinished previous sequence is abandoned.
    pub fn touch_down(&mut self, at: Point, size: Size, target: K, now: Duration) {
        self.cancel();
        self.timers
            .schedule_once(now + self.config.long_press, Timer::LongPress);
        self.phase = Phase::Down {
            target,
            origin: at,
            size,
            started: now,
        };
    }

    /// Deliver a position sample. Timers due by `now` fire first.
    pub fn touch_moved(&mut self, at: Point, now: Duration) -> Vec<GestureEvent<K>> {
        let mut events = self.poll(now);
        let Phase::Down {
            target,
            origin,
            size,
            ..
        } = &self.phase
        else {
            return events;
        };
        let Some(direction) = self.classify(*origin, at, *size) else {
            return events;
        };
        let target = target.clone();
        debug!(?direction, "swipe");
        self.timers.cancel_all();
        self.timers.schedule_repeating(
            now + self.config.long_press,
            self.config.repeat,
            Timer::SwipeHold(direction),
        );
        self.phase = Phase::Swiped {
            target: target.clone(),
        };
        events.push(GestureEvent {
            target,
            gesture: Gesture::Swipe(direction),
        });
        events
    }

    /// End the sequence. A touch that neither swiped nor long-pressed is a tap.
    pub fn touch_up(&mut self, now: Duration) -> Vec<GestureEvent<K>> {
        let mut events = self.poll(now);
        if let Phase::Down { target, .. } = &self.phase {
            events.push(GestureEvent {
                target: target.clone(),
                gesture: Gesture::Tap,
            });
        }
        self.cancel();
        events
    }

    /// Fire every timer due by `now`, in deadline order.
    pub fn poll(&mut self, now: Duration) -> Vec<GestureEvent<K>> {
        let mut events = Vec::new();
        while let Some((_, timer)) = self.timers.pop_due(now) {
            let Some(target) = self.target().cloned() else {
                self.timers.cancel_all();
                break;
            };
            let gesture = match timer {
                Timer::LongPress => {
                    if let Phase::Down { started, .. } = self.phase {
                        self.timers.schedule_repeating(
                            started + self.config.long_press + self.config.repeat,
                            self.config.repeat,
                            Timer::LongPressRepeat,
                        );
                    }
                    self.phase = Phase::LongPress {
                        target: target.clone(),
                    };
                    debug!("long press");
                    Gesture::LongPressBegin
                }
                Timer::LongPressRepeat => Gesture::LongPressRepeat,
                Timer::SwipeHold(direction) => Gesture::SwipeHoldRepeat(direction),
            };
            events.push(GestureEvent { target, gesture });
        }
        events
    }

    /// Abandon the current sequence and every pending timer.
    pub fn cancel(&mut self) {
        self.timers.cancel_all();
        self.phase = Phase::Idle;
    }

    /// Dominant-axis direction once the displacement leaves the deadzone.
    fn classify(&self, origin: Point, at: Point, size: Size) -> Option<Direction> {
        let dx = (at.x - origin.x) / size.width.max(1.0);
        let dy = (at.y - origin.y) / size.height.max(1.0);
        let threshold = self.config.swipe_fraction;
        if dx.abs() < threshold && dy.abs() < threshold {
            return None;
        }
        Some(if dx.abs() >= dy.abs() {
            if dx > 0.0 {
                Direction::Right
            } else {
                Direction::Left
            }
        } else if dy > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        })
    }
}
