//! Shift / caps-lock state, re-derived from the trailing context after every
//! edit.

use std::time::Duration;

use tracing::trace;

use crate::text::is_sentence_end;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CapitalizationState {
    #[default]
    None,
    /// One-shot: consumed by the next inserted character.
    Shift,
    /// Sticky until explicitly turned off.
    Caps,
}

impl CapitalizationState {
    pub fn is_upper(self) -> bool {
        !matches!(self, Self::None)
    }
}

pub struct CapitalizationMachine {
    state: CapitalizationState,
    autocapitalize: bool,
    ignore: Vec<char>,
    double_tap: Duration,
    last_shift_tap: Option<Duration>,
}

impl CapitalizationMachine {
    pub fn new(autocapitalize: bool, ignore: Vec<char>, double_tap: Duration) -> Self {
        Self {
            state: CapitalizationState::None,
            autocapitalize,
            ignore,
            double_tap,
            last_shift_tap: None,
        }
    }

    pub fn state(&self) -> CapitalizationState {
        self.state
    }

    pub fn set_autocapitalize(&mut self, enabled: bool) {
        self.autocapitalize = enabled;
    }

    /// What the trailing context calls for, ignoring the current state.
    fn derive(&self, context: Option<&str>) -> CapitalizationState {
        let context = match context {
            Some(c) if !c.is_empty() => c,
            _ => return CapitalizationState::Shift,
        };
        let mut tail = context.chars().rev();
        let last = tail.next();
        if last == Some('\n') {
            return CapitalizationState::Shift;
        }
        let before = tail.next();
        match (last, before) {
            (Some(' '), Some(c)) if is_sentence_end(c, &self.ignore) => CapitalizationState::Shift,
            _ => CapitalizationState::None,
        }
    }

    /// Recompute after a buffer mutation. `None` means the context could not be
    /// read. An active caps lock always survives.
    pub fn recompute(&mut self, context: Option<&str>) -> CapitalizationState {
        if self.state == CapitalizationState::Caps {
            return self.state;
        }
        self.state = if self.autocapitalize {
            self.derive(context)
        } else {
            CapitalizationState::None
        };
        trace!(state = ?self.state, "capitalization recomputed");
        self.state
    }

    /// A character was inserted: a pending one-shot shift is spent.
    pub fn consume(&mut self) {
        if self.state == CapitalizationState::Shift {
            self.state = CapitalizationState::None;
        }
    }

    /// Explicit shift-key activation at time `now`. Two activations within the
    /// double-tap window lock caps; any activation while locked releases it.
    pub fn tap_shift(&mut self, now: Duration) -> CapitalizationState {
        let quick_second = self
            .last_shift_tap
            .is_some_and(|prev| now.saturating_sub(prev) <= self.double_tap);
        self.state = match self.state {
            CapitalizationState::Caps => CapitalizationState::None,
            CapitalizationState::Shift if quick_second => CapitalizationState::Caps,
            CapitalizationState::Shift => CapitalizationState::None,
            CapitalizationState::None => CapitalizationState::Shift,
        };
        self.last_shift_tap = match self.state {
            CapitalizationState::Shift => Some(now),
            _ => None,
        };
        trace!(state = ?self.state, "shift tapped");
        self.state
    }
}

impl Default for CapitalizationMachine {
    fn default() -> Self {
        Self::new(
            true,
            vec![' ', ',', ':', ';'],
            Duration::from_millis(300),
        )
    }
}
