//! Ring of recent autocorrect decisions.
//!
//! Each committed word leaves a slot holding the typed word, its alternates
//! and the position the commit left the cursor at. Coming back to that exact
//! position with that word still in place reopens the slot, so the user can
//! browse alternates after having moved on.


use tracing::{debug, trace};

use crate::buffer::BufferPosition;
use crate::error::EditError;
use crate::text::match_case;

pub const DEFAULT_HISTORY_DEPTH: usize = 5;
pub const DEFAULT_MAX_SUGGESTIONS: usize = 7;

#[derive(Debug, Clone)]
pub struct SuggestionSlot {
    candidates: Vec<String>,
    /// `None` is the neutral state of a collapsed slot.
    selected: Option<usize>,
    anchor: BufferPosition,
    serial: u64,
}

impl SuggestionSlot {
    /// The typed word first, then alternates.
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected
            .and_then(|i| self.candidates.get(i))
            .map(String::as_str)
    }

    /// The word as the user typed it.
    pub fn original(&self) -> Option<&str> {
        self.candidates.first().map(String::as_str)
    }

    pub fn anchor(&self) -> BufferPosition {
        self.anchor
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    fn matches(&self, anchor: &BufferPosition, word: &str) -> bool {
        self.anchor == *anchor && self.candidates.iter().any(|c| c == word)
    }
}

/// Handle to a slot. Goes stale once the ring wraps over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotRef {
    index: usize,
    serial: u64,
}

/// Build a slot's candidate list: the typed word, then grammar completions,
/// then spell-checker guesses, each re-cased to the typed word's
/// capitalisation, deduplicated, capped at `max`.
pub fn order_candidates<'a, I>(word: &str, alternates: I, max: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut out = vec![word.to_string()];
    for alt in alternates {
        if out.len() >= max {
            break;
        }
        let cased = match_case(alt, word);
        if !out.contains(&cased) {
            out.push(cased);
        }
    }
    out.truncate(max.max(1));
    out
}

pub struct SuggestionHistory {
    slots: Vec<Option<SuggestionSlot>>,
    /// Next slot to overwrite (the oldest).
    cursor: usize,
    next_serial: u64,
    max_suggestions: usize,
}

impl SuggestionHistory {
    pub fn new(depth: usize, max_suggestions: usize) -> Self {
        Self {
            slots: vec![None; depth.max(1)],
            cursor: 0,
            next_serial: 0,
            max_suggestions: max_suggestions.max(1),
        }
    }

    pub fn depth(&self) -> usize {
        self.slots.len()
    }

    pub fn max_suggestions(&self) -> usize {
        self.max_suggestions
    }

    /// Number of slots still holding candidates.
    pub fn len(&self) -> usize {
        self.slots
            .iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Record `word` with its alternates (already in policy order) at `anchor`.
    /// The typed word is selected.
    pub fn record_suggestions(
        &mut self,
        word: &str,
        candidates: &[String],
        anchor: BufferPosition,
    ) -> SlotRef {
        let ordered = order_candidates(word, candidates, self.max_suggestions);
        self.record(ordered, 0, anchor)
    }

    /// Overwrite the oldest slot with a prepared candidate list.
    pub fn record(
        &mut self,
        mut candidates: Vec<String>,
        selected: usize,
        anchor: BufferPosition,
    ) -> SlotRef {
        candidates.truncate(self.max_suggestions);
        let selected = if candidates.is_empty() {
            None
        } else {
            Some(selected.min(candidates.len() - 1))
        };
        let serial = self.next_serial;
        self.next_serial += 1;
        let index = self.cursor;
        trace!(index, serial, ?candidates, "recording suggestion slot");
        self.slots[index] = Some(SuggestionSlot {
            candidates,
            selected,
            anchor,
            serial,
        });
        self.cursor = (self.cursor + 1) % self.slots.len();
        SlotRef { index, serial }
    }

    pub fn slot(&self, slot: SlotRef) -> Option<&SuggestionSlot> {
        self.slots
            .get(slot.index)?
            .as_ref()
            .filter(|s| s.serial == slot.serial)
    }

    fn slot_mut(&mut self, slot: SlotRef) -> Option<&mut SuggestionSlot> {
        self.slots
            .get_mut(slot.index)?
            .as_mut()
            .filter(|s| s.serial == slot.serial)
    }

    /// Slots from newest to oldest.
    fn newest_first(&self) -> impl Iterator<Item = usize> + '_ {
        let depth = self.slots.len();
        (1..=depth).map(move |back| (self.cursor + depth - back) % depth)
    }

    /// The slot recorded at `anchor` that still contains `last_word`.
    ///
    /// Both must agree: the trailing window alone can repeat after unrelated
    /// edits. When several slots qualify the newest wins. `None` is the normal
    /// answer once the user has typed past the word.
    pub fn find_active_slot(&self, anchor: &BufferPosition, last_word: &str) -> Option<SlotRef> {
        self.newest_first().find_map(|index| {
            self.slots[index]
                .as_ref()
                .filter(|s| s.matches(anchor, last_word))
                .map(|s| SlotRef {
                    index,
                    serial: s.serial,
                })
        })
    }

    /// Point the selection at `word`, if the slot holds it.
    pub fn select_word(&mut self, slot: SlotRef, word: &str) -> bool {
        let Some(s) = self.slot_mut(slot) else {
            return false;
        };
        match s.candidates.iter().position(|c| c == word) {
            Some(i) => {
                s.selected = Some(i);
                true
            }
            None => false,
        }
    }

    /// Move the selection by `delta`, clamped to the list. Returns the newly
    /// selected candidate, or `AtBoundary` if the selection could not move.
    pub fn cycle(&mut self, slot: SlotRef, delta: i32) -> Result<&str, EditError> {
        let s = self.slot_mut(slot).ok_or(EditError::NotEditable)?;
        let current = s.selected.ok_or(EditError::NotEditable)?;
        let last = s.candidates.len() as i64 - 1;
        let target = (current as i64 + delta as i64).clamp(0, last) as usize;
        if target == current {
            return Err(EditError::AtBoundary);
        }
        s.selected = Some(target);
        debug!(from = current, to = target, "suggestion cycled");
        Ok(s.candidates[target].as_str())
    }

    /// The slot's word was rewritten in place; follow it to the new cursor.
    pub fn reanchor(&mut self, slot: SlotRef, anchor: BufferPosition) {
        if let Some(s) = self.slot_mut(slot) {
            s.anchor = anchor;
        }
    }

    /// Collapse the newest slot anchored at `anchor`. Called when the word it
    /// describes has just been deleted.
    pub fn invalidate_newest_matching(&mut self, anchor: &BufferPosition) -> bool {
        let found = self.newest_first().find(|&index| {
            self.slots[index]
                .as_ref()
                .is_some_and(|s| !s.is_empty() && s.anchor == *anchor)
        });
        match found.and_then(|index| self.slots[index].as_mut()) {
            Some(s) => {
                debug!(serial = s.serial, "suggestion slot invalidated");
                s.candidates.clear();
                s.selected = None;
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
        self.cursor = 0;
    }
}

impl Default for SuggestionHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_DEPTH, DEFAULT_MAX_SUGGESTIONS)
    }
}
