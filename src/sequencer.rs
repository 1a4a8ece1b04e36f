use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, trace, warn};

use flick_core::buffer::TextDocumentProxy;
use flick_core::gesture::{GestureClassifier, GestureConfig, GestureEvent, Point, Size};
use flick_session::{EditResponse, KeyTarget, KeyboardSession};

use crate::async_worker::{DictionaryLoader, LoadedDictionary};

/// Raw input as the host delivers it.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    TouchDown {
        at: Point,
        size: Size,
        target: KeyTarget,
    },
    TouchMoved {
        at: Point,
    },
    TouchUp,
    TouchCancelled,
    /// A timer deadline passed (see [`Sequencer::next_deadline`]).
    Tick,
}

/// Single-threaded event loop in front of a [`KeyboardSession`].
///
/// Host events are queued in arrival order and drained by [`Sequencer::pump`].
/// Each classified gesture is applied to the session in full before the next
/// event is looked at, so gestures never interleave with a commit in
/// progress. Dictionaries loaded in the background are installed here, on the
/// sequencer's thread, between events.
pub struct Sequencer<D> {
    session: KeyboardSession<D>,
    classifier: GestureClassifier<KeyTarget>,
    queue: VecDeque<(HostEvent, Duration)>,
    loader: Option<DictionaryLoader>,
}

impl<D: TextDocumentProxy> Sequencer<D> {
    pub fn new(session: KeyboardSession<D>) -> Self {
        let config = GestureConfig::from(&session.settings().gesture);
        Self {
            session,
            classifier: GestureClassifier::new(config),
            queue: VecDeque::new(),
            loader: None,
        }
    }

    pub fn with_loader(session: KeyboardSession<D>, loader: DictionaryLoader) -> Self {
        let mut sequencer = Self::new(session);
        sequencer.loader = Some(loader);
        sequencer
    }

    pub fn session(&self) -> &KeyboardSession<D> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut KeyboardSession<D> {
        &mut self.session
    }

    pub fn into_session(self) -> KeyboardSession<D> {
        self.session
    }

    pub fn loader(&self) -> Option<&DictionaryLoader> {
        self.loader.as_ref()
    }

    /// Events waiting for the next [`Self::pump`].
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// When the host should deliver a [`HostEvent::Tick`] next.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.classifier.next_deadline()
    }

    /// Queue an event observed at `now`.
    pub fn push(&mut self, event: HostEvent, now: Duration) {
        trace!(?event, ?now, "queued");
        self.queue.push_back((event, now));
    }

    /// Install a finished background load, then drain the queue. Returns one
    /// response per gesture applied, in order.
    pub fn pump(&mut self) -> Vec<EditResponse> {
        self.install_loaded();
        let mut responses = Vec::new();
        while let Some((event, now)) = self.queue.pop_front() {
            let gestures = self.classify(event, now);
            for GestureEvent { target, gesture } in gestures {
                responses.push(self.session.handle_gesture(&target, gesture, now));
            }
        }
        responses
    }

    /// [`Self::push`] followed by [`Self::pump`].
    pub fn dispatch(&mut self, event: HostEvent, now: Duration) -> Vec<EditResponse> {
        self.push(event, now);
        self.pump()
    }

    fn classify(&mut self, event: HostEvent, now: Duration) -> Vec<GestureEvent<KeyTarget>> {
        match event {
            HostEvent::TouchDown { at, size, target } => {
                // Anything still due from the previous sequence fires first.
                let events = self.classifier.poll(now);
                self.classifier.touch_down(at, size, target, now);
                events
            }
            HostEvent::TouchMoved { at } => self.classifier.touch_moved(at, now),
            HostEvent::TouchUp => self.classifier.touch_up(now),
            HostEvent::TouchCancelled => {
                let events = self.classifier.poll(now);
                self.classifier.cancel();
                events
            }
            HostEvent::Tick => self.classifier.poll(now),
        }
    }

    fn install_loaded(&mut self) {
        let Some(loaded) = self.loader.as_ref().and_then(DictionaryLoader::try_recv) else {
            return;
        };
        let LoadedDictionary {
            generation,
            path,
            result,
        } = loaded;
        match result {
            Ok(dict) => {
                debug!(generation, path = %path.display(), words = dict.len(), "user dictionary installed");
                self.session.set_user_dictionary(Arc::new(dict));
            }
            Err(e) => {
                warn!(generation, path = %path.display(), error = %e, "keeping current user dictionary");
            }
        }
    }
}
