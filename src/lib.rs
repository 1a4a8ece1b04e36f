//! Gesture-driven predictive-text keyboard engine.
//!
//! The host feeds raw touches into a [`Sequencer`], which classifies them into
//! gestures and applies each one to a [`KeyboardSession`]. The session edits
//! the host document through a [`TextDocumentProxy`] and answers with an
//! [`EditResponse`] describing what to redraw.

mod async_worker;
mod sequencer;
mod trace_init;

pub use async_worker::{DictionaryLoader, LoadedDictionary};
pub use sequencer::{HostEvent, Sequencer};
pub use trace_init::init_tracing;

pub use flick_core::buffer::{MemoryDocument, TextDocumentProxy};
pub use flick_core::capitalization::CapitalizationState;
pub use flick_core::dict::Lexicon;
pub use flick_core::gesture::{Direction, Gesture, Point, Size};
pub use flick_core::settings::Settings;
pub use flick_core::user_dict::UserDictionary;
pub use flick_core::EditError;
pub use flick_session::{
    CandidateBar, EditResponse, HapticEvent, KeyTarget, KeyboardSession, Notification, ViewType,
};
