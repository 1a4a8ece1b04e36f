//! Building blocks of the flick keyboard engine.
//!
//! Everything here is single-threaded and free of host dependencies: the host
//! document is reached through [`buffer::TextDocumentProxy`] and time is
//! passed in by the caller.

pub mod buffer;
pub mod capitalization;
pub mod dict;
pub mod error;
pub mod gesture;
pub mod history;
pub mod punctuation;
pub mod schedule;
pub mod settings;
pub mod text;
pub mod user_dict;

pub use error::EditError;
