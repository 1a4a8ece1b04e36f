//! Word lookup for autocorrect.
//!
//! `WordList` holds a bundled vocabulary with grammar corrections,
//! `EditDistanceSpeller` produces spelling guesses, and `Lexicon` merges both
//! with the user dictionary into the single collaborator the session talks to.

mod lexicon;
mod speller;
mod word_list;

pub use lexicon::Lexicon;
pub use speller::{osa_distance, EditDistanceSpeller};
pub use word_list::{WordList, EN_US_WORDS};

pub trait Dictionary: Send + Sync {
    /// Preferred replacements for an exact lowercase key, best first.
    fn lookup(&self, lower: &str) -> Option<Vec<String>>;

    /// Whether `word` is in the vocabulary, ignoring case.
    fn contains(&self, word: &str) -> bool;
}
