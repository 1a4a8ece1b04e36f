use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use super::{Dictionary, EditDistanceSpeller, WordList};
use crate::user_dict::UserDictionary;

/// Per-locale correction dictionaries, a spell checker over the bundled
/// vocabularies, and the user dictionary.
///
/// User-taught words count as known in every locale. The user dictionary sits
/// behind an `Arc` so a freshly loaded one can be swapped in while other
/// holders (e.g. a pending save) keep the old instance.
pub struct Lexicon {
    dictionaries: HashMap<String, Arc<dyn Dictionary>>,
    speller: EditDistanceSpeller,
    user: Arc<UserDictionary>,
}

impl Lexicon {
    pub fn new(user: Arc<UserDictionary>) -> Self {
        Self {
            dictionaries: HashMap::new(),
            speller: EditDistanceSpeller::new(),
            user,
        }
    }

    /// The embedded en_US list with an empty user dictionary.
    pub fn with_defaults() -> Self {
        let mut lexicon = Self::new(Arc::new(UserDictionary::new()));
        lexicon.add_locale("en_US", WordList::en_us());
        lexicon
    }

    /// Install a bundled word list: its vocabulary feeds the speller and its
    /// corrections become the locale's dictionary.
    pub fn add_locale(&mut self, locale: &str, list: WordList) {
        debug!(locale, words = list.len(), "locale word list added");
        self.speller.add_word_list(locale, &list);
        self.dictionaries.insert(locale.to_string(), Arc::new(list));
    }

    /// Replace the correction dictionary for `locale`, keeping the speller's
    /// vocabulary.
    pub fn set_dictionary(&mut self, locale: &str, dictionary: Arc<dyn Dictionary>) {
        debug!(locale, "locale dictionary replaced");
        self.dictionaries.insert(locale.to_string(), dictionary);
    }

    pub fn has_locale(&self, locale: &str) -> bool {
        self.dictionaries.contains_key(locale)
    }

    pub fn user(&self) -> &Arc<UserDictionary> {
        &self.user
    }

    pub fn set_user(&mut self, user: Arc<UserDictionary>) {
        debug!(words = user.len(), "user dictionary replaced");
        self.user = user;
    }

    /// Grammar completions for the lowercase form of `word`.
    pub fn completions(&self, word: &str, locale: &str) -> Vec<String> {
        self.dictionaries
            .get(locale)
            .and_then(|dict| dict.lookup(&word.to_lowercase()))
            .unwrap_or_default()
    }

    pub fn is_user_taught(&self, word: &str) -> bool {
        self.user.contains(word)
    }

    pub fn learn(&self, word: &str) -> bool {
        self.user.learn(word)
    }

    pub fn forget(&self, word: &str) -> bool {
        self.user.forget(word)
    }

    /// Count one verbatim use of an unknown word. True when it was just
    /// promoted into the user dictionary.
    pub fn record_use(&self, word: &str) -> bool {
        self.user.record_use(word)
    }

    pub fn is_known(&self, word: &str, locale: &str) -> bool {
        self.user.contains(word)
            || self.speller.is_known(word, locale)
            || self
                .dictionaries
                .get(locale)
                .is_some_and(|dict| dict.contains(word))
    }

    pub fn guesses(&self, word: &str, locale: &str, max: usize) -> Vec<String> {
        self.speller.guesses(word, locale, max)
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::with_defaults()
    }
}
