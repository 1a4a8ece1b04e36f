use std::collections::{HashMap, HashSet};

use super::Dictionary;

pub const EN_US_WORDS: &str = include_str!("en_us.txt");

/// A bundled vocabulary plus grammar corrections for one locale.
///
/// Text format, one entry per line, `#` starts a comment line:
///
/// ```text
/// the
/// teh<TAB>the
/// ```
///
/// A bare line adds a vocabulary word. A tab-separated pair maps a typo to a
/// preferred replacement and adds the replacement to the vocabulary.
#[derive(Debug, Clone, Default)]
pub struct WordList {
    words: Vec<String>,
    known: HashSet<String>,
    corrections: HashMap<String, Vec<String>>,
}

impl WordList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(text: &str) -> Self {
        let mut list = Self::new();
        for line in text.lines() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            match line.split_once('\t') {
                Some((typo, correction)) => {
                    list.add_correction(typo.trim(), correction.trim());
                }
                None => list.add_word(line.trim()),
            }
        }
        list
    }

    pub fn en_us() -> Self {
        Self::parse(EN_US_WORDS)
    }

    pub fn add_word(&mut self, word: &str) {
        if word.is_empty() {
            return;
        }
        if self.known.insert(word.to_lowercase()) {
            self.words.push(word.to_string());
        }
    }

    pub fn add_correction(&mut self, typo: &str, correction: &str) {
        if typo.is_empty() || correction.is_empty() {
            return;
        }
        self.add_word(correction);
        let entry = self.corrections.entry(typo.to_lowercase()).or_default();
        if !entry.iter().any(|c| c == correction) {
            entry.push(correction.to_string());
        }
    }

    /// Vocabulary in file order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn correction_count(&self) -> usize {
        self.corrections.len()
    }
}

impl Dictionary for WordList {
    fn lookup(&self, lower: &str) -> Option<Vec<String>> {
        self.corrections.get(lower).cloned()
    }

    fn contains(&self, word: &str) -> bool {
        self.known.contains(&word.to_lowercase())
    }
}
