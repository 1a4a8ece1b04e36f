use std::collections::{HashMap, HashSet};

use super::WordList;

/// Spell checker over per-locale vocabularies.
///
/// Guesses are vocabulary words within Damerau-Levenshtein distance 1 of the
/// input (adjacent transpositions count as one edit), widened to distance 2
/// only when nothing closer exists. Ties keep vocabulary order, which the
/// bundled lists sort by frequency.
#[derive(Debug, Clone, Default)]
pub struct EditDistanceSpeller {
    locales: HashMap<String, Vocabulary>,
}

#[derive(Debug, Clone, Default)]
struct Vocabulary {
    /// (lowercase chars, surface) in vocabulary order.
    words: Vec<(Vec<char>, String)>,
    known: HashSet<String>,
}

const MAX_DISTANCE: usize = 2;

impl EditDistanceSpeller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or extend) the vocabulary for `locale`.
    pub fn add_words<'a, I>(&mut self, locale: &str, words: I)
    where
        I: IntoIterator<Item = &'a String>,
    {
        let vocab = self.locales.entry(locale.to_string()).or_default();
        for word in words {
            let lower = word.to_lowercase();
            if vocab.known.insert(lower.clone()) {
                vocab.words.push((lower.chars().collect(), word.clone()));
            }
        }
    }

    pub fn add_word_list(&mut self, locale: &str, list: &WordList) {
        self.add_words(locale, list.words());
    }

    pub fn has_locale(&self, locale: &str) -> bool {
        self.locales.contains_key(locale)
    }

    pub fn is_known(&self, word: &str, locale: &str) -> bool {
        self.locales
            .get(locale)
            .is_some_and(|v| v.known.contains(&word.to_lowercase()))
    }

    /// Up to `max` likely intended words, best first. Never includes `word`.
    pub fn guesses(&self, word: &str, locale: &str, max: usize) -> Vec<String> {
        let Some(vocab) = self.locales.get(locale) else {
            return Vec::new();
        };
        let target: Vec<char> = word.to_lowercase().chars().collect();
        if target.is_empty() || max == 0 {
            return Vec::new();
        }
        let mut by_distance: [Vec<&str>; MAX_DISTANCE] = Default::default();
        for (chars, surface) in &vocab.words {
            if chars.len().abs_diff(target.len()) > MAX_DISTANCE {
                continue;
            }
            let d = osa_distance(&target, chars, MAX_DISTANCE);
            if (1..=MAX_DISTANCE).contains(&d) {
                by_distance[d - 1].push(surface);
            }
        }
        by_distance
            .iter()
            .find(|bucket| !bucket.is_empty())
            .map(|bucket| bucket.iter().take(max).map(|s| s.to_string()).collect())
            .unwrap_or_default()
    }
}

/// Optimal string alignment distance, giving up (returning `limit + 1`) once
/// every cell of a row exceeds `limit`.
pub fn osa_distance(a: &[char], b: &[char], limit: usize) -> usize {
    let (n, m) = (a.len(), b.len());
    if n.abs_diff(m) > limit {
        return limit + 1;
    }
    let mut prev2 = vec![0usize; m + 1];
    let mut prev: Vec<usize> = (0..=m).collect();
    let mut cur = vec![0usize; m + 1];
    for i in 1..=n {
        cur[0] = i;
        let mut row_min = cur[0];
        for j in 1..=m {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            let mut v = (prev[j] + 1).min(cur[j - 1] + 1).min(prev[j - 1] + cost);
            if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                v = v.min(prev2[j - 2] + 1);
            }
            cur[j] = v;
            row_min = row_min.min(v);
        }
        if row_min > limit {
            return limit + 1;
        }
        std::mem::swap(&mut prev2, &mut prev);
        std::mem::swap(&mut prev, &mut cur);
    }
    prev[m]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn speller(words: &[&str]) -> EditDistanceSpeller {
        let words: Vec<String> = words.iter().map(|s| s.to_string()).collect();
        let mut s = EditDistanceSpeller::new();
        s.add_words("en_US", &words);
        s
    }

    #[test]
    fn test_osa_distance() {
        assert_eq!(osa_distance(&chars("teh"), &chars("the"), 2), 1);
        assert_eq!(osa_distance(&chars("cat"), &chars("cat"), 2), 0);
        assert_eq!(osa_distance(&chars("cat"), &chars("cart"), 2), 1);
        assert_eq!(osa_distance(&chars("definately"), &chars("definitely"), 2), 1);
        assert_eq!(osa_distance(&chars("abc"), &chars("xyz"), 2), 3);
        assert_eq!(osa_distance(&chars(""), &chars("ab"), 2), 2);
    }

    #[test]
    fn test_is_known_ignores_case() {
        let s = speller(&["The", "cat"]);
        assert!(s.is_known("the", "en_US"));
        assert!(s.is_known("CAT", "en_US"));
        assert!(!s.is_known("dog", "en_US"));
        assert!(!s.is_known("cat", "fr_FR"));
    }

    #[test]
    fn test_guesses_prefer_distance_one() {
        let s = speller(&["the", "then", "tea", "toe", "tree"]);
        assert_eq!(
            s.guesses("teh", "en_US", 7),
            vec!["the", "tea"]
        );
        assert_eq!(s.guesses("teh", "en_US", 1), vec!["the"]);
    }

    #[test]
    fn test_guesses_widen_to_distance_two() {
        let s = speller(&["house", "mouse"]);
        assert_eq!(s.guesses("hosue", "en_US", 7), vec!["house"]);
        assert_eq!(s.guesses("huose", "en_US", 7), vec!["house"]);
        assert!(s.guesses("zzzzzz", "en_US", 7).is_empty());
    }

    #[test]
    fn test_unknown_locale_has_no_guesses() {
        let s = speller(&["the"]);
        assert!(s.guesses("teh", "de_DE", 7).is_empty());
    }
}
