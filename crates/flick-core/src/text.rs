//! Grapheme-level helpers for reading words out of the trailing context.

use unicode_segmentation::UnicodeSegmentation;

pub fn grapheme_count(s: &str) -> usize {
    s.graphemes(true).count()
}

/// A grapheme made only of punctuation/symbol characters (no letters, digits
/// or whitespace).
pub fn is_punctuation(g: &str) -> bool {
    !g.is_empty() && g.chars().all(|c| !c.is_alphanumeric() && !c.is_whitespace())
}

/// The word currently being typed: everything after the last whitespace.
/// Empty when the context ends in whitespace.
pub fn trailing_word(context: &str) -> &str {
    match context.rfind(char::is_whitespace) {
        Some(i) => {
            let ws_len = context[i..].chars().next().map_or(1, char::len_utf8);
            &context[i + ws_len..]
        }
        None => context,
    }
}

/// The word that was just completed with a single trailing space, e.g. `"the"`
/// for `"see the "`. Returns `None` if the context does not end in exactly
/// one space after a non-empty word.
pub fn completed_word(context: &str) -> Option<&str> {
    let body = context.strip_suffix(' ')?;
    let word = trailing_word(body);
    if word.is_empty() {
        None
    } else {
        Some(word)
    }
}

/// True when `c` ends a sentence, i.e. it is punctuation and not one of the
/// characters configured to be ignored (comma, colon, ...).
pub fn is_sentence_end(c: char, ignore: &[char]) -> bool {
    !c.is_alphanumeric() && !c.is_whitespace() && !ignore.contains(&c)
}

/// Re-case `candidate` to follow the capitalisation the user typed.
///
/// `"TEH"` makes `"the"` into `"THE"`, `"Teh"` makes it `"The"`, anything
/// else leaves the candidate as the dictionary spelled it.
pub fn match_case(candidate: &str, typed: &str) -> String {
    let mut letters = typed.chars().filter(|c| c.is_alphabetic());
    let first = match letters.next() {
        Some(c) => c,
        None => return candidate.to_string(),
    };
    let rest: Vec<char> = letters.collect();
    if first.is_uppercase() && !rest.is_empty() && rest.iter().all(|c| c.is_uppercase()) {
        return candidate.to_uppercase();
    }
    if first.is_uppercase() {
        let mut chars = candidate.chars();
        return match chars.next() {
            Some(c) => c.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
    }
    candidate.to_string()
}

/// The opposite-case form of a single character (`a` → `A`, `Q` → `q`).
pub fn alternate_case(c: char) -> String {
    if c.is_lowercase() {
        c.to_uppercase().collect()
    } else {
        c.to_lowercase().collect()
    }
}
