use std::io;
use std::path::{Path, PathBuf};
use std::process;

use flick_core::user_dict::UserDictionary;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn default_user_dict_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".config/flick/user_dict.fkud")
}

/// Teach `word` and save. `Ok(false)` if it was already learned.
pub fn add_word(path: &Path, word: &str) -> io::Result<bool> {
    let dict = UserDictionary::open(path)?;
    if dict.contains(word) {
        return Ok(false);
    }
    dict.learn(word);
    dict.save(path)?;
    Ok(true)
}

/// Forget `word` (learned or pending) and save. `Ok(false)` if absent.
pub fn remove_word(path: &Path, word: &str) -> io::Result<bool> {
    let dict = UserDictionary::open(path)?;
    if !dict.forget(word) {
        return Ok(false);
    }
    dict.save(path)?;
    Ok(true)
}

pub fn user_dict_add(path: &Path, word: &str) {
    if die!(add_word(path, word), "Error updating user dictionary: {}") {
        println!("Added: {word}");
    } else {
        println!("Already exists: {word}");
    }
}

pub fn user_dict_remove(path: &Path, word: &str) {
    if die!(remove_word(path, word), "Error updating user dictionary: {}") {
        println!("Removed: {word}");
    } else {
        println!("Not found: {word}");
    }
}

pub fn user_dict_list(path: &Path) {
    let dict = die!(
        UserDictionary::open(path),
        "Error opening user dictionary: {}"
    );
    let words = dict.list();
    if words.is_empty() {
        println!("(empty)");
    } else {
        for word in &words {
            println!("{word}");
        }
        println!("---");
        println!("{} words", words.len());
    }
}
