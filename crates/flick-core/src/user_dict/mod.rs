//! Words the user has taught the keyboard.
//!
//! Two tiers: `learned` words are trusted outright (never autocorrected away),
//! `pending` words are unknown words the user keeps typing verbatim. A pending
//! word is promoted once its use count reaches the learn threshold. Keys are
//! lowercase; the surface form of the latest learn is kept for listing.
//!
//! Uses `RwLock` for interior mutability so a shared `Arc<UserDictionary>` can
//! be updated by the session while a background save holds a reference.


use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use tracing::debug;

const MAGIC: &[u8; 4] = b"FKUD";
const VERSION: u8 = 1;

pub const DEFAULT_LEARN_THRESHOLD: u32 = 3;

#[derive(Debug, Default)]
struct Words {
    learned: HashMap<String, String>,
    pending: HashMap<String, u32>,
}

#[derive(Debug)]
pub struct UserDictionary {
    words: RwLock<Words>,
    threshold: AtomicU32,
}

impl UserDictionary {
    pub fn new() -> Self {
        Self::with_threshold(DEFAULT_LEARN_THRESHOLD)
    }

    pub fn with_threshold(threshold: u32) -> Self {
        Self {
            words: RwLock::new(Words::default()),
            threshold: AtomicU32::new(threshold.max(1)),
        }
    }

    pub fn threshold(&self) -> u32 {
        self.threshold.load(Ordering::Relaxed)
    }

    /// Visible to every holder of a shared handle.
    pub fn set_threshold(&self, threshold: u32) {
        self.threshold.store(threshold.max(1), Ordering::Relaxed);
    }

    fn read(&self) -> RwLockReadGuard<'_, Words> {
        self.words.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Words> {
        self.words.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Teach a word. Returns `true` if newly added.
    pub fn learn(&self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }
        let key = word.to_lowercase();
        let mut words = self.write();
        words.pending.remove(&key);
        let added = words.learned.insert(key, word.to_string()).is_none();
        debug!(word, added, "learn");
        added
    }

    /// Forget a word, learned or pending. Returns `true` if anything was removed.
    pub fn forget(&self, word: &str) -> bool {
        let key = word.to_lowercase();
        let mut words = self.write();
        let learned = words.learned.remove(&key).is_some();
        let pending = words.pending.remove(&key).is_some();
        debug!(word, learned, pending, "forget");
        learned || pending
    }

    pub fn contains(&self, word: &str) -> bool {
        self.read().learned.contains_key(&word.to_lowercase())
    }

    /// Count one verbatim use of a word the speller does not know. Returns
    /// `true` when this use promoted it to learned.
    pub fn record_use(&self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }
        let key = word.to_lowercase();
        let mut words = self.write();
        if words.learned.contains_key(&key) {
            return false;
        }
        let count = words.pending.entry(key.clone()).or_insert(0);
        *count += 1;
        if *count < self.threshold() {
            return false;
        }
        words.pending.remove(&key);
        words.learned.insert(key, word.to_string());
        debug!(word, "promoted to user dictionary");
        true
    }

    pub fn use_count(&self, word: &str) -> u32 {
        self.read()
            .pending
            .get(&word.to_lowercase())
            .copied()
            .unwrap_or(0)
    }

    /// Learned words, sorted.
    pub fn list(&self) -> Vec<String> {
        let mut list: Vec<String> = self.read().learned.values().cloned().collect();
        list.sort();
        list
    }

    pub fn len(&self) -> usize {
        self.read().learned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Serialize to bytes (FKUD format).
    pub fn to_bytes(&self) -> Result<Vec<u8>, io::Error> {
        let record = {
            let words = self.read();
            let mut learned: Vec<String> = words.learned.values().cloned().collect();
            learned.sort();
            let mut pending: Vec<(String, u32)> =
                words.pending.iter().map(|(k, v)| (k.clone(), *v)).collect();
            pending.sort();
            UserWordsRecord { learned, pending }
        };
        let body = bincode::serialize(&record).map_err(io::Error::other)?;
        let mut buf = Vec::with_capacity(5 + body.len());
        buf.extend_from_slice(MAGIC);
        buf.push(VERSION);
        buf.extend_from_slice(&body);
        Ok(buf)
    }

    /// Deserialize from bytes (FKUD format).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, io::Error> {
        if bytes.len() < 5 {
            return Err(io::Error::new(io::ErrorKind::InvalidData, "too short"));
        }
        if &bytes[0..4] != MAGIC {
            return Err(io::Error::new(io::ErrorKind::InvalidData, "bad magic"));
        }
        if bytes[4] != VERSION {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "unsupported version",
            ));
        }
        let record: UserWordsRecord = bincode::deserialize(&bytes[5..])
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let dict = Self::new();
        {
            let mut words = dict.write();
            for surface in record.learned {
                words.learned.insert(surface.to_lowercase(), surface);
            }
            for (key, count) in record.pending {
                if !words.learned.contains_key(&key) {
                    words.pending.insert(key, count);
                }
            }
        }
        Ok(dict)
    }

    /// Atomic write: write to .tmp then rename.
    pub fn save(&self, path: &Path) -> Result<(), io::Error> {
        let bytes = self.to_bytes()?;
        let tmp = path.with_extension("tmp");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&tmp, &bytes)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Open from file, returning an empty dictionary if the file doesn't exist.
    pub fn open(path: &Path) -> Result<Self, io::Error> {
        match fs::read(path) {
            Ok(bytes) => Self::from_bytes(&bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::new()),
            Err(e) => Err(e),
        }
    }
}

impl Default for UserDictionary {
    fn default() -> Self {
        Self::new()
    }
}

/// Flat serialization record. The threshold is a setting, not data.
#[derive(Serialize, Deserialize)]
struct UserWordsRecord {
    learned: Vec<String>,
    pending: Vec<(String, u32)>,
}
