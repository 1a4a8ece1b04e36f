use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use tracing::{debug, warn};

use flick_core::user_dict::UserDictionary;

// ---------------------------------------------------------------------------
// Work / Result types
// ---------------------------------------------------------------------------

struct LoadWork {
    path: PathBuf,
    generation: u64,
}

/// A user dictionary read off the keyboard thread.
#[derive(Debug)]
pub struct LoadedDictionary {
    pub generation: u64,
    pub path: PathBuf,
    pub result: Result<UserDictionary, io::Error>,
}

// ---------------------------------------------------------------------------
// DictionaryLoader
// ---------------------------------------------------------------------------

/// Reads user dictionary files on a worker thread.
///
/// Every request bumps a generation counter; a result is handed back only if
/// no newer request (or [`DictionaryLoader::invalidate`]) happened since it
/// was submitted.
pub struct DictionaryLoader {
    work_tx: mpsc::Sender<LoadWork>,
    result_rx: Mutex<mpsc::Receiver<LoadedDictionary>>,
    generation: Arc<AtomicU64>,
}

impl DictionaryLoader {
    /// Spawn the worker. Loaded dictionaries promote after `learn_threshold`
    /// verbatim uses.
    pub fn new(learn_threshold: u32) -> io::Result<Self> {
        let generation = Arc::new(AtomicU64::new(0));
        let (work_tx, work_rx) = mpsc::channel::<LoadWork>();
        let (result_tx, result_rx) = mpsc::channel::<LoadedDictionary>();
        {
            let generation = Arc::clone(&generation);
            thread::Builder::new()
                .name("flick-dict-loader".into())
                .spawn(move || load_worker(work_rx, result_tx, generation, learn_threshold))?;
        }
        Ok(Self {
            work_tx,
            result_rx: Mutex::new(result_rx),
            generation,
        })
    }

    /// Queue a load of `path`, superseding any request still in flight.
    /// Returns the generation the result will carry.
    pub fn request(&self, path: PathBuf) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(path = %path.display(), generation, "user dictionary load requested");
        if self.work_tx.send(LoadWork { path, generation }).is_err() {
            warn!("dictionary loader thread is gone");
        }
        generation
    }

    /// Drop every pending result.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// The current load, if it has finished. Stale results are discarded.
    pub fn try_recv(&self) -> Option<LoadedDictionary> {
        let rx = self.result_rx.lock().ok()?;
        while let Ok(loaded) = rx.try_recv() {
            if loaded.generation == self.generation() {
                return Some(loaded);
            }
            debug!(generation = loaded.generation, "stale dictionary load dropped");
        }
        None
    }
}

// ---------------------------------------------------------------------------
// Worker thread
// ---------------------------------------------------------------------------

fn load_worker(
    rx: mpsc::Receiver<LoadWork>,
    tx: mpsc::Sender<LoadedDictionary>,
    generation: Arc<AtomicU64>,
    learn_threshold: u32,
) {
    while let Ok(work) = rx.recv() {
        // Drain: if multiple requests queued, skip to latest
        let mut latest = work;
        while let Ok(newer) = rx.try_recv() {
            latest = newer;
        }

        if latest.generation != generation.load(Ordering::SeqCst) {
            continue;
        }

        let result = UserDictionary::open(&latest.path).map(|dict| {
            dict.set_threshold(learn_threshold);
            dict
        });
        if let Err(e) = &result {
            warn!(path = %latest.path.display(), error = %e, "user dictionary load failed");
        }

        if latest.generation != generation.load(Ordering::SeqCst) {
            continue;
        }

        if tx
            .send(LoadedDictionary {
                generation: latest.generation,
                path: latest.path,
                result,
            })
            .is_err()
        {
            break;
        }
    }
}
