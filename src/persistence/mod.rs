//! Key-value score store
//!
//! High scores and settings persist through a tiny key-value contract:
//! LocalStorage in the browser, a JSON file under the platform data dir
//! natively, an in-memory map in tests. Failures are non-fatal - callers
//! log and degrade to session-only state.

use std::collections::HashMap;
use std::fmt;

use crate::sim::state::GameMode;

#[derive(Debug)]
pub enum StoreError {
    /// No storage backend available (no data dir, no window.localStorage)
    Unavailable,
    Io(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unavailable => write!(f, "storage unavailable"),
            StoreError::Io(msg) => write!(f, "storage i/o error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// The persistence collaborator contract
pub trait ScoreStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store: tests and the fallback when nothing else opens
#[derive(Debug, Default)]
pub struct MemoryStore {
    map: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.map.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON-file-backed store for native builds
#[cfg(not(target_arch = "wasm32"))]
pub struct FileStore {
    path: std::path::PathBuf,
    map: HashMap<String, String>,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    /// Open the store at the platform data dir (`<data>/shredwave/scores.json`)
    pub fn open_default() -> Result<Self, StoreError> {
        let dir = dirs::data_dir()
            .ok_or(StoreError::Unavailable)?
            .join("shredwave");
        std::fs::create_dir_all(&dir).map_err(|e| StoreError::Io(e.to_string()))?;
        Self::open(dir.join("scores.json"))
    }

    pub fn open(path: std::path::PathBuf) -> Result<Self, StoreError> {
        let map = match std::fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                log::warn!("score store at {:?} unreadable ({}), starting fresh", path, e);
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        };
        Ok(Self { path, map })
    }

    fn flush(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string(&self.map).map_err(|e| StoreError::Io(e.to_string()))?;
        std::fs::write(&self.path, json).map_err(|e| StoreError::Io(e.to_string()))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ScoreStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.map.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.map.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

/// LocalStorage store for the browser
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct LocalStore;

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StoreError::Unavailable)?;
        storage
            .get_item(key)
            .map_err(|_| StoreError::Io("get_item failed".into()))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StoreError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|_| StoreError::Io("set_item failed".into()))
    }
}

fn high_score_key(mode: GameMode) -> String {
    format!("shredwave_best_{}", mode.as_str())
}

/// Best persisted score for a mode; any failure reads as "no score"
pub fn load_high_score(store: &dyn ScoreStore, mode: GameMode) -> u64 {
    match store.get(&high_score_key(mode)) {
        Ok(Some(raw)) => raw.parse().unwrap_or_else(|_| {
            log::warn!("corrupt high score entry for {} mode", mode.as_str());
            0
        }),
        Ok(None) => 0,
        Err(e) => {
            log::warn!("high score load failed ({}), treating as none", e);
            0
        }
    }
}

/// Persist a new best score; failure degrades to session-only state
pub fn save_high_score(store: &mut dyn ScoreStore, mode: GameMode, score: u64) {
    if let Err(e) = store.set(&high_score_key(mode), &score.to_string()) {
        log::warn!("high score save failed ({}), score kept for this session only", e);
    }
}
