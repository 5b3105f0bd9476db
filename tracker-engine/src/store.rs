//! Byte-array persistence contract
//!
//! The engine persists through a minimal keyed get/set store; anything
//! beyond that contract (wear leveling, atomicity, transport) belongs to
//! the embedding platform. A missing or undersized entry is "no saved
//! state", never an error.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::list::TrackingList;
use crate::types::{Result, TrackerError};

/// Persist key under which the full list state is stored
pub const STATE_KEY: u32 = 0;

/// Minimal keyed byte-array store the engine persists through
pub trait StateStore {
    fn exists(&self, key: u32) -> bool;
    fn read(&self, key: u32) -> Result<Vec<u8>>;
    fn write(&mut self, key: u32, data: &[u8]) -> Result<()>;
    fn remove(&mut self, key: u32) -> Result<()>;
}

/// Volatile store for tests and embeddings without a filesystem
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<u32, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }
}

impl StateStore for MemoryStore {
    fn exists(&self, key: u32) -> bool {
        self.entries.contains_key(&key)
    }

    fn read(&self, key: u32) -> Result<Vec<u8>> {
        self.entries
            .get(&key)
            .cloned()
            .ok_or(TrackerError::MissingState(key))
    }

    fn write(&mut self, key: u32, data: &[u8]) -> Result<()> {
        self.entries.insert(key, data.to_vec());
        Ok(())
    }

    fn remove(&mut self, key: u32) -> Result<()> {
        self.entries.remove(&key);
        Ok(())
    }
}

/// One file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Result<FileStore> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(FileStore { dir })
    }

    fn path(&self, key: u32) -> PathBuf {
        self.dir.join(format!("{key:04}.bin"))
    }
}

impl StateStore for FileStore {
    fn exists(&self, key: u32) -> bool {
        self.path(key).is_file()
    }

    fn read(&self, key: u32) -> Result<Vec<u8>> {
        if !self.exists(key) {
            return Err(TrackerError::MissingState(key));
        }
        Ok(fs::read(self.path(key))?)
    }

    fn write(&mut self, key: u32, data: &[u8]) -> Result<()> {
        Ok(fs::write(self.path(key), data)?)
    }

    fn remove(&mut self, key: u32) -> Result<()> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Encode the list and store it under [`STATE_KEY`]
pub fn save_state(list: &TrackingList, store: &mut dyn StateStore) -> Result<()> {
    let bytes = list.encode();
    log::debug!("saving {} bytes of tracker state", bytes.len());
    store.write(STATE_KEY, &bytes)
}

/// Restore the list from [`STATE_KEY`] if a complete snapshot exists
///
/// Returns `Ok(false)` and leaves the freshly configured list untouched
/// when nothing usable is stored.
pub fn load_state(list: &mut TrackingList, store: &dyn StateStore, now: i64) -> Result<bool> {
    if !store.exists(STATE_KEY) {
        return Ok(false);
    }
    let bytes = store.read(STATE_KEY)?;
    if bytes.len() < list.binary_size() {
        log::warn!(
            "saved state is {} bytes but {} are needed; starting fresh",
            bytes.len(),
            list.binary_size()
        );
        return Ok(false);
    }
    list.decode(&bytes, now)?;
    log::info!("restored tracker state ({} bytes)", bytes.len());
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrackerConfig;

    fn default_list() -> TrackingList {
        TrackingList::from_config(&TrackerConfig::default()).unwrap()
    }

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert!(!store.exists(STATE_KEY));
        store.write(STATE_KEY, b"abc").unwrap();
        assert!(store.exists(STATE_KEY));
        assert_eq!(store.read(STATE_KEY).unwrap(), b"abc");
        store.remove(STATE_KEY).unwrap();
        assert!(!store.exists(STATE_KEY));
        assert!(matches!(
            store.read(STATE_KEY),
            Err(TrackerError::MissingState(STATE_KEY))
        ));
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path()).unwrap();
        assert!(!store.exists(STATE_KEY));
        store.write(STATE_KEY, &[1, 2, 3]).unwrap();
        assert_eq!(store.read(STATE_KEY).unwrap(), vec![1, 2, 3]);
        store.remove(STATE_KEY).unwrap();
        store.remove(STATE_KEY).unwrap(); // idempotent
        assert!(!store.exists(STATE_KEY));
    }

    #[test]
    fn test_save_and_load_state() {
        let mut store = MemoryStore::new();
        let mut list = default_list();
        list.move_next(1);
        list.toggle_active(1_000);
        list.update_accrual(1_030);
        save_state(&list, &mut store).unwrap();

        let mut restored = default_list();
        assert!(load_state(&mut restored, &store, 1_030).unwrap());
        assert_eq!(restored.node(0).map(|n| n.time()), Some(30));
        assert_eq!(restored.active_index(), Some(0));
    }

    #[test]
    fn test_load_state_missing_is_not_an_error() {
        let store = MemoryStore::new();
        let mut list = default_list();
        assert!(!load_state(&mut list, &store, 0).unwrap());
    }

    #[test]
    fn test_load_state_undersized_is_ignored() {
        let mut store = MemoryStore::new();
        store.write(STATE_KEY, &[0u8; 10]).unwrap();
        let mut list = default_list();
        list.move_next(1);
        assert!(!load_state(&mut list, &store, 0).unwrap());
        assert_eq!(list.selected_index(), Some(0)); // untouched
    }
}
