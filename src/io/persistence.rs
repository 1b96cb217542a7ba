//! Snapshot persistence for crash and reload recovery.
//!
//! The whole player list is written under a single session slot after every
//! mutating engine step and read once at session start. Writes are last-writer
//! wins; there is no transaction.

use std::fs;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use crate::core::error::PersistenceError;
use crate::core::Player;

/// Slot the session's players are stored under.
pub const SESSION_SLOT: &str = "monopoly_players";

/// Key-value snapshot store for the player list.
pub trait SnapshotStore {
    /// The stored player list, or `None` when the slot is empty.
    fn load(&self) -> Result<Option<Vec<Player>>, PersistenceError>;

    /// Overwrite the slot with the full player list.
    fn save(&mut self, players: &[Player]) -> Result<(), PersistenceError>;

    /// Remove the slot. Clearing an empty slot is not an error.
    fn clear(&mut self) -> Result<(), PersistenceError>;
}

/// In-process store keeping bincode-encoded snapshots per slot.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    slots: FxHashMap<String, Vec<u8>>,
    writes: usize,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful saves so far.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Whether the session slot holds a snapshot.
    #[must_use]
    pub fn has_snapshot(&self) -> bool {
        self.slots.contains_key(SESSION_SLOT)
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Result<Option<Vec<Player>>, PersistenceError> {
        self.slots
            .get(SESSION_SLOT)
            .map(|bytes| bincode::deserialize(bytes))
            .transpose()
            .map_err(PersistenceError::from)
    }

    fn save(&mut self, players: &[Player]) -> Result<(), PersistenceError> {
        let bytes = bincode::serialize(players)?;
        self.slots.insert(SESSION_SLOT.to_string(), bytes);
        self.writes += 1;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), PersistenceError> {
        self.slots.remove(SESSION_SLOT);
        Ok(())
    }
}

/// Store writing the snapshot as a JSON file named after the session slot.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store the slot as `<dir>/monopoly_players.json`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{SESSION_SLOT}.json")),
        }
    }

    /// Location of the snapshot file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self) -> Result<Option<Vec<Player>>, PersistenceError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(serde_json::from_str(&text)?)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&mut self, players: &[Player]) -> Result<(), PersistenceError> {
        let text = serde_json::to_string_pretty(players)?;
        fs::write(&self.path, text)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), PersistenceError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::SquareId;
    use crate::core::{Holding, TokenColor};

    fn players() -> Vec<Player> {
        let mut ana = Player::new("ana", TokenColor::Red, "co", 1300);
        ana.position = 5;
        ana.holdings.push(Holding::new(SquareId::new(5)));
        ana.in_jail = true;
        ana.jail_turns = 2;
        vec![ana, Player::new("bo", TokenColor::Blue, "ar", -40)]
    }

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());

        store.save(&players()).unwrap();
        assert_eq!(store.load().unwrap(), Some(players()));
        assert_eq!(store.writes(), 1);

        store.clear().unwrap();
        assert!(!store.has_snapshot());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_memory_store_overwrites() {
        let mut store = MemoryStore::new();
        store.save(&players()).unwrap();
        store.save(&players()[..1]).unwrap();

        assert_eq!(store.load().unwrap().unwrap().len(), 1);
    }

    #[test]
    fn test_json_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::in_dir(dir.path());

        assert!(store.load().unwrap().is_none());
        store.save(&players()).unwrap();
        assert!(store.path().exists());
        assert_eq!(store.load().unwrap(), Some(players()));

        store.clear().unwrap();
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_json_store_reports_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::in_dir(dir.path());
        fs::write(store.path(), "not json").unwrap();

        assert!(matches!(store.load(), Err(PersistenceError::Json(_))));
    }
}
