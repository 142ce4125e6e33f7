//! Snapshot document store: the remote persistence backend seen through a
//! narrow interface. The default implementation keeps one JSON document per
//! player under the data directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::persist::snapshot::PlayerSnapshot;

pub type StoreError = Box<dyn std::error::Error + Send + Sync>;

pub trait SnapshotStore {
    /// Fetch the persisted document, if any.
    fn load(&self, player_id: &str) -> Result<Option<PlayerSnapshot>, StoreError>;

    /// Write the document. Failures are recoverable; the reconciler retries.
    fn save(&self, player_id: &str, snapshot: &PlayerSnapshot) -> Result<(), StoreError>;
}

/// File-backed store: `<root>/players/<player_id>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn document_path(&self, player_id: &str) -> PathBuf {
        self.root.join("players").join(format!("{player_id}.json"))
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self, player_id: &str) -> Result<Option<PlayerSnapshot>, StoreError> {
        let path = self.document_path(player_id);
        if !Path::new(&path).exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path)?;
        let snapshot: PlayerSnapshot = serde_json::from_str(&raw)?;
        Ok(Some(snapshot))
    }

    fn save(&self, player_id: &str, snapshot: &PlayerSnapshot) -> Result<(), StoreError> {
        let path = self.document_path(player_id);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let serialized = serde_json::to_string_pretty(snapshot)?;
        fs::write(&path, serialized)?;
        Ok(())
    }
}
