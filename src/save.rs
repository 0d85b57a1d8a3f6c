//! Durable world state and the single save document it lives in.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::error::StorageError;
use crate::inventory::BRASS_KEY_ID;

/// Facts about the world that survive between sessions.
///
/// The owned item set is the only record of what the player carries; whether the key
/// has been found is derived from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistentState {
    pub door_unlocked: bool,
    pub owned_item_ids: BTreeSet<String>,
}

impl PersistentState {
    pub fn key_found(&self) -> bool {
        self.owned_item_ids.contains(BRASS_KEY_ID)
    }

    pub fn owns(&self, id: &str) -> bool {
        self.owned_item_ids.contains(id)
    }
}

/// On-disk shape of [`PersistentState`].
///
/// Fields are declared in alphabetical order so the written JSON has sorted keys.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SaveDocument {
    door_unlocked: bool,
    #[serde(rename = "inventoryItemIDs")]
    inventory_item_ids: BTreeSet<String>,
    key_found: bool,
}

impl From<&PersistentState> for SaveDocument {
    fn from(state: &PersistentState) -> Self {
        SaveDocument {
            door_unlocked: state.door_unlocked,
            inventory_item_ids: state.owned_item_ids.clone(),
            key_found: state.key_found(),
        }
    }
}

impl From<SaveDocument> for PersistentState {
    fn from(document: SaveDocument) -> Self {
        let mut owned_item_ids = document.inventory_item_ids;
        // Older documents may only carry the flag.
        if document.key_found {
            owned_item_ids.insert(BRASS_KEY_ID.to_string());
        }
        PersistentState {
            door_unlocked: document.door_unlocked,
            owned_item_ids,
        }
    }
}

/// Reads and atomically replaces the save document at a fixed path.
#[derive(Debug, Clone)]
pub struct SaveStore {
    path: PathBuf,
}

impl SaveStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the saved state, falling back to defaults when the document is missing or unreadable.
    pub fn load(&self) -> PersistentState {
        match self.try_load() {
            Ok(Some(state)) => {
                info!(path = %self.path.display(), "Loaded saved progress");
                state
            }
            Ok(None) => {
                debug!(path = %self.path.display(), "No save document, starting fresh");
                PersistentState::default()
            }
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable save document");
                PersistentState::default()
            }
        }
    }

    /// Writes `state`, logging instead of returning any failure.
    pub fn save(&self, state: &PersistentState) {
        match self.try_save(state) {
            Ok(()) => debug!(path = %self.path.display(), "Progress saved"),
            Err(e) => error!(error = %e, "Failed to save progress"),
        }
    }

    pub fn try_load(&self) -> Result<Option<PersistentState>, StorageError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let document: SaveDocument = serde_json::from_slice(&bytes).map_err(|source| StorageError::Parse {
            path: self.path.clone(),
            source,
        })?;
        Ok(Some(document.into()))
    }

    pub fn try_save(&self, state: &PersistentState) -> Result<(), StorageError> {
        let mut text = serde_json::to_string_pretty(&SaveDocument::from(state)).map_err(StorageError::Serialize)?;
        text.push('\n');
        write_atomic(&self.path, text.as_bytes()).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// Writes to a sibling temporary file and renames it over `path`, so readers only ever
/// see the old or the new document.
fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = temp_path_for(path);
    fs::write(&tmp_path, bytes)?;
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path.file_name().and_then(|name| name.to_str()).unwrap_or("save.json");
    path.with_file_name(format!("{file_name}.tmp"))
}
