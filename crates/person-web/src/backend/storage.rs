use super::model::Person;
use crate::error::{StoreError, StoreResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct PersistedState {
    pub persons: Vec<Person>,
}

/// Keeps the person table on disk (JSON) so it survives restarts.
pub struct FileStateStore {
    path: PathBuf,
    // Held from taking the snapshot until it is on disk, so an older
    // snapshot never lands after a newer one.
    write_lock: Mutex<()>,
}

impl FileStateStore {
    pub fn open(path: PathBuf) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored state. A missing file is an empty table.
    pub fn load(&self) -> StoreResult<PersistedState> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no state file yet");
            return Ok(PersistedState::default());
        }
        let data = fs::read_to_string(&self.path)?;
        if data.trim().is_empty() {
            warn!(path = %self.path.display(), "state file is empty, starting fresh");
            return Ok(PersistedState::default());
        }
        Ok(serde_json::from_str(&data)?)
    }

    pub fn save(&self, state: &PersistedState) -> StoreResult<()> {
        self.save_with(|| Ok(state.clone()))
    }

    /// Takes the snapshot and writes it under one lock.
    pub fn save_with<F>(&self, snapshot: F) -> StoreResult<()>
    where
        F: FnOnce() -> StoreResult<PersistedState>,
    {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::Poisoned)?;
        let state = snapshot()?;
        let json = serde_json::to_string_pretty(&state)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
