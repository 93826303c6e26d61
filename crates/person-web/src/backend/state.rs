use super::repository::InMemoryRepository;
use super::service::PersonService;
use super::storage::{FileStateStore, PersistedState};
use crate::error::StoreResult;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Shared application state (repository + service + optional persistence).
///
/// Built once at startup and handed to the router; nothing here is global.
pub struct AppState {
    pub repo: Arc<InMemoryRepository>,
    pub service: PersonService,
    pub store: Option<Arc<FileStateStore>>,
}

impl AppState {
    pub fn new(state_path: Option<PathBuf>) -> StoreResult<Self> {
        let repo = Arc::new(InMemoryRepository::new());
        let store = match state_path {
            Some(path) => Some(Arc::new(FileStateStore::open(path)?)),
            None => None,
        };

        if let Some(store) = &store {
            let persisted = store.load()?;
            info!(
                path = %store.path().display(),
                persons = persisted.persons.len(),
                "loaded persisted state"
            );
            repo.replace_all(persisted.persons)?;
        }

        let service = PersonService::new(repo.clone());
        Ok(Self {
            repo,
            service,
            store,
        })
    }

    pub fn in_memory() -> Self {
        let repo = Arc::new(InMemoryRepository::new());
        Self {
            service: PersonService::new(repo.clone()),
            repo,
            store: None,
        }
    }

    pub fn snapshot(&self) -> StoreResult<PersistedState> {
        Ok(PersistedState {
            persons: self.repo.snapshot()?,
        })
    }

    /// Writes the current table to disk. No-op without a state file.
    pub fn persist(&self) -> StoreResult<()> {
        if let Some(store) = &self.store {
            store.save_with(|| self.snapshot())?;
        }
        Ok(())
    }
}
