//! Persistence of the [`UserProgress`] snapshot.
//!
//! Adapters implement the fallible `try_load`/`try_save` pair. The provided `load`/`save`
//! never fail: unreadable data degrades to an empty snapshot and write errors are logged,
//! leaving the in-memory snapshot authoritative.

pub mod db;
pub mod file;
pub mod memory;

pub use db::SqliteStore;
pub use file::JsonFileStore;
pub use memory::MemoryStore;

use crate::models::UserProgress;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Corrupt progress: {0}")]
    CorruptState(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

pub trait ProgressStore {
    /// Reads the stored snapshot, `Ok(None)` when nothing has been saved yet.
    fn try_load(&self) -> Result<Option<UserProgress>>;

    fn try_save(&self, progress: &UserProgress) -> Result<()>;

    /// Stored snapshot, or an empty one if none exists or it cannot be read.
    fn load(&self) -> UserProgress {
        match self.try_load() {
            Ok(Some(progress)) => progress,
            Ok(None) => {
                log::debug!("No saved progress, starting fresh");
                UserProgress::default()
            }
            Err(err) => {
                log::warn!("Saved progress unreadable, starting fresh: {}", err);
                UserProgress::default()
            }
        }
    }

    /// Persists the snapshot. Failures are logged and otherwise ignored.
    fn save(&self, progress: &UserProgress) {
        if let Err(err) = self.try_save(progress) {
            log::warn!("Failed to save progress: {}", err);
        }
    }
}

impl<T: ProgressStore + ?Sized> ProgressStore for Box<T> {
    fn try_load(&self) -> Result<Option<UserProgress>> {
        (**self).try_load()
    }

    fn try_save(&self, progress: &UserProgress) -> Result<()> {
        (**self).try_save(progress)
    }
}

/// Rejects snapshots that violate the progress invariants.
pub(crate) fn check_invariants(progress: UserProgress) -> Result<UserProgress> {
    progress.validate().map_err(StoreError::CorruptState)?;
    Ok(progress)
}
