//! Single-file JSON store.
use super::{ProgressStore, Result};
use crate::export::json::{from_json_str, to_json_string};
use crate::models::UserProgress;
use std::fs;
use std::path::{Path, PathBuf};

/// File name the snapshot is kept under inside the data directory.
pub const STORAGE_FILE: &str = "basketball-iq-progress.json";

pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store keeping its snapshot in `data_dir/basketball-iq-progress.json`.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self::at_path(data_dir.as_ref().join(STORAGE_FILE))
    }

    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProgressStore for JsonFileStore {
    fn try_load(&self) -> Result<Option<UserProgress>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path)?;
        from_json_str(&contents).map(Some)
    }

    fn try_save(&self, progress: &UserProgress) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        // Written next to the snapshot first, then renamed over it
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, to_json_string(progress)?)?;
        fs::rename(&tmp, &self.path)?;
        log::debug!("Saved progress to '{}'", self.path.display());
        Ok(())
    }
}
