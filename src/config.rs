//! Store selection: which backend keeps the progress snapshot, and where.
use crate::database::{JsonFileStore, MemoryStore, ProgressStore, Result, SqliteStore};
use std::fs;
use std::path::PathBuf;

pub const STORE_ENV: &str = "COURT_IQ_STORE";
pub const DATA_DIR_ENV: &str = "COURT_IQ_DATA_DIR";

const DEFAULT_DATA_DIR: &str = ".court-iq";
const SQLITE_FILE: &str = "court-iq.sqlite3";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum StoreBackend {
    #[default]
    Json,
    Sqlite,
    /// Nothing outlives the process
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(StoreBackend::Json),
            "sqlite" => Ok(StoreBackend::Sqlite),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(format!("unknown store backend '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub data_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

impl StoreConfig {
    /// Defaults overridden by `COURT_IQ_STORE` and `COURT_IQ_DATA_DIR`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(value) = lookup(STORE_ENV) {
            match value.parse::<StoreBackend>() {
                Ok(backend) => config.backend = backend,
                Err(err) => log::warn!("{}: {}, using {:?}", STORE_ENV, err, config.backend),
            }
        }
        if let Some(dir) = lookup(DATA_DIR_ENV).filter(|dir| !dir.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }

        config
    }

    pub fn sqlite_path(&self) -> PathBuf {
        self.data_dir.join(SQLITE_FILE)
    }

    pub fn try_open_store(&self) -> Result<Box<dyn ProgressStore>> {
        let store: Box<dyn ProgressStore> = match self.backend {
            StoreBackend::Json => Box::new(JsonFileStore::new(&self.data_dir)),
            StoreBackend::Sqlite => {
                fs::create_dir_all(&self.data_dir)?;
                Box::new(SqliteStore::open(self.sqlite_path())?)
            }
            StoreBackend::Memory => Box::new(MemoryStore::new()),
        };
        Ok(store)
    }

    /// Opens the configured store, falling back to an in-memory one if that fails.
    pub fn open_store(&self) -> Box<dyn ProgressStore> {
        self.try_open_store().unwrap_or_else(|err| {
            log::warn!(
                "Cannot open {:?} store in '{}', progress will not be kept: {}",
                self.backend,
                self.data_dir.display(),
                err
            );
            Box::new(MemoryStore::new())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserProgress;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = StoreConfig::from_lookup(|_| None);

        assert_eq!(config, StoreConfig::default());
        assert_eq!(config.backend, StoreBackend::Json);
        assert_eq!(config.data_dir, PathBuf::from(".court-iq"));
    }

    #[test]
    fn test_env_overrides() {
        let config = StoreConfig::from_lookup(lookup_from(&[
            (STORE_ENV, " SQLite "),
            (DATA_DIR_ENV, "/tmp/court"),
        ]));

        assert_eq!(config.backend, StoreBackend::Sqlite);
        assert_eq!(config.sqlite_path(), PathBuf::from("/tmp/court/court-iq.sqlite3"));
    }

    #[test]
    fn test_unknown_backend_keeps_default() {
        let config = StoreConfig::from_lookup(lookup_from(&[(STORE_ENV, "redis")]));
        assert_eq!(config.backend, StoreBackend::Json);
    }

    #[test]
    fn test_open_each_backend() {
        let dir = tempdir().unwrap();
        let progress = UserProgress {
            total_answered: 2,
            total_correct: 1,
            streak_days: 1,
            last_study_date: "2025-10-01".to_string(),
            ..UserProgress::default()
        };

        for backend in [StoreBackend::Json, StoreBackend::Sqlite] {
            let config = StoreConfig {
                backend,
                data_dir: dir.path().join(format!("{:?}", backend)),
            };
            config.open_store().save(&progress);
            assert_eq!(config.open_store().load(), progress);
        }

        let memory = StoreConfig {
            backend: StoreBackend::Memory,
            data_dir: dir.path().to_path_buf(),
        };
        assert_eq!(memory.open_store().load(), UserProgress::default());
    }

    #[test]
    fn test_unopenable_sqlite_falls_back_to_memory() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "").unwrap();

        let config = StoreConfig {
            backend: StoreBackend::Sqlite,
            data_dir: blocker,
        };
        assert!(config.try_open_store().is_err());

        let store = config.open_store();
        store.save(&UserProgress::default());
        assert_eq!(store.load(), UserProgress::default());
    }
}
