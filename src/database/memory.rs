//! In-process store, used by tests and the `memory` backend.
use super::{ProgressStore, Result};
use crate::export::json::{from_json_str, to_json_string};
use crate::models::UserProgress;
use std::cell::{Cell, RefCell};
use std::io;

/// Keeps the serialized snapshot in memory.
#[derive(Default)]
pub struct MemoryStore {
    blob: RefCell<Option<String>>,
    reject_writes: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with a raw serialized blob, which need not be valid.
    pub fn with_raw(blob: impl Into<String>) -> Self {
        Self {
            blob: RefCell::new(Some(blob.into())),
            reject_writes: Cell::new(false),
        }
    }

    /// Makes every following save fail, as a full storage quota would.
    pub fn set_reject_writes(&self, reject: bool) {
        self.reject_writes.set(reject);
    }

    pub fn raw(&self) -> Option<String> {
        self.blob.borrow().clone()
    }
}

impl ProgressStore for MemoryStore {
    fn try_load(&self) -> Result<Option<UserProgress>> {
        self.blob
            .borrow()
            .as_deref()
            .map(from_json_str)
            .transpose()
    }

    fn try_save(&self, progress: &UserProgress) -> Result<()> {
        if self.reject_writes.get() {
            return Err(io::Error::other("memory store rejects writes").into());
        }
        let encoded = to_json_string(progress)?;
        *self.blob.borrow_mut() = Some(encoded);
        Ok(())
    }
}
