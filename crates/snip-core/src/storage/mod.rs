//! Durable key/value storage for offline state.
//!
//! Every durable piece of state is a named JSON record: per entity kind the
//! local cache, the sync-status map, and the retry queue, plus one session
//! record. Records are independent; a partial write never corrupts the rest.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;

/// Named-record storage backend.
pub trait Storage {
    /// Read a record's raw JSON payload, `None` if absent
    fn read(&self, record: &str) -> Result<Option<String>>;

    /// Write a record, replacing any previous payload
    fn write(&self, record: &str, payload: &str) -> Result<()>;

    /// Remove a record if present
    fn remove(&self, record: &str) -> Result<()>;
}

/// Load and deserialize a record
pub fn load_record<T: DeserializeOwned>(storage: &dyn Storage, record: &str) -> Result<Option<T>> {
    match storage.read(record)? {
        Some(payload) => Ok(Some(serde_json::from_str(&payload)?)),
        None => Ok(None),
    }
}

/// Serialize and persist a record
pub fn save_record<T: Serialize>(storage: &dyn Storage, record: &str, value: &T) -> Result<()> {
    storage.write(record, &serde_json::to_string(value)?)
}

/// File-backed storage: one `<record>.json` per record under a directory.
pub struct JsonFileStorage {
    dir: PathBuf,
}

impl JsonFileStorage {
    /// Open storage rooted at `dir`, creating the directory if needed
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn record_path(&self, record: &str) -> PathBuf {
        self.dir.join(format!("{record}.json"))
    }
}

impl Storage for JsonFileStorage {
    fn read(&self, record: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.record_path(record)) {
            Ok(payload) => Ok(Some(payload)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, record: &str, payload: &str) -> Result<()> {
        // Write-then-rename so an interrupted write never leaves a
        // half-written record behind.
        let path = self.record_path(record);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, payload)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, record: &str) -> Result<()> {
        match fs::remove_file(self.record_path(record)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// In-memory storage for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    records: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn read(&self, record: &str) -> Result<Option<String>> {
        Ok(self.records.borrow().get(record).cloned())
    }

    fn write(&self, record: &str, payload: &str) -> Result<()> {
        self.records
            .borrow_mut()
            .insert(record.to_string(), payload.to_string());
        Ok(())
    }

    fn remove(&self, record: &str) -> Result<()> {
        self.records.borrow_mut().remove(record);
        Ok(())
    }
}
