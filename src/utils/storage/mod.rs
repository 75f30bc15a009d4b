use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Format version written into every store file. Opening a store written by a
/// newer version is refused instead of silently misreading it.
pub const SCHEMA_VERSION: u32 = 1;

const VERSION_KEY: &str = "schemaVersion";

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to access store file: {0}")]
    Io(#[from] io::Error),
    #[error("stored value is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("store schema version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
    #[error("store schema version is not a number")]
    MalformedVersion,
}

/// String key-value store with the same surface the browser's localStorage
/// exposes. Values are JSON-encoded by the repositories.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), Error>;
    fn remove(&mut self, key: &str) -> Result<(), Error>;
}

pub fn read_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, Error> {
    match store.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

pub fn write_json<T: Serialize>(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), Error> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

/// Store persisted as a single JSON object file mapping keys to string
/// values. Rewritten in full on every mutation; single writer assumed.
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    pub fn open(path: &Path) -> Result<Self, Error> {
        let mut entries: BTreeMap<String, String> = match fs::read_to_string(path) {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };

        match entries.get(VERSION_KEY) {
            Some(raw) => {
                let found = raw.parse::<u32>().map_err(|_| Error::MalformedVersion)?;
                if found > SCHEMA_VERSION {
                    return Err(Error::UnsupportedVersion {
                        found,
                        supported: SCHEMA_VERSION,
                    });
                }
            }
            None => {
                entries.insert(VERSION_KEY.to_string(), SCHEMA_VERSION.to_string());
            }
        }

        let store = Self {
            path: path.to_path_buf(),
            entries,
        };
        store.flush()?;
        Ok(store)
    }

    fn flush(&self) -> Result<(), Error> {
        let raw = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), Error> {
        self.entries.remove(key);
        self.flush()
    }
}

/// In-memory store for tests.
#[derive(Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), Error> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trips_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let mut store = FileStore::open(&path).unwrap();
        store.set("menu", r#"["bowl"]"#).unwrap();
        drop(store);

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("menu").unwrap().as_deref(), Some(r#"["bowl"]"#));
    }

    #[test]
    fn file_store_stamps_schema_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let store = FileStore::open(&path).unwrap();
        assert_eq!(
            store.get(VERSION_KEY).unwrap(),
            Some(SCHEMA_VERSION.to_string())
        );
    }

    #[test]
    fn file_store_refuses_newer_schema_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, r#"{"schemaVersion": "999"}"#).unwrap();

        match FileStore::open(&path) {
            Err(Error::UnsupportedVersion { found, supported }) => {
                assert_eq!(found, 999);
                assert_eq!(supported, SCHEMA_VERSION);
            }
            other => panic!("expected version error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn remove_deletes_the_key() {
        let mut store = MemoryStore::new();
        store.set("currentUser", "{}").unwrap();
        store.remove("currentUser").unwrap();
        assert_eq!(store.get("currentUser").unwrap(), None);
    }

    #[test]
    fn read_json_surfaces_corrupt_values() {
        let mut store = MemoryStore::new();
        store.set("orders", "not json").unwrap();
        let result: Result<Option<Vec<String>>, Error> = read_json(&store, "orders");
        assert!(matches!(result, Err(Error::Corrupt(_))));
    }
}
