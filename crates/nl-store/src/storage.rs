//! Key-value storage backends for the progression record.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::Result;

/// String key-value storage. Reads return `None` for a missing key;
/// errors are for actual I/O or encoding failures.
pub trait Storage {
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&mut self, key: &str, value: &str) -> Result<()>;
}

/// One JSON file per key under a base directory.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Storage under the system temp directory, namespaced to the app.
    pub fn in_temp_dir() -> Self {
        Self::new(std::env::temp_dir().join("notenleer"))
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path(key), value)?;
        Ok(())
    }
}

/// In-memory storage for tests. Failures can be injected to exercise
/// the degraded paths.
#[derive(Default)]
pub struct MemStorage {
    entries: HashMap<String, String>,
    pub fail_reads: bool,
    pub fail_writes: bool,
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with one key.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut storage = Self::new();
        storage.entries.insert(key.to_string(), value.to_string());
        storage
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl Storage for MemStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        if self.fail_reads {
            anyhow::bail!("injected read failure");
        }
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes {
            anyhow::bail!("injected write failure");
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mem_storage_roundtrips() {
        let mut storage = MemStorage::new();
        assert_eq!(storage.read("k").unwrap(), None);
        storage.write("k", "v").unwrap();
        assert_eq!(storage.read("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn injected_failures_error() {
        let mut storage = MemStorage::new();
        storage.fail_reads = true;
        storage.fail_writes = true;
        assert!(storage.read("k").is_err());
        assert!(storage.write("k", "v").is_err());
    }

    #[test]
    fn file_storage_missing_key_is_none() {
        let storage = FileStorage::new(std::env::temp_dir().join("nl-store-test-missing"));
        assert_eq!(storage.read("absent").unwrap(), None);
    }
}
