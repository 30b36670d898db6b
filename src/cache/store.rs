//! Persistence surface for the word cache.
//!
//! A store holds whole named JSON records and can report how many bytes
//! they occupy. Each `set` replaces a record atomically.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::error::{Error, Result};

/// Async key-value store of JSON records.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Read a record; `None` if it was never written.
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Replace a record.
    async fn set(&self, key: &str, value: Value) -> Result<()>;

    /// Bytes currently occupied by all records.
    async fn bytes_in_use(&self) -> Result<u64>;

    /// Capacity ceiling in bytes, `None` when unbounded.
    fn quota(&self) -> Option<u64> {
        None
    }
}

fn record_size(key: &str, value: &Value) -> Result<u64> {
    let body = serde_json::to_vec(value)?;
    Ok((key.len() + body.len()) as u64)
}

/// In-process store; contents live as long as the value.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, Value>>,
    quota: Option<u64>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that refuses writes which would exceed `bytes`.
    #[must_use]
    pub fn with_quota(bytes: u64) -> Self {
        Self {
            records: Mutex::default(),
            quota: Some(bytes),
        }
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.records.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        let mut records = self.records.lock().await;
        if let Some(quota) = self.quota {
            let mut total = record_size(key, &value)?;
            for (other, record) in records.iter().filter(|(other, _)| other.as_str() != key) {
                total += record_size(other, record)?;
            }
            if total > quota {
                return Err(Error::Storage(format!(
                    "quota exceeded writing {key:?}: {total} of {quota} bytes"
                )));
            }
        }
        records.insert(key.to_string(), value);
        Ok(())
    }

    async fn bytes_in_use(&self) -> Result<u64> {
        let records = self.records.lock().await;
        let mut total = 0;
        for (key, value) in records.iter() {
            total += record_size(key, value)?;
        }
        Ok(total)
    }

    fn quota(&self) -> Option<u64> {
        self.quota
    }
}

/// Directory of `<key>.json` files.
///
/// Writes go to a temporary file that is then renamed over the record.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
    quota: Option<u64>,
}

impl JsonFileStore {
    /// Open (creating if needed) a store rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the directory cannot be created.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { dir, quota: None })
    }

    /// Report `bytes` as the store's capacity. Not enforced on disk.
    #[must_use]
    pub fn with_quota(mut self, bytes: u64) -> Self {
        self.quota = Some(bytes);
        self
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(Error::Storage(format!("invalid record key {key:?}")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

#[async_trait]
impl KvStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let path = self.record_path(key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        let path = self.record_path(key)?;
        let tmp = path.with_extension("json.tmp");
        let body = serde_json::to_vec(&value)?;
        tokio::fs::write(&tmp, body).await?;
        if let Err(err) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(err.into());
        }
        Ok(())
    }

    async fn bytes_in_use(&self) -> Result<u64> {
        let mut total = 0;
        let mut entries = tokio::fs::read_dir(&self.dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                total += entry.metadata().await?.len();
            }
        }
        Ok(total)
    }

    fn quota(&self) -> Option<u64> {
        self.quota
    }
}
