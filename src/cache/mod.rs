//! Word Cache
//!
//! Persistent mapping from normalized word to [`WordEntry`], plus the
//! settings record and storage accounting. Two records live in the
//! [`KvStore`]: `words` (the whole word map) and `settings`.
//!
//! Every read-modify-write cycle holds an internal lock, so the touch-write
//! performed by [`WordCache::get`] has completed before `get` returns.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::entry::{normalize_word, stored_precision, WordEntry};
use crate::error::{Error, ParseFailure, Result};

pub mod settings;
pub mod store;

pub use settings::{Settings, SettingsPatch};
pub use store::{JsonFileStore, KvStore, MemoryStore};

const WORDS_KEY: &str = "words";
const SETTINGS_KEY: &str = "settings";

type WordMap = BTreeMap<String, WordEntry>;
type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Storage footprint reported by [`WordCache::usage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    pub bytes_in_use: u64,
    /// `None` when the store has no ceiling.
    pub quota: Option<u64>,
}

/// Cache of dictionary entries keyed by normalized word.
pub struct WordCache<S> {
    store: S,
    lock: Mutex<()>,
    clock: Clock,
}

impl<S: fmt::Debug> fmt::Debug for WordCache<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordCache").field("store", &self.store).finish_non_exhaustive()
    }
}

impl<S: KvStore> WordCache<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            lock: Mutex::new(()),
            clock: Box::new(Utc::now),
        }
    }

    /// Replace the time source used for access timestamps.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Current time according to the cache's clock, at millisecond
    /// precision so it survives a round trip through the store.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        stored_precision((self.clock)())
    }

    /// The underlying store.
    pub fn backend(&self) -> &S {
        &self.store
    }

    async fn load_words(&self) -> Result<WordMap> {
        match self.store.get(WORDS_KEY).await? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(WordMap::new()),
        }
    }

    async fn save_words(&self, words: &WordMap) -> Result<()> {
        self.store.set(WORDS_KEY, serde_json::to_value(words)?).await
    }

    /// Insert or replace the entry for its normalized word.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] for an entry without definitions, which
    /// is never persisted, and [`Error::Storage`] if the store fails.
    pub async fn store(&self, mut entry: WordEntry) -> Result<()> {
        entry.word = normalize_word(&entry.word);
        if entry.definitions.is_empty() {
            warn!(word = %entry.word, "refusing to cache entry without definitions");
            return Err(Error::Parse {
                word: entry.word,
                reason: ParseFailure::NoDefinitions,
            });
        }
        entry.last_accessed = entry.last_accessed.max(entry.timestamp);

        let _guard = self.lock.lock().await;
        let mut words = self.load_words().await?;
        debug!(word = %entry.word, replaced = words.contains_key(&entry.word), "storing entry");
        words.insert(entry.word.clone(), entry);
        self.save_words(&words).await
    }

    /// Look up a word, refreshing and persisting its `last_accessed`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the store fails; a miss is `Ok(None)`.
    pub async fn get(&self, word: &str) -> Result<Option<WordEntry>> {
        let key = normalize_word(word);

        let _guard = self.lock.lock().await;
        let mut words = self.load_words().await?;
        let Some(entry) = words.get_mut(&key) else {
            debug!(word = %key, "cache miss");
            return Ok(None);
        };

        entry.last_accessed = self.now().max(entry.last_accessed).max(entry.timestamp);
        let touched = entry.clone();
        self.save_words(&words).await?;
        debug!(word = %key, "cache hit");
        Ok(Some(touched))
    }

    /// Every entry, most recently created first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the store fails.
    pub async fn get_all(&self) -> Result<Vec<WordEntry>> {
        let mut entries: Vec<WordEntry> = self.load_words().await?.into_values().collect();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(entries)
    }

    /// Remove a word. Absent words are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the store fails.
    pub async fn delete(&self, word: &str) -> Result<()> {
        let key = normalize_word(word);

        let _guard = self.lock.lock().await;
        let mut words = self.load_words().await?;
        if words.remove(&key).is_none() {
            return Ok(());
        }
        debug!(word = %key, "deleted entry");
        self.save_words(&words).await
    }

    /// Remove every word. Settings are kept.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the store fails.
    pub async fn clear_all(&self) -> Result<()> {
        let _guard = self.lock.lock().await;
        self.save_words(&WordMap::new()).await
    }

    /// Stored settings, or defaults if none were ever saved.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the store fails.
    pub async fn get_settings(&self) -> Result<Settings> {
        match self.store.get(SETTINGS_KEY).await? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(Settings::default()),
        }
    }

    /// Merge `patch` over the stored settings and persist the result.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the store fails.
    pub async fn save_settings(&self, patch: SettingsPatch) -> Result<Settings> {
        let _guard = self.lock.lock().await;
        let merged = patch.apply(self.get_settings().await?);
        self.store.set(SETTINGS_KEY, serde_json::to_value(&merged)?).await?;
        Ok(merged)
    }

    /// Current footprint and ceiling of the store.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the store fails.
    pub async fn usage(&self) -> Result<Usage> {
        Ok(Usage {
            bytes_in_use: self.store.bytes_in_use().await?,
            quota: self.store.quota(),
        })
    }
}
