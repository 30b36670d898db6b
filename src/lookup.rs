//! Lookup orchestration: cache first, then fetch, extract and store.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::cache::{KvStore, WordCache};
use crate::encoding::decode_page;
use crate::entry::{normalize_word, WordEntry};
use crate::error::{Error, Result};
use crate::extract::extract_entry;
use crate::options::Options;
use crate::url_utils;

/// Raw page as returned by a [`Fetcher`].
#[derive(Debug, Clone, Default)]
pub struct FetchedPage {
    pub body: Vec<u8>,
    /// Value of the `Content-Type` header, if any.
    pub content_type: Option<String>,
}

/// Why a page could not be fetched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// HTTP 404.
    #[error("not found")]
    NotFound,

    /// Any other non-success status.
    #[error("{status} {reason}")]
    Status { status: u16, reason: String },

    /// Connection, TLS or body read failure.
    #[error("{0}")]
    Transport(String),
}

/// Retrieves dictionary pages with a plain GET.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> std::result::Result<FetchedPage, FetchError>;
}

/// [`Fetcher`] backed by a shared `reqwest` client.
#[cfg(feature = "http")]
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

#[cfg(feature = "http")]
impl HttpFetcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> std::result::Result<FetchedPage, FetchError> {
        let res = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| FetchError::Transport(err.to_string()))?;

        let status = res.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound);
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let content_type = res
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string);
        let body = res
            .bytes()
            .await
            .map_err(|err| FetchError::Transport(err.to_string()))?
            .to_vec();

        Ok(FetchedPage { body, content_type })
    }
}

/// Result of [`Lookup::lookup`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupOutcome {
    pub entry: WordEntry,
    /// `true` when served from the cache.
    pub cached: bool,
}

/// Ties a fetcher, the extractor and a word cache together.
#[derive(Debug)]
pub struct Lookup<F, S> {
    fetcher: F,
    cache: WordCache<S>,
    options: Options,
}

impl<F: Fetcher, S: KvStore> Lookup<F, S> {
    pub fn new(fetcher: F, cache: WordCache<S>) -> Self {
        Self::with_options(fetcher, cache, Options::default())
    }

    pub fn with_options(fetcher: F, cache: WordCache<S>, options: Options) -> Self {
        Self { fetcher, cache, options }
    }

    pub fn cache(&self) -> &WordCache<S> {
        &self.cache
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Look up `word`, serving from the cache when possible.
    ///
    /// A fetched entry is stored only when the `auto_save` setting is on.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidWord`] for blank input
    /// - [`Error::NotFound`] when the dictionary has no page for the word
    /// - [`Error::Fetch`] for other fetch failures
    /// - [`Error::Parse`] when the page yields no entry
    /// - [`Error::Storage`] when the cache fails
    pub async fn lookup(&self, word: &str) -> Result<LookupOutcome> {
        let clean = normalize_word(word);
        if clean.is_empty() {
            return Err(Error::InvalidWord);
        }

        if let Some(entry) = self.cache.get(&clean).await? {
            info!(word = %clean, "using cached entry");
            return Ok(LookupOutcome { entry, cached: true });
        }

        let url = url_utils::lookup_url(&self.options.origin, &clean)?;
        debug!(word = %clean, %url, "fetching dictionary page");
        let page = self.fetcher.fetch(&url).await.map_err(|err| match err {
            FetchError::NotFound => Error::NotFound { word: word.to_string() },
            other => Error::Fetch {
                word: word.to_string(),
                message: other.to_string(),
            },
        })?;

        let html = decode_page(&page.body, page.content_type.as_deref());
        let entry = extract_entry(&html, word, &url, self.cache.now(), &self.options)?;

        if self.cache.get_settings().await?.auto_save {
            self.cache.store(entry.clone()).await?;
        } else {
            debug!(word = %clean, "auto-save disabled; entry not cached");
        }

        Ok(LookupOutcome { entry, cached: false })
    }

    /// Cache an entry explicitly, regardless of `auto_save`.
    ///
    /// # Errors
    ///
    /// See [`WordCache::store`].
    pub async fn save(&self, entry: WordEntry) -> Result<()> {
        self.cache.store(entry).await
    }
}
