//! Expected-file manifest loading.
//!
//! The manifest is a JSON document of the form
//! `{"tomarket": {"index": ["<id>|<YYYY-MM-DD HH:MM:SS>", ...]}}`. Loaded
//! manifests are kept in a process-wide cache for 45 minutes.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, LazyLock};
use std::time::Duration;

use log::{debug, error, warn};
use serde::Deserialize;
use tokio_retry::RetryIf;

use crate::cache::TtlCache;
use crate::config::{MANIFEST_CACHE_TTL, MANIFEST_MAX_RETRIES, MANIFEST_RETRY_DELAY_SECS};
use crate::error_handling::{manifest_retry_schedule, GuardError, ManifestParseError};
use crate::fetch::HttpClient;
use crate::models::ManifestEntry;
use crate::parse::parse_manifest_timestamp;

/// Cache of parsed manifests keyed by manifest URL.
pub type ManifestCache = TtlCache<String, Arc<Vec<ManifestEntry>>>;

/// Process-wide manifest cache (lazy-created)
static MANIFEST_CACHE: LazyLock<Arc<ManifestCache>> =
    LazyLock::new(|| Arc::new(TtlCache::new(MANIFEST_CACHE_TTL)));

/// Returns the manifest cache shared by every check in this process.
pub fn shared_manifest_cache() -> Arc<ManifestCache> {
    MANIFEST_CACHE.clone()
}

#[derive(Debug, Deserialize)]
struct ManifestDocument {
    tomarket: ManifestSection,
}

#[derive(Debug, Deserialize)]
struct ManifestSection {
    index: Vec<String>,
}

/// Parses a manifest document, keeping publication order.
///
/// # Errors
///
/// Returns a `ManifestParseError` if the document is not valid JSON, lacks
/// `tomarket.index`, or contains a malformed entry.
pub fn parse_manifest(body: &str) -> Result<Vec<ManifestEntry>, ManifestParseError> {
    let document: ManifestDocument = serde_json::from_str(body)?;
    document
        .tomarket
        .index
        .iter()
        .map(|item| parse_entry(item))
        .collect()
}

fn parse_entry(item: &str) -> Result<ManifestEntry, ManifestParseError> {
    let mut parts = item.split('|');
    let file_id = parts.next().unwrap_or_default();
    let timestamp = parts
        .next()
        .ok_or_else(|| ManifestParseError::MissingSeparator(item.to_string()))?;
    let expected =
        parse_manifest_timestamp(timestamp).map_err(|source| ManifestParseError::BadTimestamp {
            entry: item.to_string(),
            source,
        })?;
    Ok(ManifestEntry {
        file_id: file_id.to_string(),
        expected,
    })
}

/// Loads manifests with retry, backoff and caching.
#[derive(Debug, Clone)]
pub struct ManifestFetcher {
    client: Arc<HttpClient>,
    cache: Arc<ManifestCache>,
    max_retries: u32,
    initial_delay: Duration,
}

impl ManifestFetcher {
    /// Creates a fetcher backed by the process-wide cache with the default
    /// retry policy (5 attempts, 3s initial delay).
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self::with_cache(client, shared_manifest_cache())
    }

    /// Creates a fetcher backed by `cache`.
    pub fn with_cache(client: Arc<HttpClient>, cache: Arc<ManifestCache>) -> Self {
        Self {
            client,
            cache,
            max_retries: MANIFEST_MAX_RETRIES,
            initial_delay: Duration::from_secs(MANIFEST_RETRY_DELAY_SECS),
        }
    }

    /// Overrides the retry policy.
    ///
    /// `max_retries` counts every attempt including the first; zero is
    /// treated as one.
    pub fn with_retry_policy(mut self, max_retries: u32, initial_delay: Duration) -> Self {
        self.max_retries = max_retries.max(1);
        self.initial_delay = initial_delay;
        self
    }

    /// Returns the expected files published at `manifest_url`.
    ///
    /// Served from the cache when a successful load happened less than one TTL
    /// ago. A manifest that cannot be decoded yields an empty list, which is
    /// not cached.
    ///
    /// # Errors
    ///
    /// Returns `GuardError::RetryExhausted` when every attempt failed with a
    /// transport error.
    pub async fn load_manifest(
        &self,
        manifest_url: &str,
    ) -> Result<Arc<Vec<ManifestEntry>>, GuardError> {
        let key = manifest_url.to_string();
        if let Some(cached) = self.cache.get(&key).await {
            debug!("Manifest cache hit for {}", manifest_url);
            return Ok(cached);
        }
        debug!("Manifest cache miss for {}", manifest_url);

        match self.fetch_with_retry(manifest_url).await {
            Ok(entries) => {
                debug!(
                    "Loaded {} manifest entries from {}",
                    entries.len(),
                    manifest_url
                );
                let entries = Arc::new(entries);
                self.cache.insert(key, entries.clone()).await;
                Ok(entries)
            }
            Err(GuardError::Parse(e)) => {
                error!("Error loading detection data from {}: {}", manifest_url, e);
                Ok(Arc::new(Vec::new()))
            }
            Err(e) => Err(e),
        }
    }

    async fn fetch_with_retry(&self, manifest_url: &str) -> Result<Vec<ManifestEntry>, GuardError> {
        let attempts = AtomicU32::new(0);
        let max_retries = self.max_retries;

        let result = RetryIf::start(
            manifest_retry_schedule(self.initial_delay, max_retries),
            || {
                attempts.fetch_add(1, Ordering::SeqCst);
                self.fetch_once(manifest_url)
            },
            |e: &GuardError| {
                if !e.is_transport() {
                    return false;
                }
                let attempt = attempts.load(Ordering::SeqCst);
                if attempt < max_retries {
                    warn!(
                        "Server error for {}: {}. Retrying ({}/{})",
                        manifest_url, e, attempt, max_retries
                    );
                }
                true
            },
        )
        .await;

        match result {
            Err(e) if e.is_transport() => {
                let attempts = attempts.load(Ordering::SeqCst);
                error!(
                    "Max retries reached for {} after {} attempts: {}",
                    manifest_url, attempts, e
                );
                Err(GuardError::RetryExhausted {
                    url: manifest_url.to_string(),
                    attempts,
                    source: Box::new(e),
                })
            }
            other => other,
        }
    }

    async fn fetch_once(&self, manifest_url: &str) -> Result<Vec<ManifestEntry>, GuardError> {
        let body = self.client.get_manifest(manifest_url).await?;
        Ok(parse_manifest(&body)?)
    }
}
