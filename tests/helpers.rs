// Shared test helpers for mock servers and pipeline construction.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::sync::Arc;
use std::time::Duration;

use safe_guard::cache::{Clock, TtlCache};
use safe_guard::config::MANIFEST_CACHE_TTL;
use safe_guard::detection::{ManifestCache, ManifestFetcher, Reconciler};
use safe_guard::initialization::init_client;
use safe_guard::{Config, HttpClient};

/// Last-Modified value for 2024-01-01 00:00:00 (a Monday).
#[allow(dead_code)]
pub const JAN_FIRST_HTTP: &str = "Mon, 01 Jan 2024 00:00:00 GMT";

/// Same instant one second later.
#[allow(dead_code)]
pub const JAN_FIRST_PLUS_ONE_HTTP: &str = "Mon, 01 Jan 2024 00:00:01 GMT";

/// Builds the shared client with default configuration.
pub fn test_client() -> Arc<HttpClient> {
    init_client(&Config::default()).expect("Failed to build test client")
}

/// Creates a manifest cache private to one test.
#[allow(dead_code)]
pub fn private_cache() -> Arc<ManifestCache> {
    Arc::new(TtlCache::new(MANIFEST_CACHE_TTL))
}

/// Creates a manifest cache private to one test, reading time from `clock`.
#[allow(dead_code)]
pub fn private_cache_with_clock(clock: Arc<dyn Clock>) -> Arc<ManifestCache> {
    Arc::new(TtlCache::with_clock(MANIFEST_CACHE_TTL, clock))
}

/// Manifest fetcher with a private cache and millisecond retry delays.
#[allow(dead_code)]
pub fn fast_fetcher(client: Arc<HttpClient>, cache: Arc<ManifestCache>) -> ManifestFetcher {
    ManifestFetcher::with_cache(client, cache).with_retry_policy(5, Duration::from_millis(1))
}

/// Reconciler with a private cache and millisecond retry delays.
#[allow(dead_code)]
pub fn test_reconciler() -> Reconciler {
    let client = test_client();
    let fetcher = fast_fetcher(client.clone(), private_cache());
    Reconciler::new(client).with_manifest_fetcher(fetcher)
}

/// Serializes manifest entries into the published document format.
#[allow(dead_code)]
pub fn manifest_body(entries: &[&str]) -> String {
    serde_json::json!({ "tomarket": { "index": entries } }).to_string()
}

/// Minimal entry page referencing `paths` the way Vite output does.
#[allow(dead_code)]
pub fn page_with_assets(paths: &[&str]) -> String {
    let mut html = String::from("<!doctype html><html><head><title>Tomarket</title>");
    for (i, path) in paths.iter().enumerate() {
        if i == 0 {
            html.push_str(&format!(
                "<script type=\"module\" crossorigin src=\"{}\"></script>",
                path
            ));
        } else {
            html.push_str(&format!(
                "<link rel=\"modulepreload\" crossorigin href=\"{}\">",
                path
            ));
        }
    }
    html.push_str("</head><body><div id=\"root\"></div></body></html>");
    html
}
