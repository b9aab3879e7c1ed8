//! HTTP fetching.
//!
//! This module provides the shared HTTP client and helpers for building
//! request headers and asset URLs.

mod client;
pub(crate) mod request;

pub use client::HttpClient;

/// Resolves an asset path against the page URL.
///
/// Trailing slashes are stripped from `base_url` before `path` is appended,
/// so `https://host/` + `/assets/a.js` gives `https://host/assets/a.js`.
pub fn join_asset_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}
