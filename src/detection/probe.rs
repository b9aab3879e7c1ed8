//! Asset modification time probing.

use std::sync::Arc;

use chrono::NaiveDateTime;
use log::{error, warn};
use reqwest::header::LAST_MODIFIED;

use crate::fetch::HttpClient;
use crate::parse::parse_last_modified;

/// Reads asset modification times with HEAD requests.
#[derive(Debug, Clone)]
pub struct ModificationTimeProber {
    client: Arc<HttpClient>,
}

impl ModificationTimeProber {
    /// Creates a prober using the shared client.
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    /// Returns the `Last-Modified` time of `asset_url`.
    ///
    /// A failed request, a missing header and an unparseable header all
    /// yield `None`; each case is logged.
    pub async fn probe_last_modified(&self, asset_url: &str) -> Option<NaiveDateTime> {
        let headers = match self.client.head(asset_url).await {
            Ok(headers) => headers,
            Err(e) => {
                error!("Error fetching Last-Modified header for {}: {}", asset_url, e);
                return None;
            }
        };

        let Some(value) = headers.get(LAST_MODIFIED) else {
            warn!("No Last-Modified header for {}", asset_url);
            return None;
        };

        let Ok(text) = value.to_str() else {
            warn!("Last-Modified header for {} is not valid text", asset_url);
            return None;
        };

        let parsed = parse_last_modified(text);
        if parsed.is_none() {
            warn!("Could not parse Last-Modified '{}' for {}", text, asset_url);
        }
        parsed
    }
}
