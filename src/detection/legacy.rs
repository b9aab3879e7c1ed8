//! Legacy API base check.
//!
//! Used when advanced detection is disabled. Each located bundle is searched
//! for its `online:"<url>"` API base; the bundle is safe as soon as one asset
//! carries the known-good value.

use std::sync::Arc;

use log::{error, info, warn};

use crate::config::PAGE_DUMP_CHARS;
use crate::fetch::{join_asset_url, HttpClient};
use crate::parse::extract_api_base;

use super::locator::AssetLocator;

/// Compares the API base embedded in the bundle with a known constant.
#[derive(Debug, Clone)]
pub struct LegacyCheck {
    locator: AssetLocator,
    client: Arc<HttpClient>,
    api_base: String,
}

impl LegacyCheck {
    /// Creates a check expecting `api_base`.
    pub fn new(client: Arc<HttpClient>, api_base: impl Into<String>) -> Self {
        Self {
            locator: AssetLocator::new(client.clone()),
            client,
            api_base: api_base.into(),
        }
    }

    /// Returns true if an asset referenced by `page_url` embeds the expected
    /// API base.
    ///
    /// Assets are tried in page order; an asset whose API base differs (or
    /// has none) moves the search to the next one.
    pub async fn check(&self, page_url: &str) -> bool {
        let Some(page) = self.locator.locate_page(page_url).await else {
            return false;
        };

        if page.assets.is_empty() {
            warn!(
                "Could not find any main.js format. Dumping page content for inspection:\n{}",
                page_dump(&page.body)
            );
            return false;
        }

        for path in &page.assets {
            info!("Trying format: {}", path);
            let asset_url = join_asset_url(page_url, path);
            match self.fetch_api_base(&asset_url).await {
                Some(found) if found == self.api_base => {
                    info!("No change in api!");
                    return true;
                }
                Some(found) => {
                    warn!(
                        "API base in {} is {}, expected {}",
                        asset_url, found, self.api_base
                    );
                }
                None => {}
            }
        }

        warn!(
            "No JavaScript file references the expected API base {}",
            self.api_base
        );
        false
    }

    async fn fetch_api_base(&self, asset_url: &str) -> Option<String> {
        info!("Checking for changes in api...");
        match self.client.get_page(asset_url).await {
            Ok(content) => {
                let found = extract_api_base(&content);
                if found.is_none() {
                    warn!("Could not find the API base in {}", asset_url);
                }
                found
            }
            Err(e) => {
                error!("Error fetching the JS file {}: {}", asset_url, e);
                None
            }
        }
    }
}

/// First `PAGE_DUMP_CHARS` characters of `body`, cut on a char boundary.
fn page_dump(body: &str) -> String {
    body.chars().take(PAGE_DUMP_CHARS).collect()
}
