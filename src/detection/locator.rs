//! Asset location on the entry page.

use std::sync::Arc;

use log::{debug, error};

use crate::fetch::HttpClient;
use crate::models::AssetPath;
use crate::parse::extract_asset_paths;

/// Entry page body together with the asset paths it references.
#[derive(Debug, Clone)]
pub struct LocatedPage {
    /// Raw page body
    pub body: String,
    /// Quoted `/assets/*.js` references, in order of appearance
    pub assets: Vec<AssetPath>,
}

/// Fetches the entry page and extracts its JavaScript asset paths.
#[derive(Debug, Clone)]
pub struct AssetLocator {
    client: Arc<HttpClient>,
}

impl AssetLocator {
    /// Creates a locator using the shared client.
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    /// Fetches `page_url` and extracts its asset paths, keeping the body.
    ///
    /// Returns `None` when the page could not be fetched at all (transport
    /// failure or non-2xx status). The failure is logged.
    pub async fn locate_page(&self, page_url: &str) -> Option<LocatedPage> {
        match self.client.get_page(page_url).await {
            Ok(body) => {
                let assets = extract_asset_paths(&body);
                debug!("Located {} asset path(s) on {}", assets.len(), page_url);
                Some(LocatedPage { body, assets })
            }
            Err(e) => {
                error!("Error fetching JavaScript paths from {}: {}", page_url, e);
                None
            }
        }
    }

    /// Returns the asset paths referenced by `page_url`.
    ///
    /// `None` means the site could not be checked; `Some(vec![])` means the
    /// page was reachable but referenced no assets.
    pub async fn locate_assets(&self, page_url: &str) -> Option<Vec<AssetPath>> {
        self.locate_page(page_url).await.map(|page| page.assets)
    }
}
