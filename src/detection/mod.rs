//! Bundle change detection.
//!
//! This module handles:
//! - Locating the JavaScript assets referenced by the entry page
//! - Loading the expected-file manifest (with retry and caching)
//! - Probing asset modification times
//! - Reconciling assets against the manifest (advanced check)
//! - Comparing the embedded API base with a constant (legacy check)
//! - Archiving located assets to disk

mod archive;
mod legacy;
mod locator;
mod manifest;
mod probe;
mod reconcile;

use std::sync::Arc;

use log::{info, warn};

use crate::config::Config;
use crate::error_handling::GuardError;
use crate::fetch::HttpClient;

// Re-export public API
pub use archive::AssetArchive;
pub use legacy::LegacyCheck;
pub use locator::{AssetLocator, LocatedPage};
pub use manifest::{parse_manifest, shared_manifest_cache, ManifestCache, ManifestFetcher};
pub use probe::ModificationTimeProber;
pub use reconcile::{find_matching_asset, Reconciler};

/// Decides whether the bot may keep running against the current bundle.
///
/// Runs the manifest reconciliation when `advanced_detection` is set,
/// otherwise the legacy API base comparison.
///
/// # Errors
///
/// Returns `GuardError::RetryExhausted` if the manifest could not be fetched
/// after every retry. All other failures resolve to `Ok(false)`.
pub async fn check_base_url(config: &Config, client: Arc<HttpClient>) -> Result<bool, GuardError> {
    let session = &config.session_name;

    if config.advanced_detection {
        info!("{} | 🕵️ Processing advanced detection...", session);
        let verdict = Reconciler::from_config(client, config)
            .reconcile(&config.base_url, &config.manifest_url)
            .await?;
        if let Some(reason) = verdict.reason() {
            warn!("{} | Bundle check failed: {}", session, reason);
        }
        return Ok(verdict.is_safe());
    }

    info!("{} | Checking API base (legacy detection)", session);
    let safe = LegacyCheck::new(client, config.api_base.clone())
        .check(&config.base_url)
        .await;
    if !safe {
        warn!("{} | API base changed or could not be verified", session);
    }
    Ok(safe)
}
