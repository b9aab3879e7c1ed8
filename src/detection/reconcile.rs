//! Manifest reconciliation.
//!
//! Matches the assets referenced by the entry page against the published
//! manifest and decides whether the bundle is unchanged. Entries are checked
//! strictly in manifest order and the first failure ends the pass, so no
//! probe is issued for later entries.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, info, warn};

use crate::config::Config;
use crate::error_handling::GuardError;
use crate::fetch::{join_asset_url, HttpClient};
use crate::models::{AssetPath, AssetRecord, UnsafeReason, Verdict};
use crate::parse::is_timestamp_mismatch;

use super::archive::AssetArchive;
use super::locator::AssetLocator;
use super::manifest::ManifestFetcher;
use super::probe::ModificationTimeProber;

/// Returns the first asset path containing `file_id`.
pub fn find_matching_asset<'a>(assets: &'a [AssetPath], file_id: &str) -> Option<&'a AssetPath> {
    assets.iter().find(|path| path.contains(file_id))
}

/// Advanced, manifest-based bundle check.
#[derive(Debug, Clone)]
pub struct Reconciler {
    locator: AssetLocator,
    manifest: ManifestFetcher,
    prober: ModificationTimeProber,
    archive: Option<AssetArchive>,
}

impl Reconciler {
    /// Creates a reconciler using the process-wide manifest cache and the
    /// default retry policy, without archiving.
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self {
            locator: AssetLocator::new(client.clone()),
            manifest: ManifestFetcher::new(client.clone()),
            prober: ModificationTimeProber::new(client),
            archive: None,
        }
    }

    /// Creates a reconciler honoring the retry and archive settings.
    pub fn from_config(client: Arc<HttpClient>, config: &Config) -> Self {
        let manifest = ManifestFetcher::new(client.clone()).with_retry_policy(
            config.manifest_max_retries,
            Duration::from_secs(config.manifest_retry_delay_secs),
        );
        let archive = config
            .save_js_files
            .then(|| AssetArchive::from_config(client.clone(), config));
        Self {
            manifest,
            archive,
            ..Self::new(client)
        }
    }

    /// Replaces the manifest fetcher (e.g. to use a private cache).
    pub fn with_manifest_fetcher(mut self, manifest: ManifestFetcher) -> Self {
        self.manifest = manifest;
        self
    }

    /// Archives located assets before each reconciliation.
    pub fn with_archive(mut self, archive: AssetArchive) -> Self {
        self.archive = Some(archive);
        self
    }

    /// Checks the bundle served at `base_url` against the manifest at
    /// `manifest_url`.
    ///
    /// Missing assets, missing manifest data and timestamp mismatches all
    /// produce an unsafe verdict with a reason.
    ///
    /// # Errors
    ///
    /// Only `GuardError::RetryExhausted` from the manifest load propagates.
    pub async fn reconcile(&self, base_url: &str, manifest_url: &str) -> Result<Verdict, GuardError> {
        let assets = match self.locator.locate_assets(base_url).await {
            Some(assets) if !assets.is_empty() => assets,
            _ => {
                warn!("No JavaScript files found on {}", base_url);
                return Ok(Verdict::unsafe_because(UnsafeReason::NoAssetsFound));
            }
        };

        if let Some(archive) = &self.archive {
            if let Err(e) = archive.save_js_files(base_url, &assets).await {
                error!(
                    "Failed to archive JavaScript files to {}: {:#}",
                    archive.dir().display(),
                    e
                );
            }
        }

        let manifest = self.manifest.load_manifest(manifest_url).await?;
        if manifest.is_empty() {
            warn!("No expected JavaScript file data available from {}", manifest_url);
            return Ok(Verdict::unsafe_because(UnsafeReason::NoManifestData));
        }

        for entry in manifest.iter() {
            let Some(path) = find_matching_asset(&assets, &entry.file_id) else {
                warn!(
                    "Expected file {} not found in JavaScript paths",
                    entry.file_id
                );
                info!("JavaScript files changed. New files: {:?}", assets);
                return Ok(Verdict::unsafe_because(
                    UnsafeReason::ExpectedFileNotFound {
                        file_id: entry.file_id.clone(),
                        located: assets.clone(),
                    },
                ));
            };

            let asset_url = join_asset_url(base_url, path);
            let record = AssetRecord {
                path: path.clone(),
                observed: self.prober.probe_last_modified(&asset_url).await,
            };

            if is_timestamp_mismatch(entry.expected, record.observed) {
                warn!(
                    "Mismatch for file {}: expected {}, got {}",
                    entry.file_id,
                    entry.expected,
                    record
                        .observed
                        .map(|t| t.to_string())
                        .unwrap_or_else(|| "none".to_string())
                );
                return Ok(Verdict::unsafe_because(UnsafeReason::TimestampMismatch {
                    file_id: entry.file_id.clone(),
                    expected: entry.expected,
                    record,
                }));
            }
            debug!("{} matches manifest entry {}", record.path, entry.file_id);
        }

        info!("🛡️ Bot is safe to run ✅");
        Ok(Verdict::safe())
    }
}
