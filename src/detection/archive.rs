//! On-disk archive of located JavaScript assets.
//!
//! Archived files are named after the asset with its `Last-Modified` time
//! appended, so each bundle revision lands in its own file. Only the most
//! recently modified files are kept.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use log::{debug, info, warn};
use reqwest::header::LAST_MODIFIED;
use reqwest::StatusCode;
use tokio::fs;

use crate::config::Config;
use crate::fetch::{join_asset_url, HttpClient};
use crate::models::AssetPath;
use crate::parse::format_archive_timestamp;

/// Downloads located assets into a bounded directory.
#[derive(Debug, Clone)]
pub struct AssetArchive {
    client: Arc<HttpClient>,
    dir: PathBuf,
    max_files: usize,
}

impl AssetArchive {
    /// Creates an archive writing to `dir` and keeping at most `max_files`
    /// `.js` files.
    pub fn new(client: Arc<HttpClient>, dir: impl Into<PathBuf>, max_files: usize) -> Self {
        Self {
            client,
            dir: dir.into(),
            max_files,
        }
    }

    /// Creates an archive from the `js_archive_*` settings.
    pub fn from_config(client: Arc<HttpClient>, config: &Config) -> Self {
        Self::new(
            client,
            config.js_archive_dir.clone(),
            config.js_archive_max_files,
        )
    }

    /// Archive directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Downloads every asset in `paths` and prunes the directory.
    ///
    /// Individual download failures are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created, listed or pruned.
    pub async fn save_js_files(&self, base_url: &str, paths: &[AssetPath]) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("Failed to create archive directory {}", self.dir.display()))?;

        for path in paths {
            let url = join_asset_url(base_url, path);
            if let Err(e) = self.download_asset(&url).await {
                warn!("Failed to archive {}: {:#}", url, e);
            }
        }

        self.prune_old_files().await?;
        Ok(())
    }

    /// Downloads `url` into the archive unless that revision is already there.
    ///
    /// Returns the path written, or `None` when the download was skipped.
    pub async fn download_asset(&self, url: &str) -> Result<Option<PathBuf>> {
        let response = self.client.get(url).await?;
        if response.status() != StatusCode::OK {
            warn!(
                "Failed to download {}, status code: {}",
                url,
                response.status()
            );
            return Ok(None);
        }

        let suffix = response
            .headers()
            .get(LAST_MODIFIED)
            .and_then(|v| v.to_str().ok())
            .and_then(format_archive_timestamp);
        let save_path = self.dir.join(archive_file_name(url, suffix.as_deref()));

        if fs::try_exists(&save_path).await? {
            debug!("{} already archived as {}", url, save_path.display());
            return Ok(None);
        }

        let body = response
            .text()
            .await
            .with_context(|| format!("Failed to read body of {}", url))?;
        fs::write(&save_path, body)
            .await
            .with_context(|| format!("Failed to write {}", save_path.display()))?;
        info!("📦 Saved {} as {}", url, save_path.display());
        Ok(Some(save_path))
    }

    /// Deletes the oldest `.js` files until at most `max_files` remain.
    ///
    /// Returns the deleted paths.
    pub async fn prune_old_files(&self) -> Result<Vec<PathBuf>> {
        let mut entries = fs::read_dir(&self.dir)
            .await
            .with_context(|| format!("Failed to list {}", self.dir.display()))?;

        let mut js_files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "js") {
                let modified = entry.metadata().await?.modified()?;
                js_files.push((modified, path));
            }
        }

        if js_files.len() <= self.max_files {
            return Ok(Vec::new());
        }

        js_files.sort_by_key(|(modified, _)| *modified);
        let excess = js_files.len() - self.max_files;
        let mut deleted = Vec::with_capacity(excess);
        for (_, path) in js_files.into_iter().take(excess) {
            fs::remove_file(&path)
                .await
                .with_context(|| format!("Failed to delete {}", path.display()))?;
            info!("Deleted old file: {}", path.display());
            deleted.push(path);
        }
        Ok(deleted)
    }
}

/// `app.abc.js` + `2024-01-01_00-00-00` -> `app.abc_2024-01-01_00-00-00.js`
fn archive_file_name(url: &str, suffix: Option<&str>) -> String {
    let file_name = url.rsplit('/').next().unwrap_or(url);
    let Some(suffix) = suffix else {
        return file_name.to_string();
    };
    let path = Path::new(file_name);
    match (path.file_stem(), path.extension()) {
        (Some(stem), Some(ext)) => format!(
            "{}_{}.{}",
            stem.to_string_lossy(),
            suffix,
            ext.to_string_lossy()
        ),
        _ => format!("{}_{}", file_name, suffix),
    }
}
