//! Configuration constants.
//!
//! This module defines the URLs, timing parameters and formats used by the
//! bundle integrity check.

use std::time::Duration;

/// Entry page of the mini app whose bundle is being watched.
pub const BASE_PAGE_URL: &str = "https://mini-app.tomarket.ai/";

/// Published manifest of expected asset files and their modification times.
pub const DETECTION_CONFIG_URL: &str =
    "https://raw.githubusercontent.com/khondokerXhasan/bin/refs/heads/main/detect.json";

/// API base the bot was built against.
///
/// The legacy check compares the `online:"..."` value found in the bundle
/// against this constant.
pub const BASE_API: &str = "https://api-web.tomarket.ai/tomarket-game/v1";

/// How long a parsed manifest stays fresh in the process-wide cache (45 minutes).
pub const MANIFEST_CACHE_TTL: Duration = Duration::from_secs(2700);

// Manifest retry policy
/// Total manifest fetch attempts before the transport error is propagated
pub const MANIFEST_MAX_RETRIES: u32 = 5;
/// Delay before the first manifest retry, in seconds (doubles after each failure)
pub const MANIFEST_RETRY_DELAY_SECS: u64 = 3;

// Timestamp formats
/// Format of the timestamp half of a manifest entry (`<id>|<timestamp>`)
pub const MANIFEST_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Format of the `Last-Modified` response header after the `<weekday>, ` prefix
pub const LAST_MODIFIED_FORMAT: &str = "%d %b %Y %H:%M:%S %Z";
/// Suffix format used when naming archived asset files
pub const ARCHIVE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Number of characters of the entry page dumped when no assets are found
pub const PAGE_DUMP_CHARS: usize = 1000;

// Asset archive
/// Default directory for archived JavaScript assets
pub const DEFAULT_JS_ARCHIVE_DIR: &str = "downloaded_js_files";
/// Number of archived `.js` files kept after pruning
pub const DEFAULT_JS_ARCHIVE_MAX_FILES: usize = 10;

/// Default User-Agent string for HTTP requests.
///
/// Mimics the Telegram Android WebView the mini app normally runs in.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Linux; Android 9; Samsung SM-G892A) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/118.0.5993.156 Mobile Safari/537.36 Telegram-Android/11.3.4 (Samsung SM-G892A; Android 9; SDK 28; AVERAGE)";

/// User-Agent presented when fetching the manifest (generic mobile Chrome)
pub const MANIFEST_USER_AGENT: &str = "Mozilla/5.0 (Linux; Android 10; K) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/129.0.0.0 Mobile Safari/537.36";
