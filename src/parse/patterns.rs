//! Text pattern extraction.
//!
//! The entry page and the bundles are scanned with plain regular expressions;
//! no HTML or JavaScript parsing is attempted.

use regex::Regex;
use std::sync::LazyLock;

use crate::models::AssetPath;

// Quoted asset reference: "/assets/<anything but quotes>.js"
const ASSET_PATH_PATTERN: &str = r#""(/assets/[^"]+\.js)""#;
// API base assigned to the `online` key inside a bundle
const API_BASE_PATTERN: &str = r#"online:"(https?://[^"]+)""#;

/// Compiles a static regex pattern, panicking with a detailed error message
/// if compilation fails. Only used for compile-time constant patterns.
fn compile_regex_unsafe(pattern: &str, context: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| {
        panic!(
            "Failed to compile regex pattern '{}' in {}: {}. This is a programming error.",
            pattern, context, e
        )
    })
}

static ASSET_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(ASSET_PATH_PATTERN, "ASSET_PATH_RE"));
static API_BASE_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(API_BASE_PATTERN, "API_BASE_RE"));

/// Extracts every quoted `/assets/*.js` path from `text`.
///
/// Paths are returned in order of appearance. Duplicates are kept.
pub fn extract_asset_paths(text: &str) -> Vec<AssetPath> {
    ASSET_PATH_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Returns the first `online:"<url>"` value found in `text`.
pub fn extract_api_base(text: &str) -> Option<String> {
    API_BASE_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
