//! Text and timestamp parsing.
//!
//! This module provides:
//! - Asset path extraction from the entry page
//! - API base extraction from bundle contents (legacy check)
//! - Manifest and `Last-Modified` timestamp parsing and comparison

mod patterns;
mod timestamps;

// Re-export public API
pub use patterns::{extract_api_base, extract_asset_paths};
pub use timestamps::{
    format_archive_timestamp, is_timestamp_mismatch, parse_last_modified,
    parse_manifest_timestamp,
};
