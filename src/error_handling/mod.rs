//! Error handling.
//!
//! This module provides:
//! - Error type definitions for initialization, configuration, manifest parsing
//!   and the detection pipeline
//! - Categorization of reqwest transport errors
//! - The manifest retry schedule
//!
//! Transport errors are retried by the manifest loader and treated as "could
//! not verify" everywhere else. Parse errors are never retried.

mod categorization;
mod types;

// Re-export public API
pub use categorization::{categorize_reqwest_error, manifest_retry_schedule};
pub use types::{
    ConfigError, GuardError, InitializationError, ManifestParseError, TransportKind,
};
