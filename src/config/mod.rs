//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (URLs, cache TTL, retry policy, formats)
//! - HTTP header sets for page and manifest requests
//! - CLI option types and parsing

mod constants;
mod headers;
mod types;

// Re-export all constants
pub use constants::*;
pub use headers::*;
pub use types::{Config, LogFormat, LogLevel};
