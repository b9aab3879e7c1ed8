//! safe_guard library: web app bundle change detection
//!
//! This library decides whether a bot built against a web app's client-side
//! API is still safe to run. It fetches the app's entry page, locates the
//! JavaScript bundles it references, and reconciles them against a published
//! manifest of expected files and modification times. Any missing file or
//! changed timestamp yields an unsafe verdict.
//!
//! # Example
//!
//! ```no_run
//! use safe_guard::initialization::init_client;
//! use safe_guard::{check_base_url, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let client = init_client(&config)?;
//!
//! if !check_base_url(&config, client).await? {
//!     eprintln!("Bundle changed, halting automation");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime.

#![warn(missing_docs)]

pub mod cache;
pub mod config;
pub mod detection;
pub mod error_handling;
pub mod fetch;
pub mod initialization;
pub mod models;
pub mod parse;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use detection::{check_base_url, LegacyCheck, ManifestFetcher, Reconciler};
pub use error_handling::GuardError;
pub use fetch::HttpClient;
pub use models::{AssetRecord, ManifestEntry, UnsafeReason, Verdict};
