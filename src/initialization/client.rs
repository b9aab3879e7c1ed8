//! HTTP client initialization.

use std::sync::Arc;
use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::{Config, MANIFEST_HEADERS, PAGE_HEADERS};
use crate::error_handling::InitializationError;
use crate::fetch::request::header_map;
use crate::fetch::HttpClient;

/// Initializes the shared HTTP client.
///
/// Creates a `reqwest::Client` configured with:
/// - The WebView impersonation headers as default headers
/// - User-Agent from the configuration
/// - Timeout from the configuration (none when unset)
///
/// # Errors
///
/// Returns an `InitializationError` if a header is invalid or client
/// creation fails.
pub fn init_client(config: &Config) -> Result<Arc<HttpClient>, InitializationError> {
    let mut builder = ClientBuilder::new()
        .default_headers(header_map(PAGE_HEADERS)?)
        .user_agent(config.user_agent.clone());
    if let Some(secs) = config.timeout_seconds {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    let inner = builder.build()?;
    Ok(Arc::new(HttpClient::new(inner, header_map(MANIFEST_HEADERS)?)))
}
