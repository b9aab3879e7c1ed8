//! Shared HTTP client.
//!
//! One `HttpClient` is built at startup and injected into every component.
//! Page and asset requests carry the client's default (WebView) headers; the
//! manifest request overrides them with its own set.

use reqwest::header::HeaderMap;
use reqwest::{RequestBuilder, Response};

use crate::error_handling::GuardError;

/// HTTP client used by the detection pipeline.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
    manifest_headers: HeaderMap,
}

impl HttpClient {
    /// Wraps a configured `reqwest::Client`.
    ///
    /// `manifest_headers` are sent on top of the client's defaults when the
    /// manifest is fetched.
    pub fn new(inner: reqwest::Client, manifest_headers: HeaderMap) -> Self {
        Self {
            inner,
            manifest_headers,
        }
    }

    /// GETs `url` and returns the body text.
    ///
    /// # Errors
    ///
    /// `GuardError::Transport` on connection failure, non-2xx status or
    /// unreadable body.
    pub async fn get_page(&self, url: &str) -> Result<String, GuardError> {
        let response = send_checked(self.inner.get(url), url).await?;
        response
            .text()
            .await
            .map_err(|e| GuardError::transport(url, e))
    }

    /// GETs the manifest at `url` with the manifest header set.
    ///
    /// # Errors
    ///
    /// Same as [`HttpClient::get_page`].
    pub async fn get_manifest(&self, url: &str) -> Result<String, GuardError> {
        let builder = self.inner.get(url).headers(self.manifest_headers.clone());
        let response = send_checked(builder, url).await?;
        response
            .text()
            .await
            .map_err(|e| GuardError::transport(url, e))
    }

    /// Issues a HEAD request and returns the response headers.
    ///
    /// # Errors
    ///
    /// `GuardError::Transport` on connection failure or non-2xx status.
    pub async fn head(&self, url: &str) -> Result<HeaderMap, GuardError> {
        let response = send_checked(self.inner.head(url), url).await?;
        Ok(response.headers().clone())
    }

    /// GETs `url` without checking the status code.
    ///
    /// # Errors
    ///
    /// `GuardError::Transport` if no response was received.
    pub async fn get(&self, url: &str) -> Result<Response, GuardError> {
        self.inner
            .get(url)
            .send()
            .await
            .map_err(|e| GuardError::transport(url, e))
    }
}

async fn send_checked(builder: RequestBuilder, url: &str) -> Result<Response, GuardError> {
    builder
        .send()
        .await
        .and_then(Response::error_for_status)
        .map_err(|e| GuardError::transport(url, e))
}
