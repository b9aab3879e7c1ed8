//! Error type definitions.
//!
//! This module defines all error types used throughout the application.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::{Display, EnumIter};
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// A configured header name or value is not valid HTTP.
    #[error("Invalid HTTP header: {0}")]
    InvalidHeaderError(String),
}

/// Error types for configuration validation.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A URL setting is unparseable or not http(s).
    #[error("Invalid {setting} '{value}': {reason}")]
    InvalidUrl {
        /// Name of the offending setting
        setting: &'static str,
        /// The rejected value
        value: String,
        /// Why it was rejected
        reason: String,
    },
}

/// Failures while decoding the manifest document.
///
/// These are never retried: the manifest loader logs them and returns an
/// empty manifest.
#[derive(Error, Debug)]
pub enum ManifestParseError {
    /// The body is not JSON or lacks `tomarket.index`.
    #[error("malformed manifest document: {0}")]
    Json(#[from] serde_json::Error),

    /// An index entry is not of the form `<id>|<timestamp>`.
    #[error("manifest entry '{0}' lacks the '|' separator")]
    MissingSeparator(String),

    /// The timestamp half of an entry is not `YYYY-MM-DD HH:MM:SS`.
    #[error("manifest entry '{entry}' has an unparseable timestamp: {source}")]
    BadTimestamp {
        /// The raw entry
        entry: String,
        /// Underlying chrono error
        #[source]
        source: chrono::ParseError,
    },
}

/// Classes of transport failure reported by the HTTP client.
///
/// TLS handshake failures surface from reqwest as connect errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
#[strum(serialize_all = "snake_case")]
pub enum TransportKind {
    /// The request could not be built (bad URL, bad header)
    Builder,
    /// Redirect policy violation
    Redirect,
    /// The server answered with a non-2xx status
    Status,
    /// The request timed out
    Timeout,
    /// Generic request failure
    Request,
    /// TCP/TLS connection failure
    Connect,
    /// Failure reading the response body
    Body,
    /// Failure decoding the response body
    Decode,
    /// Anything else
    Other,
}

/// Errors raised by the detection pipeline.
#[derive(Error, Debug)]
pub enum GuardError {
    /// Timeout, connection, TLS, HTTP status or generic request failure.
    #[error("request to {url} failed ({kind}): {source}")]
    Transport {
        /// Requested URL
        url: String,
        /// Failure class
        kind: TransportKind,
        /// Underlying reqwest error
        #[source]
        source: ReqwestError,
    },

    /// The manifest document could not be decoded.
    #[error("invalid manifest: {0}")]
    Parse(#[from] ManifestParseError),

    /// Every manifest attempt failed with a transport error.
    #[error("gave up on {url} after {attempts} attempts: {source}")]
    RetryExhausted {
        /// Manifest URL
        url: String,
        /// Attempts made
        attempts: u32,
        /// Last transport error
        #[source]
        source: Box<GuardError>,
    },
}

impl GuardError {
    /// Wraps a reqwest error for `url`, classifying it.
    pub fn transport(url: &str, source: ReqwestError) -> Self {
        GuardError::Transport {
            url: url.to_string(),
            kind: super::categorize_reqwest_error(&source),
            source,
        }
    }

    /// Returns true for failures the manifest loader retries.
    pub fn is_transport(&self) -> bool {
        matches!(self, GuardError::Transport { .. })
    }

    /// HTTP status code carried by a status failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            GuardError::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            GuardError::RetryExhausted { source, .. } => source.status(),
            GuardError::Parse(_) => None,
        }
    }
}
