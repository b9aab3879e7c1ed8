//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration. Every option can also be supplied through the environment
//! (or a `.env` file loaded by the binary).

use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser, ValueEnum};

use crate::config::constants::{
    BASE_API, BASE_PAGE_URL, DEFAULT_JS_ARCHIVE_DIR, DEFAULT_JS_ARCHIVE_MAX_FILES,
    DEFAULT_USER_AGENT, DETECTION_CONFIG_URL, MANIFEST_MAX_RETRIES, MANIFEST_RETRY_DELAY_SECS,
};
use crate::error_handling::ConfigError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Bundle check configuration.
///
/// Can be parsed from the command line (`Config::parse()`) or constructed
/// programmatically.
///
/// # Examples
///
/// ```no_run
/// use safe_guard::Config;
///
/// let config = Config {
///     advanced_detection: false,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(name = "safe_guard", version, about)]
pub struct Config {
    /// Entry page of the watched web app
    #[arg(long, env = "GUARD_BASE_URL", default_value = BASE_PAGE_URL)]
    pub base_url: String,

    /// URL of the expected-file manifest
    #[arg(long, env = "GUARD_MANIFEST_URL", default_value = DETECTION_CONFIG_URL)]
    pub manifest_url: String,

    /// Known-good API base used by the legacy check
    #[arg(long, env = "GUARD_API_BASE", default_value = BASE_API)]
    pub api_base: String,

    /// Use manifest-based detection instead of the legacy API base comparison
    #[arg(
        long,
        env = "ADVANCED_ANTI_DETECTION",
        default_value_t = true,
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    pub advanced_detection: bool,

    /// Archive located JavaScript assets to disk
    #[arg(
        long,
        env = "SAVE_JS_FILES",
        default_value_t = false,
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    pub save_js_files: bool,

    /// Directory receiving archived assets
    #[arg(long, env = "GUARD_JS_ARCHIVE_DIR", default_value = DEFAULT_JS_ARCHIVE_DIR)]
    pub js_archive_dir: PathBuf,

    /// Number of archived assets kept after pruning
    #[arg(long, env = "GUARD_JS_ARCHIVE_MAX_FILES", default_value_t = DEFAULT_JS_ARCHIVE_MAX_FILES)]
    pub js_archive_max_files: usize,

    /// Manifest fetch attempts before giving up
    #[arg(long, default_value_t = MANIFEST_MAX_RETRIES)]
    pub manifest_max_retries: u32,

    /// Initial delay between manifest attempts in seconds (doubles each retry)
    #[arg(long, default_value_t = MANIFEST_RETRY_DELAY_SECS)]
    pub manifest_retry_delay_secs: u64,

    /// Per-request timeout in seconds (no timeout when unset)
    #[arg(long, env = "GUARD_TIMEOUT_SECONDS")]
    pub timeout_seconds: Option<u64>,

    /// HTTP User-Agent header value for page and asset requests
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Label prefixed to top-level log lines
    #[arg(long, env = "GUARD_SESSION_NAME", default_value = "safe_guard")]
    pub session_name: String,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain")]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: BASE_PAGE_URL.to_string(),
            manifest_url: DETECTION_CONFIG_URL.to_string(),
            api_base: BASE_API.to_string(),
            advanced_detection: true,
            save_js_files: false,
            js_archive_dir: PathBuf::from(DEFAULT_JS_ARCHIVE_DIR),
            js_archive_max_files: DEFAULT_JS_ARCHIVE_MAX_FILES,
            manifest_max_retries: MANIFEST_MAX_RETRIES,
            manifest_retry_delay_secs: MANIFEST_RETRY_DELAY_SECS,
            timeout_seconds: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            session_name: "safe_guard".to_string(),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

impl Config {
    /// Checks that the page and manifest URLs are absolute http(s) URLs.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` naming the offending setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_http_url("base_url", &self.base_url)?;
        validate_http_url("manifest_url", &self.manifest_url)?;
        Ok(())
    }
}

fn validate_http_url(setting: &'static str, value: &str) -> Result<(), ConfigError> {
    let parsed = url::Url::parse(value).map_err(|e| ConfigError::InvalidUrl {
        setting,
        value: value.to_string(),
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::InvalidUrl {
            setting,
            value: value.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_default_config_matches_published_endpoints() {
        let config = Config::default();
        assert_eq!(config.base_url, BASE_PAGE_URL);
        assert_eq!(config.manifest_url, DETECTION_CONFIG_URL);
        assert_eq!(config.api_base, BASE_API);
        assert!(config.advanced_detection);
        assert!(!config.save_js_files);
        assert_eq!(config.manifest_max_retries, 5);
        assert_eq!(config.manifest_retry_delay_secs, 3);
        assert!(config.timeout_seconds.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_boolean_flags() {
        let config = Config::try_parse_from([
            "safe_guard",
            "--advanced-detection",
            "false",
            "--save-js-files",
            "yes",
        ])
        .expect("flags should parse");
        assert!(!config.advanced_detection);
        assert!(config.save_js_files);
    }

    #[test]
    fn test_parse_overrides_urls() {
        let config = Config::try_parse_from([
            "safe_guard",
            "--base-url",
            "http://localhost:8080/",
            "--manifest-url",
            "http://localhost:8080/detect.json",
            "--timeout-seconds",
            "15",
        ])
        .expect("flags should parse");
        assert_eq!(config.base_url, "http://localhost:8080/");
        assert_eq!(config.manifest_url, "http://localhost:8080/detect.json");
        assert_eq!(config.timeout_seconds, Some(15));
    }

    #[test]
    fn test_validate_rejects_bad_urls() {
        let config = Config {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        match config.validate() {
            Err(ConfigError::InvalidUrl { setting, .. }) => assert_eq!(setting, "base_url"),
            other => panic!("expected InvalidUrl, got {:?}", other),
        }

        let config = Config {
            manifest_url: "ftp://example.com/detect.json".to_string(),
            ..Default::default()
        };
        match config.validate() {
            Err(ConfigError::InvalidUrl { setting, reason, .. }) => {
                assert_eq!(setting, "manifest_url");
                assert!(reason.contains("ftp"));
            }
            other => panic!("expected InvalidUrl, got {:?}", other),
        }
    }
}
