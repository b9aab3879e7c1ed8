//! Data types shared by the detection pipeline.

use std::fmt;

use chrono::NaiveDateTime;

/// Path fragment of a JavaScript asset as referenced by the entry page,
/// e.g. `/assets/index-abc123.js`.
pub type AssetPath = String;

/// One expected file from the published manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Substring identifying the asset path (e.g. `index-abc123`)
    pub file_id: String,
    /// Expected `Last-Modified` time, second precision
    pub expected: NaiveDateTime,
}

/// A located asset together with its probed modification time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRecord {
    /// Path as found in the entry page
    pub path: AssetPath,
    /// `Last-Modified` reported by the server, if it could be read
    pub observed: Option<NaiveDateTime>,
}

/// Why a reconciliation pass declared the bundle unsafe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnsafeReason {
    /// The entry page could not be fetched or referenced no assets.
    NoAssetsFound,
    /// The manifest was empty or could not be decoded.
    NoManifestData,
    /// No located asset path contains the manifest identifier.
    ExpectedFileNotFound {
        /// Missing manifest identifier
        file_id: String,
        /// Asset paths the page referenced instead
        located: Vec<AssetPath>,
    },
    /// The asset exists but its modification time differs.
    TimestampMismatch {
        /// Manifest identifier
        file_id: String,
        /// Expected time from the manifest
        expected: NaiveDateTime,
        /// The probed asset
        record: AssetRecord,
    },
}

impl fmt::Display for UnsafeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnsafeReason::NoAssetsFound => write!(f, "no assets found"),
            UnsafeReason::NoManifestData => write!(f, "no manifest data"),
            UnsafeReason::ExpectedFileNotFound { file_id, located } => write!(
                f,
                "expected file not found: {} (located: {:?})",
                file_id, located
            ),
            UnsafeReason::TimestampMismatch {
                file_id,
                expected,
                record,
            } => match record.observed {
                Some(actual) => write!(
                    f,
                    "timestamp mismatch for {}: expected {}, got {}",
                    file_id, expected, actual
                ),
                None => write!(
                    f,
                    "timestamp mismatch for {}: expected {}, got none",
                    file_id, expected
                ),
            },
        }
    }
}

/// Outcome of a bundle check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    reason: Option<UnsafeReason>,
}

impl Verdict {
    /// Every manifest entry matched.
    pub fn safe() -> Self {
        Self { reason: None }
    }

    /// The bundle changed, or could not be verified.
    pub fn unsafe_because(reason: UnsafeReason) -> Self {
        Self {
            reason: Some(reason),
        }
    }

    /// Whether the bot may keep running.
    pub fn is_safe(&self) -> bool {
        self.reason.is_none()
    }

    /// Diagnostic detail for unsafe verdicts.
    pub fn reason(&self) -> Option<&UnsafeReason> {
        self.reason.as_ref()
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            None => write!(f, "safe"),
            Some(reason) => write!(f, "unsafe: {}", reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn jan_first(second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, second))
            .expect("valid date")
    }

    #[test]
    fn test_safe_verdict_has_no_reason() {
        let verdict = Verdict::safe();
        assert!(verdict.is_safe());
        assert!(verdict.reason().is_none());
        assert_eq!(verdict.to_string(), "safe");
    }

    #[test]
    fn test_reason_messages() {
        assert_eq!(UnsafeReason::NoAssetsFound.to_string(), "no assets found");
        assert_eq!(UnsafeReason::NoManifestData.to_string(), "no manifest data");

        let missing = UnsafeReason::ExpectedFileNotFound {
            file_id: "index-abc".to_string(),
            located: vec!["/assets/index-def.js".to_string()],
        };
        let text = missing.to_string();
        assert!(text.contains("expected file not found"));
        assert!(text.contains("index-abc"));
        assert!(text.contains("/assets/index-def.js"));
    }

    #[test]
    fn test_mismatch_message_shows_both_times() {
        let reason = UnsafeReason::TimestampMismatch {
            file_id: "app.abc123".to_string(),
            expected: jan_first(0),
            record: AssetRecord {
                path: "/assets/app.abc123.js".to_string(),
                observed: Some(jan_first(1)),
            },
        };
        let verdict = Verdict::unsafe_because(reason);
        assert!(!verdict.is_safe());
        let text = verdict.to_string();
        assert!(text.contains("timestamp mismatch"));
        assert!(text.contains("app.abc123"));
        assert!(text.contains("2024-01-01 00:00:00"));
        assert!(text.contains("2024-01-01 00:00:01"));
    }

    #[test]
    fn test_mismatch_message_without_observed_time() {
        let reason = UnsafeReason::TimestampMismatch {
            file_id: "app.abc123".to_string(),
            expected: jan_first(0),
            record: AssetRecord {
                path: "/assets/app.abc123.js".to_string(),
                observed: None,
            },
        };
        assert!(reason.to_string().ends_with("got none"));
    }
}
