//! HTTP request header construction.
//!
//! Converts the static header sets from `config` into `reqwest` header maps.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error_handling::InitializationError;

/// Builds a `HeaderMap` from `(name, value)` pairs.
///
/// Later pairs replace earlier ones with the same name.
///
/// # Errors
///
/// Returns `InitializationError::InvalidHeaderError` if a name or value is
/// not valid HTTP.
pub(crate) fn header_map(pairs: &[(&str, &str)]) -> Result<HeaderMap, InitializationError> {
    let mut headers = HeaderMap::with_capacity(pairs.len());
    for &(name, value) in pairs {
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            InitializationError::InvalidHeaderError(format!("name '{}': {}", name, e))
        })?;
        let header_value = HeaderValue::from_str(value).map_err(|e| {
            InitializationError::InvalidHeaderError(format!("value for '{}': {}", name, e))
        })?;
        headers.insert(header_name, header_value);
    }
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MANIFEST_HEADERS, MANIFEST_USER_AGENT, PAGE_HEADERS};

    #[test]
    fn test_page_headers_are_valid() {
        let headers = header_map(PAGE_HEADERS).expect("page headers should be valid");
        assert_eq!(headers.len(), PAGE_HEADERS.len());
        assert_eq!(
            headers.get("x-requested-with").and_then(|v| v.to_str().ok()),
            Some("org.telegram.messenger")
        );
        assert!(headers.get(reqwest::header::USER_AGENT).is_none());
    }

    #[test]
    fn test_manifest_headers_override_user_agent() {
        let headers = header_map(MANIFEST_HEADERS).expect("manifest headers should be valid");
        assert_eq!(
            headers
                .get(reqwest::header::USER_AGENT)
                .and_then(|v| v.to_str().ok()),
            Some(MANIFEST_USER_AGENT)
        );
        assert!(headers.get("x-requested-with").is_none());
    }

    #[test]
    fn test_invalid_header_name() {
        let result = header_map(&[("bad header", "x")]);
        assert!(matches!(
            result,
            Err(InitializationError::InvalidHeaderError(msg)) if msg.contains("bad header")
        ));
    }

    #[test]
    fn test_invalid_header_value() {
        let result = header_map(&[("x-test", "line\nbreak")]);
        assert!(matches!(
            result,
            Err(InitializationError::InvalidHeaderError(msg)) if msg.contains("x-test")
        ));
    }
}
