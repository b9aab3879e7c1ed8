//! HTTP header sets.
//!
//! Two distinct header sets are used: the WebView impersonation set for the
//! entry page and its assets, and a plain browser set for the manifest.

/// Accept header shared by both header sets
pub const ACCEPT_DOCUMENT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7";

/// Headers sent with every page and asset request (besides User-Agent).
///
/// These reproduce what the Telegram Android WebView sends when it opens the
/// mini app, so the site serves the same bundle a real client would get.
pub const PAGE_HEADERS: &[(&str, &str)] = &[
    ("accept", ACCEPT_DOCUMENT),
    (
        "sec-ch-ua",
        "\"Android WebView\";v=\"131\", \"Chromium\";v=\"131\", \"Not_A Brand\";v=\"24\"",
    ),
    ("sec-ch-ua-mobile", "?1"),
    ("sec-ch-ua-platform", "\"Android\""),
    ("upgrade-insecure-requests", "1"),
    ("x-requested-with", "org.telegram.messenger"),
    ("sec-fetch-site", "none"),
    ("sec-fetch-mode", "navigate"),
    ("sec-fetch-user", "?1"),
    ("sec-fetch-dest", "document"),
    ("accept-language", "en,en-US;q=0.9,bn-BD;q=0.8,bn;q=0.7"),
    ("priority", "u=0, i"),
];

/// Headers overriding the page set when fetching the manifest.
pub const MANIFEST_HEADERS: &[(&str, &str)] = &[
    ("user-agent", crate::config::MANIFEST_USER_AGENT),
    ("accept", ACCEPT_DOCUMENT),
];
