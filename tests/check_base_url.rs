//! Top-level entry point selecting the advanced or legacy check.

mod helpers;

use httptest::{matchers::*, responders::*, Expectation, Server};

use helpers::{manifest_body, page_with_assets, test_client, JAN_FIRST_HTTP};
use safe_guard::{check_base_url, Config, GuardError};

// The process-wide manifest cache is keyed by URL, so each test uses its own
// manifest path to stay independent of port reuse.
fn config_for(server: &Server, manifest_path: &str, advanced: bool) -> Config {
    Config {
        base_url: server.url_str("/"),
        manifest_url: server.url_str(manifest_path),
        api_base: "https://api-web.tomarket.ai/tomarket-game/v1".to_string(),
        advanced_detection: advanced,
        manifest_retry_delay_secs: 0,
        ..Config::default()
    }
}

#[tokio::test]
async fn test_advanced_mode_uses_manifest() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/")).respond_with(
            status_code(200).body(page_with_assets(&["/assets/index-a1.js"])),
        ),
    );
    server.expect(
        Expectation::matching(request::method_path("HEAD", "/assets/index-a1.js"))
            .respond_with(status_code(200).insert_header("Last-Modified", JAN_FIRST_HTTP)),
    );
    server.expect(
        Expectation::matching(request::method_path("GET", "/detect-advanced.json")).respond_with(
            status_code(200).body(manifest_body(&["index-a1|2024-01-01 00:00:00"])),
        ),
    );

    let safe = check_base_url(&config_for(&server, "/detect-advanced.json", true), test_client())
        .await
        .expect("check");
    assert!(safe);
}

#[tokio::test]
async fn test_advanced_mode_propagates_retry_exhaustion() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/")).respond_with(
            status_code(200).body(page_with_assets(&["/assets/index-a1.js"])),
        ),
    );
    server.expect(
        Expectation::matching(request::method_path("GET", "/detect-exhausted.json"))
            .times(2)
            .respond_with(status_code(502)),
    );

    let config = Config {
        manifest_max_retries: 2,
        ..config_for(&server, "/detect-exhausted.json", true)
    };
    let result = check_base_url(&config, test_client()).await;
    assert!(matches!(
        result,
        Err(GuardError::RetryExhausted { attempts: 2, .. })
    ));
}

#[tokio::test]
async fn test_legacy_mode_never_requests_manifest() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/")).respond_with(
            status_code(200).body(page_with_assets(&["/assets/index-a1.js"])),
        ),
    );
    server.expect(
        Expectation::matching(request::method_path("GET", "/assets/index-a1.js")).respond_with(
            status_code(200)
                .body(r#"var c={online:"https://api-web.tomarket.ai/tomarket-game/v1"};"#),
        ),
    );
    server.expect(
        Expectation::matching(request::method_path("GET", "/detect-legacy.json"))
            .times(0)
            .respond_with(status_code(200)),
    );

    let safe = check_base_url(&config_for(&server, "/detect-legacy.json", false), test_client())
        .await
        .expect("legacy check never errors");
    assert!(safe);
}
