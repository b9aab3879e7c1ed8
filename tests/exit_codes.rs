//! Exit codes of the `safe_guard` binary (0 safe, 2 unsafe, 1 error).

mod helpers;

use std::path::Path;
use std::process::{Command, Output};

use httptest::{matchers::*, responders::*, Expectation, Server};
use tempfile::TempDir;

use helpers::{manifest_body, page_with_assets, JAN_FIRST_HTTP, JAN_FIRST_PLUS_ONE_HTTP};

fn run_guard(args: &[&str]) -> Output {
    run_guard_in(Path::new(env!("CARGO_MANIFEST_DIR")), args)
}

fn run_guard_in(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_safe_guard"))
        .current_dir(dir)
        .args(args)
        .env_remove("ADVANCED_ANTI_DETECTION")
        .env_remove("SAVE_JS_FILES")
        .env_remove("GUARD_BASE_URL")
        .env_remove("GUARD_MANIFEST_URL")
        .env("RUST_LOG", "error")
        .output()
        .expect("Failed to run safe_guard binary")
}

fn serve_bundle(server: &Server, last_modified: &'static str) {
    server.expect(
        Expectation::matching(request::method_path("GET", "/")).respond_with(
            status_code(200).body(page_with_assets(&["/assets/index-a1.js"])),
        ),
    );
    server.expect(
        Expectation::matching(request::method_path("HEAD", "/assets/index-a1.js"))
            .respond_with(status_code(200).insert_header("Last-Modified", last_modified)),
    );
    server.expect(
        Expectation::matching(request::method_path("GET", "/detect.json")).respond_with(
            status_code(200).body(manifest_body(&["index-a1|2024-01-01 00:00:00"])),
        ),
    );
}

#[test]
fn test_unchanged_bundle_exits_zero() {
    let server = Server::run();
    serve_bundle(&server, JAN_FIRST_HTTP);

    let output = run_guard(&[
        "--base-url",
        &server.url_str("/"),
        "--manifest-url",
        &server.url_str("/detect.json"),
    ]);
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_changed_bundle_exits_two() {
    let server = Server::run();
    serve_bundle(&server, JAN_FIRST_PLUS_ONE_HTTP);

    let output = run_guard(&[
        "--base-url",
        &server.url_str("/"),
        "--manifest-url",
        &server.url_str("/detect.json"),
    ]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_invalid_base_url_exits_one() {
    let output = run_guard(&["--base-url", "not a url"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("base_url"), "stderr was: {}", stderr);
}

#[test]
fn test_missing_dotenv_is_ignored() {
    let server = Server::run();
    serve_bundle(&server, JAN_FIRST_HTTP);
    let temp = TempDir::new().expect("temp dir");

    let output = run_guard_in(
        temp.path(),
        &[
            "--base-url",
            &server.url_str("/"),
            "--manifest-url",
            &server.url_str("/detect.json"),
        ],
    );
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_malformed_dotenv_exits_one() {
    let temp = TempDir::new().expect("temp dir");
    std::fs::write(
        temp.path().join(".env"),
        "not a valid line\nSAVE_JS_FILES=\"unterminated\n",
    )
    .expect("write .env");

    let output = run_guard_in(temp.path(), &[]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(".env"), "stderr was: {}", stderr);
}
