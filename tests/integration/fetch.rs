//! Fetching manifests over HTTP and running check cycles against them.

use barbersbar_update::config::ResolvedUrl;
use barbersbar_update::core::UpdaterError;
use barbersbar_update::test_utils::{init_test_logging, manifest_json};
use barbersbar_update::update::{
    HttpManifestFetcher, ManifestSource, UpdateChecker, UpdateSession, UpdateStatus, VersionCode,
};
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher() -> HttpManifestFetcher {
    HttpManifestFetcher::new(Duration::from_secs(5), "barbersbar-update-tests").unwrap()
}

async fn serve(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/update.json"))
        .respond_with(response)
        .mount(server)
        .await;
}

fn manifest_url(server: &MockServer) -> String {
    format!("{}/update.json", server.uri())
}

#[tokio::test]
async fn test_fetch_valid_manifest() {
    init_test_logging(None);
    let server = MockServer::start().await;
    serve(&server, ResponseTemplate::new(200).set_body_string(manifest_json("1.0.6", 6))).await;

    let manifest = fetcher().fetch(&manifest_url(&server)).await.unwrap();

    assert_eq!(manifest.version_name, "1.0.6");
    assert_eq!(manifest.version_code, VersionCode::new(6));
    assert_eq!(manifest.url, "https://downloads.test/app-1.0.6.apk");
    assert_eq!(manifest.release_notes, "Release 1.0.6");
}

#[tokio::test]
async fn test_fetch_sends_no_cache_and_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/update.json"))
        .and(header("cache-control", "no-cache"))
        .and(header("user-agent", "barbersbar-update-tests"))
        .respond_with(ResponseTemplate::new(200).set_body_string(manifest_json("1.0.6", 6)))
        .expect(2)
        .mount(&server)
        .await;

    // Each call goes to the server; nothing is cached between fetches.
    let fetcher = fetcher();
    let first = fetcher.fetch(&manifest_url(&server)).await.unwrap();
    let second = fetcher.fetch(&manifest_url(&server)).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_server_error_is_network_failure() {
    let server = MockServer::start().await;
    serve(&server, ResponseTemplate::new(500)).await;

    let err = fetcher().fetch(&manifest_url(&server)).await.unwrap_err();
    match err {
        UpdaterError::Network { reason, .. } => assert!(reason.contains("500"), "{reason}"),
        other => panic!("expected network error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_html_body_is_parse_failure() {
    let server = MockServer::start().await;
    serve(&server, ResponseTemplate::new(200).set_body_string("<html>Not found</html>")).await;

    let err = fetcher().fetch(&manifest_url(&server)).await.unwrap_err();
    assert!(matches!(err, UpdaterError::Parse { .. }), "{err:?}");
}

#[tokio::test]
async fn test_missing_version_code_is_invalid_version() {
    let server = MockServer::start().await;
    let body = serde_json::json!({
        "versionName": "1.0.6",
        "url": "https://downloads.test/app.apk",
        "releaseNotes": "",
    });
    serve(&server, ResponseTemplate::new(200).set_body_json(body)).await;

    let err = fetcher().fetch(&manifest_url(&server)).await.unwrap_err();
    assert!(matches!(err, UpdaterError::InvalidVersion { .. }), "{err:?}");
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let server = MockServer::start().await;
    serve(
        &server,
        ResponseTemplate::new(200)
            .set_body_string(manifest_json("1.0.6", 6))
            .set_delay(Duration::from_secs(3)),
    )
    .await;

    let fetcher = HttpManifestFetcher::new(Duration::from_millis(300), "tests").unwrap();
    let err = fetcher.fetch(&manifest_url(&server)).await.unwrap_err();
    match err {
        UpdaterError::Network { reason, .. } => assert!(reason.contains("timed out"), "{reason}"),
        other => panic!("expected network error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_check_reports_available_update() {
    let server = MockServer::start().await;
    serve(&server, ResponseTemplate::new(200).set_body_string(manifest_json("1.0.6", 6))).await;

    let checker = UpdateChecker::new(fetcher());
    let info = checker
        .check(&ResolvedUrl::explicit(manifest_url(&server)), VersionCode::new(5))
        .await;

    assert_eq!(info.status, UpdateStatus::Available);
    assert_eq!(info.remote_version, Some(VersionCode::new(6)));
    assert!(info.is_available());
}

#[tokio::test]
async fn test_check_up_to_date_for_equal_and_older() {
    let server = MockServer::start().await;
    serve(&server, ResponseTemplate::new(200).set_body_string(manifest_json("1.0.6", 6))).await;

    let checker = UpdateChecker::new(fetcher());
    let url = ResolvedUrl::explicit(manifest_url(&server));

    for installed in [6, 7] {
        let info = checker.check(&url, VersionCode::new(installed)).await;
        assert_eq!(info.status, UpdateStatus::UpToDate, "installed {installed}");
        assert!(info.manifest.is_none());
    }
}

#[tokio::test]
async fn test_missing_manifest_is_no_update() {
    // Nothing mounted: the server answers 404.
    let server = MockServer::start().await;

    let checker = UpdateChecker::new(fetcher());
    let info = checker
        .check(&ResolvedUrl::explicit(manifest_url(&server)), VersionCode::new(1))
        .await;

    assert_eq!(info.status, UpdateStatus::Error);
    assert_eq!(info.error_kind.as_deref(), Some("network"));
    assert!(!info.is_available());
}

#[tokio::test]
async fn test_session_prompts_once_across_cycles() {
    let server = MockServer::start().await;
    serve(&server, ResponseTemplate::new(200).set_body_string(manifest_json("1.0.6", 6))).await;

    let session = UpdateSession::new(
        UpdateChecker::new(fetcher()),
        ResolvedUrl::explicit(manifest_url(&server)),
        VersionCode::new(5),
    );

    let first = session.run_cycle().await;
    let second = session.run_cycle().await;

    let prompt = first.prompt.expect("first cycle should prompt");
    assert_eq!(prompt.url, "https://downloads.test/app-1.0.6.apk");
    assert_eq!(prompt.release_notes, "Release 1.0.6");
    assert!(second.prompt.is_none());
    assert_eq!(second.info.status, UpdateStatus::Available);
}
