//! Integration tests for the offline cache protocol: install, version-bump
//! garbage collection, app-shell navigation, and runtime caching.

mod common;

use common::MemoryFetcher;
use std::sync::Arc;
use vachanamrut_core::cache::{CacheManifest, CacheStore, CacheWorker, SHELL_DOCUMENT};
use vachanamrut_core::fetch::{FetchRequest, ResponseKind};
use vachanamrut_core::ReaderError;

const SHELL_BODY: &[u8] = b"<html>app shell</html>";

fn small_manifest() -> CacheManifest {
    CacheManifest {
        core: vec![
            "./".to_string(),
            "./index.html".to_string(),
            "./js/app.js".to_string(),
        ],
        data_files: vec![
            "./assets/data/gujarati/vachanamrut-1.json".to_string(),
            "./assets/data/gujarati/vachanamrut-2.json".to_string(),
        ],
    }
}

fn seeded_fetcher() -> Arc<MemoryFetcher> {
    let fetcher = MemoryFetcher::default();
    fetcher.insert("./", SHELL_BODY);
    fetcher.insert("./index.html", SHELL_BODY);
    fetcher.insert("./js/app.js", b"console.log('app')".as_slice());
    fetcher.insert(
        "./assets/data/gujarati/vachanamrut-1.json",
        r#"{"vachanamrut":"Gadhada I-1"}"#,
    );
    fetcher.insert(
        "./assets/data/gujarati/vachanamrut-2.json",
        r#"{"vachanamrut":"Gadhada I-2"}"#,
    );
    Arc::new(fetcher)
}

#[tokio::test]
async fn version_bump_deletes_exactly_the_previous_generations() {
    let root = tempfile::tempdir().unwrap();
    let fetcher = seeded_fetcher();

    let mut old = CacheWorker::with_manifest(
        "1",
        CacheStore::new(root.path()),
        Arc::clone(&fetcher),
        small_manifest(),
    );
    old.install().await.unwrap();
    old.activate().await.unwrap();

    let store = CacheStore::new(root.path());
    let mut new = CacheWorker::with_manifest(
        "2",
        CacheStore::new(root.path()),
        Arc::clone(&fetcher),
        small_manifest(),
    );
    new.install().await.unwrap();

    // Install alone must not touch the old generation
    let mut names = store.bucket_names().await.unwrap();
    names.sort();
    assert_eq!(names, vec!["1", "2"]);

    new.activate().await.unwrap();
    assert_eq!(store.bucket_names().await.unwrap(), vec!["2"]);

    // An asset present in both versions is served from "2" without network
    let before = fetcher.network_fetches();
    let response = new
        .handle_fetch(&FetchRequest::asset("./js/app.js"))
        .await
        .unwrap();
    assert_eq!(response.body, b"console.log('app')");
    assert_eq!(fetcher.network_fetches(), before);
}

#[tokio::test]
async fn install_requests_immediate_activation_readiness() {
    let root = tempfile::tempdir().unwrap();
    let fetcher = seeded_fetcher();
    let mut worker = CacheWorker::with_manifest(
        "1.0.1",
        CacheStore::new(root.path()),
        Arc::clone(&fetcher),
        small_manifest(),
    );
    assert!(!worker.is_activation_ready());

    worker.install().await.unwrap();
    assert!(worker.is_activation_ready());
    assert!(!worker.controls_clients());

    worker.activate().await.unwrap();
    assert!(worker.controls_clients());
}

#[tokio::test]
async fn a_missing_data_file_does_not_abort_install() {
    let root = tempfile::tempdir().unwrap();
    let fetcher = seeded_fetcher();
    fetcher.remove("./assets/data/gujarati/vachanamrut-2.json");

    let mut worker = CacheWorker::with_manifest(
        "1",
        CacheStore::new(root.path()),
        Arc::clone(&fetcher),
        small_manifest(),
    );
    worker.install().await.unwrap();

    // The one that did cache is served offline, stored under its clean URL
    // despite being fetched with a cache-busting query.
    fetcher.remove("./assets/data/gujarati/vachanamrut-1.json");
    let response = worker
        .handle_fetch(&FetchRequest::asset(
            "./assets/data/gujarati/vachanamrut-1.json",
        ))
        .await
        .unwrap();
    assert!(response.body.starts_with(b"{"));
}

#[tokio::test]
async fn a_missing_core_asset_fails_install() {
    let root = tempfile::tempdir().unwrap();
    let fetcher = seeded_fetcher();
    fetcher.remove("./js/app.js");

    let mut worker = CacheWorker::with_manifest(
        "1",
        CacheStore::new(root.path()),
        Arc::clone(&fetcher),
        small_manifest(),
    );
    let err = worker.install().await.unwrap_err();
    assert!(matches!(err, ReaderError::CacheInstallFailed { .. }));
}

#[tokio::test]
async fn navigation_requests_resolve_to_the_cached_shell() {
    let root = tempfile::tempdir().unwrap();
    let fetcher = seeded_fetcher();
    let mut worker = CacheWorker::with_manifest(
        "1",
        CacheStore::new(root.path()),
        Arc::clone(&fetcher),
        small_manifest(),
    );
    worker.install().await.unwrap();

    // Deep-link URL with a path and query the cache has never seen
    let response = worker
        .handle_fetch(&FetchRequest::navigation("./some/deep/path?id=9"))
        .await
        .unwrap();
    assert_eq!(response.body, SHELL_BODY);
    assert_eq!(response.url, SHELL_DOCUMENT);
}

#[tokio::test]
async fn cache_hits_ignore_query_strings_and_never_revalidate() {
    let root = tempfile::tempdir().unwrap();
    let fetcher = seeded_fetcher();
    let mut worker = CacheWorker::with_manifest(
        "1",
        CacheStore::new(root.path()),
        Arc::clone(&fetcher),
        small_manifest(),
    );
    worker.install().await.unwrap();

    let before = fetcher.network_fetches();
    let response = worker
        .handle_fetch(&FetchRequest::asset("./js/app.js?v=123"))
        .await
        .unwrap();
    assert_eq!(response.body, b"console.log('app')");
    assert_eq!(fetcher.network_fetches(), before);
}

#[tokio::test]
async fn runtime_misses_cache_basic_200_responses_only() {
    let root = tempfile::tempdir().unwrap();
    let fetcher = seeded_fetcher();
    let mut worker = CacheWorker::with_manifest(
        "1",
        CacheStore::new(root.path()),
        Arc::clone(&fetcher),
        small_manifest(),
    );
    worker.install().await.unwrap();

    // Basic 200: cached on first miss, served offline afterwards
    fetcher.insert("./images/new.png", b"png bytes".as_slice());
    let first = worker
        .handle_fetch(&FetchRequest::asset("./images/new.png"))
        .await
        .unwrap();
    assert_eq!(first.body, b"png bytes");

    fetcher.remove("./images/new.png");
    let second = worker
        .handle_fetch(&FetchRequest::asset("./images/new.png"))
        .await
        .unwrap();
    assert_eq!(second.body, b"png bytes");

    // Opaque cross-origin: passed through, never stored
    fetcher.insert_with(
        "https://fonts.example/css",
        200,
        ResponseKind::Opaque,
        b"@font-face {}".as_slice(),
    );
    worker
        .handle_fetch(&FetchRequest::asset("https://fonts.example/css"))
        .await
        .unwrap();
    let before = fetcher.network_fetches();
    worker
        .handle_fetch(&FetchRequest::asset("https://fonts.example/css"))
        .await
        .unwrap();
    assert_eq!(fetcher.network_fetches(), before + 1);

    // Non-200: passed through, never stored
    let missing = worker
        .handle_fetch(&FetchRequest::asset("./images/absent.png"))
        .await
        .unwrap();
    assert_eq!(missing.status, 404);
    let before = fetcher.network_fetches();
    worker
        .handle_fetch(&FetchRequest::asset("./images/absent.png"))
        .await
        .unwrap();
    assert_eq!(fetcher.network_fetches(), before + 1);
}

#[tokio::test]
async fn a_failed_runtime_cache_write_still_returns_the_response() {
    let root = tempfile::tempdir().unwrap();
    let fetcher = seeded_fetcher();
    let mut worker = CacheWorker::with_manifest(
        "1",
        CacheStore::new(root.path()),
        Arc::clone(&fetcher),
        small_manifest(),
    );
    worker.install().await.unwrap();

    // Point the entry's on-disk location into a missing directory: lookups
    // still miss cleanly, but the store write cannot land.
    fetcher.insert("./images/new.png", b"png bytes".as_slice());
    let bucket = CacheStore::new(root.path()).open_bucket("1").await.unwrap();
    std::os::unix::fs::symlink(
        root.path().join("missing/target"),
        bucket.entry_path("./images/new.png"),
    )
    .unwrap();

    let response = worker
        .handle_fetch(&FetchRequest::asset("./images/new.png"))
        .await
        .unwrap();
    assert_eq!(response.body, b"png bytes");
    assert_eq!(response.status, 200);

    // Nothing was stored; the next request goes back to the network
    let before = fetcher.network_fetches();
    worker
        .handle_fetch(&FetchRequest::asset("./images/new.png"))
        .await
        .unwrap();
    assert_eq!(fetcher.network_fetches(), before + 1);
}

#[tokio::test]
async fn the_production_manifest_tolerates_missing_data_files() {
    let root = tempfile::tempdir().unwrap();
    let fetcher = seeded_fetcher();
    // Satisfy the full core manifest; data files stay mostly absent.
    for url in vachanamrut_core::cache::CORE_ASSETS {
        fetcher.insert(url, b"asset".as_slice());
    }
    for url in vachanamrut_core::cache::EXTERNAL_STYLESHEETS {
        fetcher.insert_with(url, 200, ResponseKind::Opaque, b"css".as_slice());
    }

    let mut worker = CacheWorker::new("3", CacheStore::new(root.path()), Arc::clone(&fetcher));
    worker.install().await.unwrap();
    worker.activate().await.unwrap();
    assert!(worker.controls_clients());
}
